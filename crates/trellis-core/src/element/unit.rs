//! Measurements used by spacing elements (tick lengths, margins, key sizes).

use std::{fmt, str::FromStr};

/// The unit a [`Unit`] or [`Margin`] value is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// Centimetres
    Cm,
    /// Millimetres
    Mm,
    /// Inches
    Inches,
    /// Points (1/72.27 inch)
    Points,
    /// Multiples of the current line height
    Lines,
    /// Normalised parent coordinates, 0 to 1
    Npc,
}

impl FromStr for UnitKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cm" => Ok(Self::Cm),
            "mm" => Ok(Self::Mm),
            "in" | "inches" => Ok(Self::Inches),
            "pt" | "points" => Ok(Self::Points),
            "lines" => Ok(Self::Lines),
            "npc" => Ok(Self::Npc),
            _ => Err(format!(
                "invalid unit `{s}`, valid values: cm, mm, in, pt, lines, npc"
            )),
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Cm => "cm",
            Self::Mm => "mm",
            Self::Inches => "in",
            Self::Points => "pt",
            Self::Lines => "lines",
            Self::Npc => "npc",
        };
        f.write_str(name)
    }
}

/// A single measurement such as `0.15cm`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    value: f32,
    kind: UnitKind,
}

impl Unit {
    pub fn new(value: f32, kind: UnitKind) -> Self {
        Self { value, kind }
    }

    pub fn value(self) -> f32 {
        self.value
    }

    pub fn kind(self) -> UnitKind {
        self.kind
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.kind)
    }
}

/// Four-sided spacing around a plot, all sides in one unit.
///
/// Sides follow CSS order: top, right, bottom, left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
    kind: UnitKind,
}

impl Margin {
    /// Creates a margin with specified values for each side.
    pub fn new(top: f32, right: f32, bottom: f32, left: f32, kind: UnitKind) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
            kind,
        }
    }

    /// Creates a margin with the same value on every side.
    pub fn uniform(value: f32, kind: UnitKind) -> Self {
        Self::new(value, value, value, value, kind)
    }

    pub fn top(self) -> f32 {
        self.top
    }

    pub fn right(self) -> f32 {
        self.right
    }

    pub fn bottom(self) -> f32 {
        self.bottom
    }

    pub fn left(self) -> f32 {
        self.left
    }

    pub fn kind(self) -> UnitKind {
        self.kind
    }

    /// Returns the sum of left and right.
    pub fn horizontal_sum(self) -> f32 {
        self.left + self.right
    }

    /// Returns the sum of top and bottom.
    pub fn vertical_sum(self) -> f32 {
        self.top + self.bottom
    }
}

impl fmt::Display for Margin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "margin({}, {}, {}, {}, {})",
            self.top, self.right, self.bottom, self.left, self.kind
        )
    }
}
