//! Position adjustments for grouped bar and area data.
//!
//! Rows that share an x interval collide; the adjustments here pile
//! colliding rows on top of each other ([`PositionStack`]) and optionally
//! rescale each pile to the unit interval ([`PositionFill`]).
//!
//! Both run the same collision step first:
//!
//! 1. Rows without an explicit `xmin`/`xmax` get one from `x`, either
//!    `x ± width / 2` when a width is configured or a zero-width interval.
//! 2. Non-constant widths and overlapping intervals are reported as
//!    warnings; the adjustment still runs.
//! 3. Rows are stably sorted by `(xmin, group)` and split into one stack per
//!    distinct `xmin`.
//!
//! # Example
//!
//! ```
//! # use trellis::position::{StackRow, adjust_fill};
//! let rows = vec![
//!     StackRow::new(1.0, 0.0, 1.0).with_group(1),
//!     StackRow::new(1.0, 0.0, 3.0).with_group(2),
//! ];
//! let filled = adjust_fill(rows).unwrap();
//! assert_eq!(filled[0].ymax, Some(0.25));
//! assert_eq!(filled[1].ymax, Some(1.0));
//! ```

mod fill;
mod stack;

pub use fill::{PositionFill, adjust_fill};
pub use stack::PositionStack;

use log::{trace, warn};
use serde::{Deserialize, Serialize};

use crate::error::PositionError;

/// Relative tolerance used when comparing widths and interval bounds.
const TOLERANCE: f64 = 1e-6;

/// One data row taking part in a position adjustment.
///
/// Positional fields are optional; which of them must be present depends on
/// the adjustment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StackRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ymin: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ymax: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xmin: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xmax: Option<f64>,
    /// Stacking order within one x position.
    #[serde(default)]
    pub group: i32,
}

impl StackRow {
    /// Creates a row spanning `ymin..ymax` at `x`.
    pub fn new(x: f64, ymin: f64, ymax: f64) -> Self {
        Self {
            x: Some(x),
            ymin: Some(ymin),
            ymax: Some(ymax),
            ..Self::default()
        }
    }

    pub fn with_group(mut self, group: i32) -> Self {
        self.group = group;
        self
    }

    fn aesthetic(&self, name: &str) -> Option<f64> {
        match name {
            "x" => self.x,
            "y" => self.y,
            "ymin" => self.ymin,
            "ymax" => self.ymax,
            "xmin" => self.xmin,
            "xmax" => self.xmax,
            _ => None,
        }
    }

    /// The row's extent along y; a missing `ymin` counts as 0 and anything
    /// not computable counts as no height.
    fn height(&self) -> f64 {
        let height = self.ymax.unwrap_or(f64::NAN) - self.ymin.unwrap_or(0.0);
        if height.is_nan() { 0.0 } else { height }
    }
}

/// A transformation applied to all rows of one data layer.
pub trait PositionAdjustment {
    /// Adjusts `rows`, returning them in stacking order.
    ///
    /// # Errors
    ///
    /// Returns [`PositionError::MissingAesthetic`] when rows lack fields the
    /// adjustment needs.
    fn compute(&self, rows: Vec<StackRow>) -> Result<Vec<StackRow>, PositionError>;
}

/// Lists the required fields that at least one row lacks.
fn missing_aesthetics(rows: &[StackRow], required: &[&'static str]) -> Vec<&'static str> {
    required
        .iter()
        .copied()
        .filter(|name| rows.iter().any(|row| row.aesthetic(name).is_none()))
        .collect()
}

/// Returns `true` when some row starts away from zero.
fn has_offset_ymin(rows: &[StackRow]) -> bool {
    rows.iter()
        .any(|row| row.ymin.is_some_and(|ymin| ymin != 0.0 && !ymin.is_nan()))
}

/// Runs the collision step and applies `strategy` to every stack.
fn collide(
    mut rows: Vec<StackRow>,
    width: Option<f64>,
    name: &str,
    mut strategy: impl FnMut(Vec<StackRow>) -> Vec<StackRow>,
) -> Vec<StackRow> {
    for row in &mut rows {
        if row.xmin.is_some() && row.xmax.is_some() {
            continue;
        }
        if let Some(x) = row.x {
            let half = width.map_or(0.0, |width| width / 2.0);
            row.xmin = Some(x - half);
            row.xmax = Some(x + half);
        }
    }

    if width.is_none() && !has_constant_width(&rows) {
        warn!(position = name; "{name} requires constant width: output may be incorrect");
    }

    rows.sort_by(|a, b| {
        let a_xmin = a.xmin.unwrap_or(f64::NAN);
        let b_xmin = b.xmin.unwrap_or(f64::NAN);
        a_xmin.total_cmp(&b_xmin).then(a.group.cmp(&b.group))
    });

    if has_overlapping_intervals(&rows) {
        warn!(position = name; "{name} requires non-overlapping x intervals");
    }

    let mut adjusted = Vec::with_capacity(rows.len());
    let mut rows = rows.into_iter().peekable();
    while let Some(first) = rows.next() {
        let xmin = first.xmin;
        let mut stack = vec![first];
        while let Some(row) = rows.next_if(|row| same_position(row.xmin, xmin)) {
            stack.push(row);
        }
        trace!(xmin:?, rows_count = stack.len(); "Adjusting stack");
        adjusted.extend(strategy(stack));
    }
    adjusted
}

fn same_position(a: Option<f64>, b: Option<f64>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b || (a.is_nan() && b.is_nan()),
        (None, None) => true,
        _ => false,
    }
}

fn has_constant_width(rows: &[StackRow]) -> bool {
    let mut widths = rows
        .iter()
        .filter_map(|row| Some(row.xmax? - row.xmin?))
        .filter(|width| !width.is_nan());
    let Some(first) = widths.next() else {
        return true;
    };
    let (min, max) = widths.fold((first, first), |(min, max), width| {
        (min.min(width), max.max(width))
    });
    max - min <= TOLERANCE * max.abs().max(min.abs()).max(1.0)
}

/// Checks the distinct intervals, in `xmin` order, for one that starts
/// before the previous one ends.
fn has_overlapping_intervals(rows: &[StackRow]) -> bool {
    let mut intervals: Vec<(f64, f64)> = rows
        .iter()
        .filter_map(|row| Some((row.xmin?, row.xmax?)))
        .filter(|(xmin, xmax)| !xmin.is_nan() && !xmax.is_nan())
        .collect();
    intervals.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
    intervals.dedup();

    let bounds: Vec<f64> = intervals
        .iter()
        .flat_map(|&(xmin, xmax)| [xmin, xmax])
        .collect();
    let (Some(low), Some(high)) = (
        bounds.iter().copied().reduce(f64::min),
        bounds.iter().copied().reduce(f64::max),
    ) else {
        return false;
    };
    let span = (high - low).max(f64::MIN_POSITIVE);

    bounds
        .windows(2)
        .any(|pair| (pair[1] - pair[0]) / span < -TOLERANCE)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn identity(stack: Vec<StackRow>) -> Vec<StackRow> {
        stack
    }

    #[test]
    fn test_row_height() {
        assert_eq!(StackRow::new(1.0, 1.0, 3.5).height(), 2.5);
        let row = StackRow {
            ymax: Some(2.0),
            ..StackRow::default()
        };
        assert_eq!(row.height(), 2.0);
        assert_eq!(StackRow::default().height(), 0.0);
    }

    #[test]
    fn test_collide_derives_intervals_from_width() {
        let rows = vec![StackRow::new(2.0, 0.0, 1.0)];
        let collided = collide(rows, Some(0.9), "test", identity);
        assert_approx_eq!(f64, collided[0].xmin.unwrap(), 1.55);
        assert_approx_eq!(f64, collided[0].xmax.unwrap(), 2.45);
    }

    #[test]
    fn test_collide_keeps_explicit_intervals() {
        let row = StackRow {
            xmin: Some(0.0),
            xmax: Some(1.0),
            ..StackRow::new(0.5, 0.0, 1.0)
        };
        let collided = collide(vec![row.clone()], Some(0.2), "test", identity);
        assert_eq!(collided, [row]);
    }

    #[test]
    fn test_collide_sorts_by_position_then_group() {
        let rows = vec![
            StackRow::new(2.0, 0.0, 1.0).with_group(1),
            StackRow::new(1.0, 0.0, 1.0).with_group(2),
            StackRow::new(1.0, 0.0, 1.0).with_group(1),
        ];
        let collided = collide(rows, None, "test", identity);
        let order: Vec<_> = collided.iter().map(|row| (row.x, row.group)).collect();
        assert_eq!(order, [(Some(1.0), 1), (Some(1.0), 2), (Some(2.0), 1)]);
    }

    #[test]
    fn test_collide_partitions_by_xmin() {
        let rows = vec![
            StackRow::new(1.0, 0.0, 1.0),
            StackRow::new(2.0, 0.0, 1.0),
            StackRow::new(1.0, 0.0, 1.0),
        ];
        let mut sizes = Vec::new();
        collide(rows, None, "test", |stack| {
            sizes.push(stack.len());
            stack
        });
        assert_eq!(sizes, [2, 1]);
    }

    #[test]
    fn test_constant_width_detection() {
        let equal = vec![
            StackRow {
                xmin: Some(0.0),
                xmax: Some(1.0),
                ..StackRow::default()
            },
            StackRow {
                xmin: Some(1.0),
                xmax: Some(2.0),
                ..StackRow::default()
            },
        ];
        assert!(has_constant_width(&equal));

        let mut unequal = equal.clone();
        unequal[1].xmax = Some(3.0);
        assert!(!has_constant_width(&unequal));
    }

    #[test]
    fn test_overlap_detection() {
        let row = |xmin, xmax| StackRow {
            xmin: Some(xmin),
            xmax: Some(xmax),
            ..StackRow::default()
        };
        assert!(!has_overlapping_intervals(&[row(0.0, 1.0), row(1.0, 2.0)]));
        assert!(!has_overlapping_intervals(&[row(0.0, 1.0), row(0.0, 1.0)]));
        assert!(has_overlapping_intervals(&[row(0.0, 1.5), row(1.0, 2.0)]));
        assert!(has_overlapping_intervals(&[row(0.0, 1.0), row(0.0, 2.0)]));
    }

    #[test]
    fn test_overlap_detection_with_repeated_intervals() {
        let rows: Vec<_> = (0..100_000)
            .map(|i| {
                let x = f64::from(i % 50_000);
                StackRow {
                    xmin: Some(x),
                    xmax: Some(x + 0.9),
                    ..StackRow::default()
                }
            })
            .collect();
        assert!(!has_overlapping_intervals(&rows));

        let mut overlapping = rows;
        overlapping[70_000].xmax = Some(30_001.5);
        assert!(has_overlapping_intervals(&overlapping));
    }

    #[test]
    fn test_missing_aesthetics() {
        let rows = vec![
            StackRow::new(1.0, 0.0, 1.0),
            StackRow {
                x: Some(1.0),
                ..StackRow::default()
            },
        ];
        assert_eq!(missing_aesthetics(&rows, &["x", "ymax"]), ["ymax"]);
    }
}
