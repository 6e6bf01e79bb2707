//! Configuration types for building themes and position adjustments.
//!
//! All types implement [`serde::Deserialize`] so hosts can load them from any
//! serde format; the CLI reads them from TOML.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration with a theme and a position section.
//! - [`ThemeConfig`] - Base theme, base font and per-element overrides.
//! - [`ElementConfig`] - One element override, checked against the element tree.
//! - [`PositionConfig`] - Interval width used by position adjustments.
//!
//! Element overrides are validated strictly: unknown keys are rejected while
//! deserializing, and [`ElementConfig::to_element`] rejects properties the
//! element's kind does not have.
//!
//! # Example
//!
//! ```
//! # use trellis::config::AppConfig;
//! let config = AppConfig::default();
//! let theme = config.theme().build().unwrap();
//! assert!(theme.contains("panel.background"));
//! ```

use std::str::FromStr;

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;

use trellis_core::{
    color::Color,
    element::{
        Element, ElementKind, FontFace, LineElement, LineEnd, LineType, Margin, RectElement, Size,
        TextElement, Unit, UnitKind,
    },
};

use crate::{
    error::ThemeError,
    position::{PositionFill, PositionStack},
    theme::{Theme, theme_bw, theme_grey},
    tree::ElementTree,
};

/// Top-level configuration combining theme and position settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Theme configuration section.
    #[serde(default)]
    theme: ThemeConfig,

    /// Position adjustment section.
    #[serde(default)]
    position: PositionConfig,
}

impl AppConfig {
    pub fn new(theme: ThemeConfig, position: PositionConfig) -> Self {
        Self { theme, position }
    }

    /// Returns the theme configuration.
    pub fn theme(&self) -> &ThemeConfig {
        &self.theme
    }

    /// Returns the position configuration.
    pub fn position(&self) -> &PositionConfig {
        &self.position
    }
}

/// The built-in theme overrides are applied to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseTheme {
    /// [`theme_grey`]
    #[default]
    #[serde(alias = "gray")]
    Grey,
    /// [`theme_bw`]
    Bw,
}

impl BaseTheme {
    /// Builds the base theme.
    pub fn build(self, base_size: f32, base_family: &str) -> Theme {
        match self {
            Self::Grey => theme_grey(base_size, base_family),
            Self::Bw => theme_bw(base_size, base_family),
        }
    }
}

/// How element overrides are combined with the base theme.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeMode {
    /// Property-level update (`base | overrides`).
    #[default]
    Update,
    /// Whole-element replacement (`base + overrides`).
    Replace,
}

fn default_base_size() -> f32 {
    12.0
}

/// Theme configuration: a base theme plus element overrides.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    #[serde(default)]
    base: BaseTheme,

    #[serde(default = "default_base_size")]
    base_size: f32,

    #[serde(default)]
    base_family: String,

    #[serde(default)]
    mode: MergeMode,

    /// Overrides keyed by element name, in file order.
    #[serde(default)]
    elements: IndexMap<String, ElementConfig>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            base: BaseTheme::default(),
            base_size: default_base_size(),
            base_family: String::new(),
            mode: MergeMode::default(),
            elements: IndexMap::new(),
        }
    }
}

impl ThemeConfig {
    pub fn base(&self) -> BaseTheme {
        self.base
    }

    pub fn base_size(&self) -> f32 {
        self.base_size
    }

    pub fn base_family(&self) -> &str {
        &self.base_family
    }

    pub fn mode(&self) -> MergeMode {
        self.mode
    }

    pub fn elements(&self) -> &IndexMap<String, ElementConfig> {
        &self.elements
    }

    /// Converts the element overrides into a theme against `tree`.
    ///
    /// # Errors
    ///
    /// Returns the first override that fails [`ElementConfig::to_element`].
    pub fn overrides(&self, tree: &ElementTree) -> Result<Theme, ThemeError> {
        self.elements
            .iter()
            .map(|(name, config)| Ok((name.as_str(), config.to_element(name, tree)?)))
            .collect()
    }

    /// Builds the configured theme against the built-in element tree.
    ///
    /// # Errors
    ///
    /// Returns an error if an override is invalid or, in update mode, cannot
    /// be merged onto the base theme.
    pub fn build(&self) -> Result<Theme, ThemeError> {
        let base = self.base.build(self.base_size, &self.base_family);
        let overrides = self.overrides(ElementTree::builtin())?;
        debug!(
            base:? = self.base,
            mode:? = self.mode,
            overrides_count = overrides.len();
            "Building theme from configuration"
        );

        match self.mode {
            MergeMode::Update => base | overrides,
            MergeMode::Replace => Ok(base + overrides),
        }
    }
}

/// A size written either as a number, `{ rel = 0.8 }` or `"rel(0.8)"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SizeConfig {
    Absolute(f32),
    Relative { rel: f32 },
    Text(String),
}

/// A line type written as its number or its name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LineTypeConfig {
    Number(u8),
    Name(String),
}

/// The value of an atomic element.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ValueConfig {
    Number(f32),
    Text(String),
}

/// One element override.
///
/// `kind` defaults to the kind the element tree requires; `kind = "blank"`
/// suppresses the element. Which other keys are allowed depends on the kind:
///
/// | Kind | Keys |
/// |------|------|
/// | line | `color`, `size`, `linetype`, `lineend` |
/// | rect | `fill`, `color`, `size`, `linetype` |
/// | text | `family`, `face`, `color`, `size`, `hjust`, `vjust`, `angle`, `lineheight` |
/// | unit | `value`, `unit` |
/// | margin | `top`, `right`, `bottom`, `left`, `value`, `unit` |
/// | setting | `value` |
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementConfig {
    kind: Option<String>,
    #[serde(alias = "colour")]
    color: Option<String>,
    fill: Option<String>,
    size: Option<SizeConfig>,
    linetype: Option<LineTypeConfig>,
    lineend: Option<String>,
    family: Option<String>,
    face: Option<String>,
    hjust: Option<f32>,
    vjust: Option<f32>,
    angle: Option<f32>,
    lineheight: Option<f32>,
    value: Option<ValueConfig>,
    unit: Option<String>,
    top: Option<f32>,
    right: Option<f32>,
    bottom: Option<f32>,
    left: Option<f32>,
}

impl ElementConfig {
    /// Converts this override into the element for `name`.
    ///
    /// # Errors
    ///
    /// - [`ThemeError::UnknownElement`] if `name` is not in `tree`
    /// - [`ThemeError::ClassMismatch`] if `kind` differs from the tree's kind
    /// - [`ThemeError::InvalidProperty`] for a key the kind does not have
    /// - [`ThemeError::InvalidValue`] for a value that does not parse or a
    ///   required value that is missing
    pub fn to_element(&self, name: &str, tree: &ElementTree) -> Result<Element, ThemeError> {
        let expected = tree.kind_of(name)?;

        if let Some(kind) = self.kind.as_deref() {
            if kind == "blank" {
                return match self.set_keys().first() {
                    Some(key) => Err(invalid_value(
                        name,
                        key,
                        "a blank element takes no properties",
                    )),
                    None => Ok(Element::Blank),
                };
            }

            let found = ElementKind::from_str(kind).map_err(|err| invalid_value(name, "kind", err))?;
            if found != expected {
                return Err(ThemeError::ClassMismatch {
                    element: name.to_string(),
                    expected,
                    found,
                });
            }
        }

        let allowed = config_keys(expected);
        if let Some(key) = self.set_keys().into_iter().find(|key| !allowed.contains(key)) {
            return Err(ThemeError::InvalidProperty {
                element: name.to_string(),
                property: key.to_string(),
                kind: expected,
            });
        }

        match expected {
            ElementKind::Line => self.line(name).map(Element::Line),
            ElementKind::Rect => self.rect(name).map(Element::Rect),
            ElementKind::Text => self.text(name).map(Element::Text),
            ElementKind::Unit => self.unit_value(name).map(Element::Unit),
            ElementKind::Margin => self.margin(name).map(Element::Margin),
            ElementKind::Setting => self.setting(name).map(Element::Setting),
        }
    }

    /// Names of the property keys that are set, `kind` excluded.
    fn set_keys(&self) -> Vec<&'static str> {
        [
            ("color", self.color.is_some()),
            ("fill", self.fill.is_some()),
            ("size", self.size.is_some()),
            ("linetype", self.linetype.is_some()),
            ("lineend", self.lineend.is_some()),
            ("family", self.family.is_some()),
            ("face", self.face.is_some()),
            ("hjust", self.hjust.is_some()),
            ("vjust", self.vjust.is_some()),
            ("angle", self.angle.is_some()),
            ("lineheight", self.lineheight.is_some()),
            ("value", self.value.is_some()),
            ("unit", self.unit.is_some()),
            ("top", self.top.is_some()),
            ("right", self.right.is_some()),
            ("bottom", self.bottom.is_some()),
            ("left", self.left.is_some()),
        ]
        .into_iter()
        .filter_map(|(key, set)| set.then_some(key))
        .collect()
    }

    fn line(&self, name: &str) -> Result<LineElement, ThemeError> {
        let mut line = LineElement::new();
        if let Some(color) = parse::<Color>(name, "color", self.color.as_deref())? {
            line = line.with_color(color);
        }
        if let Some(size) = self.size(name)? {
            line = line.with_size(size);
        }
        if let Some(linetype) = self.linetype(name)? {
            line = line.with_linetype(linetype);
        }
        if let Some(lineend) = parse::<LineEnd>(name, "lineend", self.lineend.as_deref())? {
            line = line.with_lineend(lineend);
        }
        Ok(line)
    }

    fn rect(&self, name: &str) -> Result<RectElement, ThemeError> {
        let mut rect = RectElement::new();
        if let Some(fill) = parse::<Color>(name, "fill", self.fill.as_deref())? {
            rect = rect.with_fill(fill);
        }
        if let Some(color) = parse::<Color>(name, "color", self.color.as_deref())? {
            rect = rect.with_color(color);
        }
        if let Some(size) = self.size(name)? {
            rect = rect.with_size(size);
        }
        if let Some(linetype) = self.linetype(name)? {
            rect = rect.with_linetype(linetype);
        }
        Ok(rect)
    }

    fn text(&self, name: &str) -> Result<TextElement, ThemeError> {
        let mut text = TextElement::new();
        if let Some(family) = &self.family {
            text = text.with_family(family.as_str());
        }
        if let Some(face) = parse::<FontFace>(name, "face", self.face.as_deref())? {
            text = text.with_face(face);
        }
        if let Some(color) = parse::<Color>(name, "color", self.color.as_deref())? {
            text = text.with_color(color);
        }
        if let Some(size) = self.size(name)? {
            text = text.with_size(size);
        }
        if let Some(hjust) = self.hjust {
            text = text.with_hjust(hjust);
        }
        if let Some(vjust) = self.vjust {
            text = text.with_vjust(vjust);
        }
        if let Some(angle) = self.angle {
            text = text.with_angle(angle);
        }
        if let Some(lineheight) = self.lineheight {
            text = text.with_lineheight(lineheight);
        }
        Ok(text)
    }

    fn unit_value(&self, name: &str) -> Result<Unit, ThemeError> {
        let value = match &self.value {
            Some(ValueConfig::Number(value)) => *value,
            Some(ValueConfig::Text(text)) => {
                return Err(invalid_value(
                    name,
                    "value",
                    format!("expected a number, found `{text}`"),
                ));
            }
            None => return Err(invalid_value(name, "value", "a unit element needs a value")),
        };
        Ok(Unit::new(value, self.unit_kind(name)?))
    }

    fn margin(&self, name: &str) -> Result<Margin, ThemeError> {
        let uniform = match &self.value {
            Some(ValueConfig::Number(value)) => Some(*value),
            Some(ValueConfig::Text(text)) => {
                return Err(invalid_value(
                    name,
                    "value",
                    format!("expected a number, found `{text}`"),
                ));
            }
            None => None,
        };
        let side = |property: &str, value: Option<f32>| {
            value
                .or(uniform)
                .ok_or_else(|| invalid_value(name, property, "a margin needs every side"))
        };

        Ok(Margin::new(
            side("top", self.top)?,
            side("right", self.right)?,
            side("bottom", self.bottom)?,
            side("left", self.left)?,
            self.unit_kind(name)?,
        ))
    }

    fn setting(&self, name: &str) -> Result<String, ThemeError> {
        match &self.value {
            Some(ValueConfig::Text(text)) => Ok(text.clone()),
            Some(ValueConfig::Number(value)) => Ok(value.to_string()),
            None => Err(invalid_value(name, "value", "a setting needs a value")),
        }
    }

    fn size(&self, name: &str) -> Result<Option<Size>, ThemeError> {
        match &self.size {
            None => Ok(None),
            Some(SizeConfig::Absolute(size)) => Ok(Some(Size::Absolute(*size))),
            Some(SizeConfig::Relative { rel }) => Ok(Some(Size::Relative(*rel))),
            Some(SizeConfig::Text(text)) => parse(name, "size", Some(text.as_str())),
        }
    }

    fn linetype(&self, name: &str) -> Result<Option<LineType>, ThemeError> {
        match &self.linetype {
            None => Ok(None),
            Some(LineTypeConfig::Number(number)) => {
                parse(name, "linetype", Some(number.to_string().as_str()))
            }
            Some(LineTypeConfig::Name(text)) => parse(name, "linetype", Some(text.as_str())),
        }
    }

    fn unit_kind(&self, name: &str) -> Result<UnitKind, ThemeError> {
        parse::<UnitKind>(name, "unit", self.unit.as_deref())?
            .ok_or_else(|| invalid_value(name, "unit", "a measurement needs a unit"))
    }
}

/// Configuration keys accepted for each element kind.
fn config_keys(kind: ElementKind) -> &'static [&'static str] {
    match kind {
        ElementKind::Line | ElementKind::Rect | ElementKind::Text => kind.property_names(),
        ElementKind::Unit => &["value", "unit"],
        ElementKind::Margin => &["top", "right", "bottom", "left", "value", "unit"],
        ElementKind::Setting => &["value"],
    }
}

fn parse<T>(element: &str, property: &str, value: Option<&str>) -> Result<Option<T>, ThemeError>
where
    T: FromStr<Err = String>,
{
    value
        .map(T::from_str)
        .transpose()
        .map_err(|message| invalid_value(element, property, message))
}

fn invalid_value(element: &str, property: &str, message: impl Into<String>) -> ThemeError {
    ThemeError::InvalidValue {
        element: element.to_string(),
        property: property.to_string(),
        message: message.into(),
    }
}

/// Position adjustment configuration.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PositionConfig {
    /// Interval width for rows without `xmin`/`xmax`.
    #[serde(default)]
    width: Option<f64>,
}

impl PositionConfig {
    pub fn new(width: Option<f64>) -> Self {
        Self { width }
    }

    pub fn width(&self) -> Option<f64> {
        self.width
    }

    /// Returns the fill adjustment for this configuration.
    pub fn fill(&self) -> PositionFill {
        PositionFill::new(self.width)
    }

    /// Returns the stack adjustment for this configuration.
    pub fn stack(&self) -> PositionStack {
        PositionStack::new(self.width)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use trellis_core::element::rel;

    use super::*;
    use crate::resolve::calc_element;

    fn parse_config(source: &str) -> AppConfig {
        toml::from_str(source).unwrap()
    }

    fn element(source: &str, name: &str) -> Result<Element, ThemeError> {
        let config: ElementConfig = toml::from_str(source).unwrap();
        config.to_element(name, ElementTree::builtin())
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.theme().base(), BaseTheme::Grey);
        assert_eq!(config.theme().base_size(), 12.0);
        assert_eq!(config.theme().mode(), MergeMode::Update);
        assert_eq!(config.position().width(), None);
        assert_eq!(config.theme().build().unwrap(), Theme::default());
    }

    #[test]
    fn test_full_config() {
        let config = parse_config(
            r#"
            [theme]
            base = "bw"
            base_size = 14.0
            base_family = "serif"

            [theme.elements."panel.background"]
            fill = "red"

            [theme.elements."axis.text.x"]
            size = { rel = 0.5 }
            angle = 90

            [theme.elements."panel.grid.minor"]
            kind = "blank"

            [position]
            width = 0.9
            "#,
        );
        assert_eq!(config.position().width(), Some(0.9));
        assert_eq!(config.theme().elements().len(), 3);

        let theme = config.theme().build().unwrap();

        let Ok(Element::Rect(background)) = calc_element("panel.background", &theme) else {
            panic!("expected a rect element");
        };
        assert_eq!(background.fill(), Some(Color::new("red").unwrap()));
        assert_eq!(background.color(), Some(Color::transparent()));

        let Ok(Element::Text(text)) = calc_element("axis.text.x", &theme) else {
            panic!("expected a text element");
        };
        assert_eq!(text.angle(), Some(90.0));
        assert_eq!(text.family(), Some("serif"));
        assert_approx_eq!(f32, text.size().and_then(Size::absolute).unwrap(), 5.6);

        assert_eq!(theme.get("panel.grid.minor"), Some(&Element::Blank));
    }

    #[test]
    fn test_replace_mode_discards_base_entry() {
        let config = parse_config(
            r#"
            [theme]
            mode = "replace"

            [theme.elements."panel.background"]
            fill = "red"
            "#,
        );
        let theme = config.theme().build().unwrap();
        assert_eq!(
            theme.get("panel.background"),
            Some(&Element::Rect(
                RectElement::new().with_fill(Color::new("red").unwrap())
            ))
        );
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(toml::from_str::<ElementConfig>("colr = \"red\"").is_err());
        assert!(toml::from_str::<AppConfig>("[themes]").is_err());
    }

    #[test]
    fn test_colour_alias() {
        let Ok(Element::Line(line)) = element("colour = \"grey50\"", "axis.ticks") else {
            panic!("expected a line element");
        };
        assert_eq!(line.color(), Some(Color::new("grey50").unwrap()));
    }

    #[test]
    fn test_property_not_on_kind() {
        assert_eq!(
            element("fill = \"red\"", "axis.line"),
            Err(ThemeError::InvalidProperty {
                element: "axis.line".to_string(),
                property: "fill".to_string(),
                kind: ElementKind::Line,
            })
        );
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            element("color = \"not-a-color\"", "axis.line"),
            Err(ThemeError::InvalidValue { property, .. }) if property == "color"
        ));
        assert!(matches!(
            element("linetype = 9", "axis.line"),
            Err(ThemeError::InvalidValue { property, .. }) if property == "linetype"
        ));
        assert!(matches!(
            element("value = 0.2", "legend.margin"),
            Err(ThemeError::InvalidValue { property, .. }) if property == "unit"
        ));
    }

    #[test]
    fn test_kind_mismatch_and_unknown_name() {
        assert!(matches!(
            element("kind = \"rect\"", "axis.text"),
            Err(ThemeError::ClassMismatch { .. })
        ));
        assert_eq!(
            element("size = 1", "axis.text.z"),
            Err(ThemeError::UnknownElement("axis.text.z".to_string()))
        );
        assert!(element("kind = \"blank\"\nsize = 1", "axis.text").is_err());
    }

    #[test]
    fn test_atomic_elements() {
        assert_eq!(
            element("value = 2\nunit = \"mm\"", "axis.ticks.length").unwrap(),
            Element::Unit(Unit::new(2.0, UnitKind::Mm))
        );
        assert_eq!(
            element("value = 1\nbottom = 0.5\nunit = \"lines\"", "plot.margin").unwrap(),
            Element::Margin(Margin::new(1.0, 1.0, 0.5, 1.0, UnitKind::Lines))
        );
        assert_eq!(
            element("value = \"bottom\"", "legend.position").unwrap(),
            Element::Setting("bottom".to_string())
        );
    }

    #[test]
    fn test_size_forms() {
        for (source, expected) in [
            ("size = 3", Size::Absolute(3.0)),
            ("size = { rel = 0.5 }", rel(0.5)),
            ("size = \"rel(2)\"", rel(2.0)),
        ] {
            let Ok(Element::Line(line)) = element(source, "axis.ticks") else {
                panic!("expected a line element for `{source}`");
            };
            assert_eq!(line.size(), Some(expected));
        }
    }
}
