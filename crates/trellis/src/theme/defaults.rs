//! Built-in baseline themes.

use trellis_core::{
    color::Color,
    element::{
        Element, FontFace, LineElement, LineEnd, LineType, Margin, RectElement, TextElement, Unit,
        UnitKind, rel,
    },
};

use super::Theme;

fn color(name: &str) -> Color {
    Color::new(name).expect("built-in theme colors are valid")
}

fn line(line: LineElement) -> Element {
    Element::Line(line)
}

fn rect(rect: RectElement) -> Element {
    Element::Rect(rect)
}

fn text(text: TextElement) -> Element {
    Element::Text(text)
}

fn unit(value: f32, kind: UnitKind) -> Element {
    Element::Unit(Unit::new(value, kind))
}

fn setting(value: &str) -> Element {
    Element::Setting(value.to_string())
}

/// The default grey-panel theme.
///
/// Every root element of the built-in element tree is fully specified, so
/// each built-in element resolves against this theme without error.
///
/// # Arguments
///
/// * `base_size` - Base font size in points; other text sizes are relative to it
/// * `base_family` - Base font family, empty for the renderer's default
pub fn theme_grey(base_size: f32, base_family: &str) -> Theme {
    [
        (
            "line",
            line(
                LineElement::new()
                    .with_color(color("black"))
                    .with_size(0.5)
                    .with_linetype(LineType::Solid)
                    .with_lineend(LineEnd::Butt),
            ),
        ),
        (
            "rect",
            rect(
                RectElement::new()
                    .with_fill(color("white"))
                    .with_color(color("black"))
                    .with_size(0.5)
                    .with_linetype(LineType::Solid),
            ),
        ),
        (
            "text",
            text(
                TextElement::new()
                    .with_family(base_family)
                    .with_face(FontFace::Plain)
                    .with_color(color("black"))
                    .with_size(base_size)
                    .with_hjust(0.5)
                    .with_vjust(0.5)
                    .with_angle(0.0)
                    .with_lineheight(0.9),
            ),
        ),
        (
            "axis.text",
            text(TextElement::new().with_size(rel(0.8)).with_color(color("grey50"))),
        ),
        ("strip.text", text(TextElement::new().with_size(rel(0.8)))),
        ("axis.line", Element::Blank),
        ("axis.text.x", text(TextElement::new().with_vjust(1.0))),
        ("axis.text.y", text(TextElement::new().with_hjust(1.0))),
        ("axis.ticks", line(LineElement::new().with_color(color("grey50")))),
        ("axis.title.x", text(TextElement::new())),
        ("axis.title.y", text(TextElement::new().with_angle(90.0))),
        ("axis.ticks.length", unit(0.15, UnitKind::Cm)),
        ("axis.ticks.margin", unit(0.1, UnitKind::Cm)),
        (
            "legend.background",
            rect(RectElement::new().with_color(Color::transparent())),
        ),
        ("legend.margin", unit(0.2, UnitKind::Cm)),
        (
            "legend.key",
            rect(
                RectElement::new()
                    .with_fill(color("grey95"))
                    .with_color(color("white")),
            ),
        ),
        ("legend.key.size", unit(1.2, UnitKind::Lines)),
        ("legend.text", text(TextElement::new().with_size(rel(0.8)))),
        (
            "legend.title",
            text(
                TextElement::new()
                    .with_size(rel(0.8))
                    .with_face(FontFace::Bold)
                    .with_hjust(0.0),
            ),
        ),
        ("legend.position", setting("right")),
        ("legend.justification", setting("center")),
        (
            "panel.background",
            rect(
                RectElement::new()
                    .with_fill(color("grey90"))
                    .with_color(Color::transparent()),
            ),
        ),
        ("panel.border", Element::Blank),
        ("panel.grid.major", line(LineElement::new().with_color(color("white")))),
        (
            "panel.grid.minor",
            line(LineElement::new().with_color(color("grey95")).with_size(0.25)),
        ),
        ("panel.margin", unit(0.25, UnitKind::Lines)),
        (
            "strip.background",
            rect(
                RectElement::new()
                    .with_fill(color("grey80"))
                    .with_color(Color::transparent()),
            ),
        ),
        ("strip.text.x", text(TextElement::new())),
        ("strip.text.y", text(TextElement::new().with_angle(-90.0))),
        (
            "plot.background",
            rect(RectElement::new().with_color(color("white"))),
        ),
        ("plot.title", text(TextElement::new().with_size(rel(1.2)))),
        (
            "plot.margin",
            Element::Margin(Margin::new(1.0, 1.0, 0.5, 0.5, UnitKind::Lines)),
        ),
    ]
    .into_iter()
    .collect()
}

/// A white-panel variant of [`theme_grey`] with grey grid lines and a
/// panel border.
pub fn theme_bw(base_size: f32, base_family: &str) -> Theme {
    let overrides: Theme = [
        ("axis.text", text(TextElement::new().with_size(rel(0.8)))),
        ("axis.ticks", line(LineElement::new().with_color(color("black")))),
        ("legend.key", rect(RectElement::new().with_color(color("grey80")))),
        (
            "panel.background",
            rect(
                RectElement::new()
                    .with_fill(color("white"))
                    .with_color(Color::transparent()),
            ),
        ),
        (
            "panel.border",
            rect(
                RectElement::new()
                    .with_fill(Color::transparent())
                    .with_color(color("grey50")),
            ),
        ),
        (
            "panel.grid.major",
            line(LineElement::new().with_color(color("grey90")).with_size(0.2)),
        ),
        (
            "panel.grid.minor",
            line(LineElement::new().with_color(color("grey98")).with_size(0.5)),
        ),
        (
            "strip.background",
            rect(
                RectElement::new()
                    .with_fill(color("grey80"))
                    .with_color(color("grey50")),
            ),
        ),
    ]
    .into_iter()
    .collect();

    theme_grey(base_size, base_family) + overrides
}
