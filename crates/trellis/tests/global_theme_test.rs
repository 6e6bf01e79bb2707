//! The process-wide theme accessors.
//!
//! Kept in its own test binary: the global context is shared by every test
//! in a process.

use trellis::{
    color::Color,
    context::{ThemeContext, theme_get, theme_set, theme_update},
    element::{Element, LineElement},
    theme::{Theme, theme_bw, theme_grey},
};

#[test]
fn test_global_theme_round_trip() {
    assert_eq!(theme_get(), theme_grey(12.0, ""));

    let previous = theme_set(theme_bw(12.0, ""));
    assert_eq!(previous, theme_grey(12.0, ""));

    let delta: Theme = [(
        "axis.ticks",
        Element::Line(LineElement::new().with_color(Color::new("red").unwrap())),
    )]
    .into_iter()
    .collect();
    let previous = theme_update(&delta).unwrap();
    assert_eq!(previous, theme_bw(12.0, ""));

    let Ok(Element::Line(ticks)) = ThemeContext::global().resolve("axis.ticks.x") else {
        panic!("expected a line element");
    };
    assert_eq!(ticks.color(), Some(Color::new("red").unwrap()));

    // Restore for anything else sharing the process.
    theme_set(previous);
    assert_eq!(ThemeContext::global().baseline(), &theme_grey(12.0, ""));
}
