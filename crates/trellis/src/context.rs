//! The current theme.
//!
//! A [`ThemeContext`] holds the theme plots are built with together with the
//! baseline it started from. Hosts create one and pass it to plot-building
//! code; [`ThemeContext::global`] and the `theme_*` functions give a
//! process-wide default for the top level of an application.
//!
//! # Thread Safety
//!
//! The current theme sits behind one `Mutex`. Every read, replace and update
//! takes the lock once, and [`ThemeContext::resolve`] works on a snapshot, so
//! a resolution never observes a half-applied update.

use std::sync::{Mutex, OnceLock};

use log::{debug, warn};

use trellis_core::element::Element;

use crate::{
    error::ThemeError,
    resolve::calc_element,
    theme::{Theme, theme_grey},
};

/// Process-wide default context, seeded with [`theme_grey`].
static GLOBAL_CONTEXT: OnceLock<ThemeContext> = OnceLock::new();

/// A baseline theme and the current theme derived from it.
#[derive(Debug)]
pub struct ThemeContext {
    baseline: Theme,
    current: Mutex<Theme>,
}

impl ThemeContext {
    /// Creates a context whose current theme starts as `baseline`.
    pub fn new(baseline: Theme) -> Self {
        Self {
            current: Mutex::new(baseline.clone()),
            baseline,
        }
    }

    /// Returns the process-wide context.
    pub fn global() -> &'static Self {
        GLOBAL_CONTEXT.get_or_init(|| Self::new(theme_grey(12.0, "")))
    }

    /// The theme this context was created with.
    pub fn baseline(&self) -> &Theme {
        &self.baseline
    }

    /// Returns a snapshot of the current theme.
    pub fn current(&self) -> Theme {
        self.lock().clone()
    }

    /// Replaces the current theme wholesale and returns the previous one.
    ///
    /// Logs a single warning naming every baseline element the new theme
    /// lacks. The replacement still happens; a partial theme may be
    /// intentional.
    pub fn set(&self, theme: Theme) -> Theme {
        let missing = theme.missing_from(&self.baseline);
        if !missing.is_empty() {
            warn!(
                missing_count = missing.len();
                "New theme is missing elements: {}",
                missing.join(", ")
            );
        }

        let previous = std::mem::replace(&mut *self.lock(), theme);
        debug!(elements_count = previous.len(); "Current theme replaced");
        previous
    }

    /// Update-combines `delta` onto the current theme and returns the
    /// previous one.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::TypeMismatch`] if an entry of `delta` cannot be
    /// merged; the current theme is left unchanged.
    pub fn update(&self, delta: &Theme) -> Result<Theme, ThemeError> {
        let mut current = self.lock();
        let updated = current.update(delta)?;
        let previous = std::mem::replace(&mut *current, updated);
        debug!(updated = delta.len(); "Current theme updated");
        Ok(previous)
    }

    /// Resolves `name` against a snapshot of the current theme.
    pub fn resolve(&self, name: &str) -> Result<Element, ThemeError> {
        let snapshot = self.current();
        calc_element(name, &snapshot)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Theme> {
        self.current.lock().expect("Failed to acquire theme lock")
    }
}

impl Default for ThemeContext {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

/// Returns a snapshot of the process-wide current theme.
pub fn theme_get() -> Theme {
    ThemeContext::global().current()
}

/// Replaces the process-wide current theme, returning the previous one.
pub fn theme_set(theme: Theme) -> Theme {
    ThemeContext::global().set(theme)
}

/// Update-combines `delta` onto the process-wide current theme, returning
/// the previous one.
pub fn theme_update(delta: &Theme) -> Result<Theme, ThemeError> {
    ThemeContext::global().update(delta)
}

#[cfg(test)]
mod tests {
    use trellis_core::{
        color::Color,
        element::{LineElement, RectElement},
    };

    use super::*;

    fn red_fill() -> Theme {
        [(
            "panel.background",
            Element::Rect(RectElement::new().with_fill(Color::new("red").unwrap())),
        )]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_set_returns_previous() {
        let context = ThemeContext::default();
        let replacement = theme_grey(20.0, "serif");

        let previous = context.set(replacement.clone());

        assert_eq!(previous, theme_grey(12.0, ""));
        assert_eq!(context.current(), replacement);
        assert_eq!(context.baseline(), &theme_grey(12.0, ""));
    }

    #[test]
    fn test_update_merges_properties() {
        let context = ThemeContext::default();
        let previous = context.update(&red_fill()).unwrap();
        assert_eq!(previous, Theme::default());

        let Ok(Element::Rect(rect)) = context.resolve("panel.background") else {
            panic!("expected a rect element");
        };
        assert_eq!(rect.fill(), Some(Color::new("red").unwrap()));
        assert_eq!(rect.color(), Some(Color::transparent()));
    }

    #[test]
    fn test_failed_update_leaves_theme_unchanged() {
        let context = ThemeContext::default();
        let delta: Theme = [("panel.background", Element::Line(LineElement::new()))]
            .into_iter()
            .collect();

        assert!(context.update(&delta).is_err());
        assert_eq!(context.current(), Theme::default());
    }

    #[test]
    fn test_resolve_uses_current_theme() {
        let context = ThemeContext::default();
        context.set(Theme::new());
        assert!(matches!(
            context.resolve("axis.text"),
            Err(ThemeError::IncompleteElement { .. })
        ));
    }
}
