//! Trellis - Theme element inheritance and position adjustment for declarative plots.
//!
//! A plot's look is described by a [`Theme`](theme::Theme): a map from element
//! names such as `axis.text.x` or `panel.background` to partial element
//! specifications. Elements inherit every property they leave unset from
//! their parents in the [`ElementTree`](tree::ElementTree), and
//! [`calc_element`] returns the fully resolved element a renderer draws with.
//!
//! The crate also provides the stack and fill [`position`] adjustments used
//! for grouped bar and area data.
//!
//! # Example
//!
//! ```
//! use trellis::{calc_element, element::Element, theme::{Theme, theme_grey}};
//!
//! let mut overrides = Theme::new();
//! overrides.insert("panel.grid.minor", Element::Blank);
//!
//! let theme = (theme_grey(12.0, "") | overrides).unwrap();
//!
//! assert_eq!(calc_element("panel.grid.minor.x", &theme).unwrap(), Element::Blank);
//! assert!(matches!(calc_element("panel.grid.major.x", &theme), Ok(Element::Line(_))));
//! ```

pub mod config;
pub mod context;
pub mod position;
pub mod theme;
pub mod tree;

mod error;
mod resolve;

pub use trellis_core::{color, element};

pub use error::{PositionError, ThemeError, TrellisError};
pub use resolve::{Resolver, calc_element};
