//! Trellis Core Types and Definitions
//!
//! This crate provides the value types that Trellis themes are made of:
//!
//! - **Colors**: Color handling with CSS and grey-ramp support ([`color::Color`])
//! - **Elements**: Line, rect and text property bags, measurements, and the
//!   closed [`element::Element`] type with its pairwise merge ([`element`] module)

pub mod color;
pub mod element;
