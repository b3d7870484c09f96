//! Portfolio page projection.
//!
//! A single configuration document drives every piece of visible content:
//! load it, apply the stored theme, wire navigation and write the content
//! into the page's anchors. See [`app::boot`].

pub mod app;
pub mod cli;
pub mod content;
pub mod navigation;
pub mod page;
pub mod project;
pub mod sanitize;
pub mod settings;
pub mod theme;
