//! UI module for the novella front end.

pub mod render;
pub mod theme;

pub use render::render;
pub use theme::Theme;
