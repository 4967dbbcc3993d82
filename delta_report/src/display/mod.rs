//! Entry display resolution
//!
//! Maps a delta's `(flag, element type)` pair to a `RenderStrategy` and turns
//! the entry into escaped locator text.

pub mod escape;
pub mod locator;
pub mod strategy;

pub use escape::html_escape;
pub use locator::{render_locator, DisplayResolver};
pub use strategy::{select_strategy, RenderStrategy};
