//! Report renderer
//!
//! Walks a completed `DeltaReport` in ordinal component order and emits the
//! message templates for each section.

pub mod renderer;
pub mod stats;

pub use renderer::{compare_entries, render, RenderOptions, RenderedReport, ReportRenderer};
pub use stats::RenderStats;
