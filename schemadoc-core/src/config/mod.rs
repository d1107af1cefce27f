//! Configuration types for rendering.
//!
//! This module contains all configuration structures used by formatters:
//! - `RenderOptions`: Section visibility, title, and diagram attributes
//! - `OutputFormat`: Target syntax of the rendered document
//!
//! Options are resolved once before a render pass and are never mutated by
//! a formatter, so one instance can be shared by concurrent passes.

mod format;
mod render;

pub use format::OutputFormat;
pub use render::{GraphvizAttributes, RenderOptions, default_graphviz_attributes};
