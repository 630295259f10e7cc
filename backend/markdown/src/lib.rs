//! Model Response Formatting and Renderers
//!
//! Converts raw text from a local language model into display-safe HTML:
//! fenced and inline code, math, tables, lists, step-by-step sections, key
//! terms and definitions. Also renders web-search references and complete
//! chat message containers.

mod blocks;
mod code_block;
pub mod escape;
pub mod formatter;
mod inline;
pub mod ir;
mod math;
pub mod renderer;

pub use escape::escape_html;
pub use formatter::{format_response, FormatOptions, Formatter};
pub use ir::{InlineStore, Node, Segment};
pub use renderer::{time_label, Renderer, NO_RESULTS_TEXT, SEARCH_HEADING};
