//! Markdown rendering for code explanations.
//!
//! The default engine is an ordered regex substitution pipeline producing
//! the small tag set a basic HTML viewer understands. A CommonMark engine
//! backed by comrak is available for viewers that handle full output.

mod pipeline;
mod renderer;

pub use pipeline::{Stage, escape_html};
pub use renderer::{Engine, LOADING_TEXT, MarkdownRenderer, render};
