//! Render code explanation markdown into themed HTML.

pub mod api;
mod config;
mod markdown;
pub mod page;
mod theme;

pub use api::{ExplanationRequest, explanation_from_response, extract_explanation};
pub use config::{Config, EngineArg};
pub use markdown::{Engine, LOADING_TEXT, MarkdownRenderer, Stage, escape_html, render};
pub use page::{PreviewOptions, preview_page};
pub use theme::Theme;
