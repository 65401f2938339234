//! Themed markdown to HTML document rendering.

use comrak::Options;

use super::pipeline;
use crate::Theme;

/// Placeholder text shown while an explanation request is in flight.
pub const LOADING_TEXT: &str = "Loading explanation...";

/// Markdown conversion backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Engine {
    /// Ordered regex substitution pipeline.
    #[default]
    Pipeline,
    /// CommonMark parser backed by comrak.
    CommonMark,
}

impl Engine {
    pub fn name(self) -> &'static str {
        match self {
            Engine::Pipeline => "pipeline",
            Engine::CommonMark => "commonmark",
        }
    }
}

/// Renders explanation markdown to HTML documents for a simple viewer.
///
/// Output is always a single `<html><body>` document. The body carries an
/// inline dark style when the theme is dark and no style otherwise.
/// Rendering never fails: markdown that does not match a construct is
/// emitted as escaped literal text.
pub struct MarkdownRenderer<'a> {
    theme: Theme,
    engine: Engine,
    options: Options<'a>,
}

impl<'a> MarkdownRenderer<'a> {
    /// Creates pipeline renderer for the given theme.
    pub fn new(theme: Theme) -> Self {
        Self::with_engine(theme, Engine::Pipeline)
    }

    /// Creates renderer using the given conversion engine.
    ///
    /// The CommonMark engine keeps raw HTML disabled so embedded tags are
    /// never passed through to the viewer.
    ///
    /// # Arguments
    ///
    /// * `theme`: Viewer theme selecting the body style
    /// * `engine`: Markdown conversion backend
    pub fn with_engine(theme: Theme, engine: Engine) -> Self {
        let mut options = Options::default();
        options.render.unsafe_ = false;

        Self {
            theme,
            engine,
            options,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn engine(&self) -> Engine {
        self.engine
    }

    /// Renders markdown to a complete HTML document.
    ///
    /// # Arguments
    ///
    /// * `markdown`: Markdown text; empty input yields an empty body
    ///
    /// # Returns
    ///
    /// HTML document wrapped in `<html><body>`
    pub fn render(&self, markdown: &str) -> String {
        let body = self.render_body(markdown);
        self.wrap_document(&body)
    }

    /// Renders markdown to body content without the document wrapper.
    pub fn render_body(&self, markdown: &str) -> String {
        tracing::debug!(
            engine = self.engine.name(),
            dark = self.theme.is_dark(),
            len = markdown.len(),
            "rendering markdown"
        );

        if markdown.is_empty() {
            return String::new();
        }

        match self.engine {
            Engine::Pipeline => pipeline::run(markdown),
            Engine::CommonMark => comrak::markdown_to_html(markdown, &self.options),
        }
    }

    /// Returns the themed placeholder document shown before an explanation
    /// arrives.
    pub fn loading_document(&self) -> String {
        self.wrap_document(LOADING_TEXT)
    }

    /// Wraps body content in the themed `<html><body>` document.
    pub fn wrap_document(&self, body: &str) -> String {
        let open = self.theme.document_open();
        let mut html = String::with_capacity(open.len() + body.len() + 14);
        html.push_str(&open);
        html.push_str(body);
        html.push_str("</body></html>");
        html
    }
}

impl<'a> Default for MarkdownRenderer<'a> {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

/// Renders markdown to an HTML document with the pipeline engine.
///
/// Absent markdown renders the same as empty markdown: an empty body.
///
/// # Arguments
///
/// * `markdown`: Markdown text, or `None`
/// * `dark_theme`: Whether the viewer uses a dark theme
///
/// # Returns
///
/// HTML document; the body is styled only for dark themes
pub fn render(markdown: Option<&str>, dark_theme: bool) -> String {
    MarkdownRenderer::new(Theme::from_dark(dark_theme)).render(markdown.unwrap_or_default())
}
