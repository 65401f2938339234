//! Standalone preview page for rendered explanations.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::markdown::{Engine, MarkdownRenderer};
use crate::Theme;

/// Options for building a preview page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreviewOptions {
    pub theme: Theme,
    pub engine: Engine,
    /// Appends the generated HTML source and the original markdown.
    pub debug: bool,
}

/// Builds a complete HTML page showing the rendered explanation.
///
/// The page embeds the theme stylesheet so it displays the same way the
/// viewer would style the bare document. Debug pages carry two extra
/// sections with the generated document source and the input markdown.
///
/// # Arguments
///
/// * `markdown`: Explanation markdown
/// * `options`: Theme, engine and debug settings
///
/// # Returns
///
/// HTML page as string
pub fn preview_page(markdown: &str, options: &PreviewOptions) -> String {
    let renderer = MarkdownRenderer::with_engine(options.theme, options.engine);
    let body = renderer.render_body(markdown);

    let debug_panels = options
        .debug
        .then(|| source_panels(&renderer.wrap_document(&body), markdown));

    page_wrapper(options.theme, &body, debug_panels).into_string()
}

fn page_wrapper(theme: Theme, body: &str, debug_panels: Option<Markup>) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Code Explanation" }
                style { (PreEscaped(theme.stylesheet())) }
            }
            body style=[theme.body_style()] {
                section class="explanation" {
                    (PreEscaped(body))
                }
                @if let Some(panels) = debug_panels {
                    (panels)
                }
            }
        }
    }
}

fn source_panels(document: &str, markdown: &str) -> Markup {
    html! {
        details class="html-source" {
            summary { "HTML Source" }
            pre { code { (document) } }
        }
        details class="original-markdown" {
            summary { "Original Markdown" }
            pre { code { (markdown) } }
        }
    }
}
