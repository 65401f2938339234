//! Ordered regex substitution pipeline for explanation markdown.
//!
//! Each [`Stage`] rewrites the cumulative output of the stages before it.
//! Later patterns rely on earlier ones having run: escaping must precede
//! every tag-producing stage, and bold must consume `**` before italic sees
//! a lone `*`. [`Stage::ALL`] is the single source of that ordering.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

static HEADER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^(#{1,6}) (.*)$").unwrap());

static BOLD_STARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static BOLD_UNDERSCORES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"__(.*?)__").unwrap());

static ITALIC_STAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static ITALIC_UNDERSCORE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_(.*?)_").unwrap());

static FENCED_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```(.*?)```").unwrap());

// Empty spans are not code: a dangling fence must stay literal.
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());

static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(?:- |\* |[0-9]+\. )(.*)$").unwrap());

static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").unwrap());

static EMPTY_PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<p>\s*</p>").unwrap());

/// One step of the markdown to HTML pipeline.
///
/// Stages are applied once each, in [`Stage::ALL`] order, never recursively.
/// A construct that does not match its stage pattern passes through as
/// literal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Normalizes CRLF line endings and escapes `&`, `<` and `>`.
    Escape,
    /// `# text` through `###### text` become `<h1>` through `<h6>`.
    Headers,
    /// `**text**` and `__text__` become `<strong>`.
    Bold,
    /// `*text*` and `_text_` become `<em>`.
    Italic,
    /// Triple backtick spans become `<pre><code>`.
    FencedCode,
    /// Single backtick spans become `<code>`.
    InlineCode,
    /// `- `, `* ` and `N. ` lines become `<li>`.
    ListItems,
    /// Runs of consecutive `<li>` lines are wrapped in one `<ul>`.
    ListWrap,
    /// `[label](url)` becomes `<a href="url">label</a>`.
    ///
    /// Quotes are not escaped, so a URL containing `"` can close the `href`
    /// attribute early. Output is only safe for viewers that do not run
    /// script or event handler attributes.
    Links,
    /// Untagged lines become `<p>`.
    Paragraphs,
    /// Drops empty paragraphs and paragraphs wrapped around list items.
    Cleanup,
}

impl Stage {
    /// Every stage in application order.
    pub const ALL: [Stage; 11] = [
        Stage::Escape,
        Stage::Headers,
        Stage::Bold,
        Stage::Italic,
        Stage::FencedCode,
        Stage::InlineCode,
        Stage::ListItems,
        Stage::ListWrap,
        Stage::Links,
        Stage::Paragraphs,
        Stage::Cleanup,
    ];

    /// Returns the one-based position of this stage in [`Stage::ALL`].
    pub fn number(self) -> usize {
        Self::ALL
            .iter()
            .position(|stage| *stage == self)
            .map_or(0, |index| index + 1)
    }

    /// Returns a short lowercase name for logging.
    pub fn name(self) -> &'static str {
        match self {
            Stage::Escape => "escape",
            Stage::Headers => "headers",
            Stage::Bold => "bold",
            Stage::Italic => "italic",
            Stage::FencedCode => "fenced-code",
            Stage::InlineCode => "inline-code",
            Stage::ListItems => "list-items",
            Stage::ListWrap => "list-wrap",
            Stage::Links => "links",
            Stage::Paragraphs => "paragraphs",
            Stage::Cleanup => "cleanup",
        }
    }

    /// Applies this stage to the output of the previous one.
    ///
    /// # Arguments
    ///
    /// * `input`: Cumulative pipeline output so far
    ///
    /// # Returns
    ///
    /// Rewritten text; unchanged when nothing matched
    pub fn apply(self, input: &str) -> String {
        match self {
            Stage::Escape => escape_html(&input.replace("\r\n", "\n")),
            Stage::Headers => HEADER
                .replace_all(input, |caps: &Captures<'_>| {
                    let level = caps[1].len();
                    format!("<h{level}>{}</h{level}>", &caps[2])
                })
                .into_owned(),
            Stage::Bold => {
                let html = BOLD_STARS.replace_all(input, "<strong>${1}</strong>");
                chain(html, &BOLD_UNDERSCORES, "<strong>${1}</strong>")
            }
            Stage::Italic => {
                let html = ITALIC_STAR.replace_all(input, "<em>${1}</em>");
                chain(html, &ITALIC_UNDERSCORE, "<em>${1}</em>")
            }
            Stage::FencedCode => FENCED_CODE
                .replace_all(input, |caps: &Captures<'_>| {
                    format!("<pre><code>{}</code></pre>", caps[1].trim())
                })
                .into_owned(),
            Stage::InlineCode => INLINE_CODE
                .replace_all(input, "<code>${1}</code>")
                .into_owned(),
            Stage::ListItems => LIST_ITEM.replace_all(input, "<li>${1}</li>").into_owned(),
            Stage::ListWrap => wrap_list_runs(input),
            Stage::Links => LINK
                .replace_all(input, "<a href=\"${2}\">${1}</a>")
                .into_owned(),
            Stage::Paragraphs => wrap_paragraphs(input),
            Stage::Cleanup => EMPTY_PARAGRAPH
                .replace_all(input, "")
                .replace("<p><li>", "<li>")
                .replace("</li></p>", "</li>"),
        }
    }
}

/// Runs every stage over the markdown and returns the HTML body content.
pub fn run(markdown: &str) -> String {
    Stage::ALL.iter().fold(markdown.to_string(), |html, stage| {
        let next = stage.apply(&html);
        tracing::trace!(
            stage = stage.name(),
            number = stage.number(),
            len = next.len(),
            "applied markdown stage"
        );
        next
    })
}

/// Escapes the three characters that could open or close a tag.
///
/// `&` goes first so the entities introduced for `<` and `>` are not
/// escaped a second time.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn chain(html: Cow<'_, str>, pattern: &Regex, replacement: &str) -> String {
    pattern.replace_all(&html, replacement).into_owned()
}

fn is_list_item(line: &str) -> bool {
    line.starts_with("<li>") && line.ends_with("</li>")
}

/// Joins each maximal run of list item lines into a single `<ul>` line.
fn wrap_list_runs(input: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut run = String::new();

    for line in input.split('\n') {
        if is_list_item(line) {
            run.push_str(line);
            continue;
        }
        if !run.is_empty() {
            lines.push(format!("<ul>{run}</ul>"));
            run.clear();
        }
        lines.push(line.to_string());
    }
    if !run.is_empty() {
        lines.push(format!("<ul>{run}</ul>"));
    }

    lines.join("\n")
}

fn wrap_paragraphs(input: &str) -> String {
    input
        .split('\n')
        .map(|line| {
            if line.is_empty() || line.starts_with('<') {
                line.to_string()
            } else {
                format!("<p>{line}</p>")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
