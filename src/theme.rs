//! Viewer color themes.

/// Inline body style applied to dark documents.
pub const DARK_BODY_STYLE: &str = "background-color: #2b2b2b; color: #a9b7c6;";

const COMMON_RULES: &[&str] = &[
    "body { font-family: sans-serif; font-size: 12pt; margin: 10px; }",
    "h1, h2, h3, h4, h5, h6 { margin: 8px; }",
    "p { margin: 8px; }",
    "ul, ol { margin: 4px; }",
];

const DARK_RULES: &[&str] = &[
    "body { background-color: #2b2b2b; color: #a9b7c6; }",
    "pre { background-color: #2d2d2d; color: #f8f8f2; padding: 10px; font-family: monospace; }",
    "code { background-color: #2d2d2d; color: #f8f8f2; padding: 2px 4px; font-family: monospace; }",
    "a { color: #589df6; }",
    "h1, h2, h3, h4, h5, h6 { color: #d0d0ff; }",
];

const LIGHT_RULES: &[&str] = &[
    "body { background-color: #ffffff; color: #000000; }",
    "pre { background-color: #f5f5f5; color: #000000; padding: 10px; font-family: monospace; }",
    "code { background-color: #f5f5f5; color: #000000; padding: 2px 4px; font-family: monospace; }",
    "a { color: #0366d6; }",
    "h1, h2, h3, h4, h5, h6 { color: #000000; }",
];

/// Color theme of the viewer that displays rendered explanations.
///
/// The theme is owned by the caller's UI layer. Only the body inline style
/// is part of the rendered document; the stylesheet is offered for viewers
/// that accept one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Maps the caller's dark theme flag to a theme.
    pub fn from_dark(dark: bool) -> Self {
        if dark { Theme::Dark } else { Theme::Light }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// Returns the inline style for the `<body>` tag, if any.
    ///
    /// Light documents use the viewer's default body colors.
    pub fn body_style(self) -> Option<&'static str> {
        match self {
            Theme::Dark => Some(DARK_BODY_STYLE),
            Theme::Light => None,
        }
    }

    /// Returns the opening `<html><body>` tags for this theme.
    pub fn document_open(self) -> String {
        match self.body_style() {
            Some(style) => format!("<html><body style=\"{style}\">"),
            None => "<html><body>".to_string(),
        }
    }

    /// Returns stylesheet rules for pre, code, link and header colors.
    ///
    /// Common layout rules come first so the theme rules override the
    /// shared body declaration.
    pub fn stylesheet(self) -> String {
        let theme_rules = match self {
            Theme::Dark => DARK_RULES,
            Theme::Light => LIGHT_RULES,
        };
        COMMON_RULES
            .iter()
            .chain(theme_rules)
            .copied()
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<bool> for Theme {
    fn from(dark: bool) -> Self {
        Self::from_dark(dark)
    }
}
