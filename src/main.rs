use anyhow::{Context, Result};
use codeexplain::{Config, MarkdownRenderer};
use std::fs;
use std::io::Write;
use tracing_subscriber::EnvFilter;

/// Resolves the markdown to render from raw input.
///
/// API response bodies yield their explanation field; when the field is
/// missing the extraction error text is rendered instead so the output
/// always shows what went wrong.
fn explanation_markdown(config: &Config, input: String) -> String {
    if !config.json {
        return input;
    }

    codeexplain::explanation_from_response(200, &input)
}

/// Produces the output document for the configured mode.
fn render_output(config: &Config, markdown: &str) -> String {
    if config.page {
        return codeexplain::preview_page(markdown, &config.preview_options());
    }

    MarkdownRenderer::with_engine(config.theme(), config.engine.into()).render(markdown)
}

fn main() -> Result<()> {
    let config = Config::parse();

    // --verbose enables INFO level, otherwise use RUST_LOG
    let filter = if config.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    config.validate().context("Invalid configuration")?;

    let input = config.read_input()?;
    let markdown = explanation_markdown(&config, input);
    let html = render_output(&config, &markdown);

    match &config.output {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent).context("Failed to create output directory")?;
            }
            fs::write(path, &html)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = html.len(), "wrote explanation");

            if config.should_open()
                && let Err(e) = open::that(path)
            {
                tracing::warn!(error = %e, "failed to open output in browser");
            }
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(html.as_bytes())
                .context("Failed to write HTML to standard output")?;
            stdout.flush().context("Failed to flush standard output")?;
        }
    }

    Ok(())
}
