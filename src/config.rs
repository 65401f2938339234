//! Command line configuration.

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use std::io::Read;
use std::path::PathBuf;

use crate::markdown::Engine;
use crate::page::PreviewOptions;
use crate::Theme;

/// Input path meaning standard input.
const STDIN_PATH: &str = "-";

/// Markdown engine selectable from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum EngineArg {
    /// Ordered regex pipeline for basic HTML viewers
    #[default]
    Pipeline,
    /// Full CommonMark rendering
    Commonmark,
}

impl From<EngineArg> for Engine {
    fn from(arg: EngineArg) -> Self {
        match arg {
            EngineArg::Pipeline => Engine::Pipeline,
            EngineArg::Commonmark => Engine::CommonMark,
        }
    }
}

/// Command line configuration for codeexplain.
#[derive(Debug, Clone, Parser)]
#[command(name = "codeexplain", version, about, long_about = None)]
pub struct Config {
    /// Markdown input file, or "-" for standard input
    #[arg(default_value = STDIN_PATH)]
    pub input: PathBuf,

    /// Output file (standard output when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Render for a dark viewer theme
    #[arg(long)]
    pub dark: bool,

    /// Markdown engine
    #[arg(long, value_enum, default_value_t = EngineArg::Pipeline)]
    pub engine: EngineArg,

    /// Treat input as an explanation API response and render its explanation
    #[arg(long)]
    pub json: bool,

    /// Write a standalone preview page with embedded stylesheet
    #[arg(long)]
    pub page: bool,

    /// Add HTML source and original markdown panels to preview pages
    #[arg(
        long,
        env = "EXPLAINCODE_DEBUG",
        action = clap::ArgAction::SetTrue,
        value_parser = parse_flag
    )]
    pub debug: bool,

    /// Do not open the output file in a browser
    #[arg(long)]
    pub no_open: bool,

    /// Log progress at info level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the input file does not exist or debug panels are
    /// requested without a preview page.
    pub fn validate(&self) -> Result<()> {
        if !self.reads_stdin() && !self.input.exists() {
            bail!("Input file does not exist: {}", self.input.display());
        }

        if self.debug && !self.page {
            tracing::warn!("debug panels only appear in preview pages, pass --page to see them");
        }

        Ok(())
    }

    pub fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == STDIN_PATH
    }

    pub fn theme(&self) -> Theme {
        Theme::from_dark(self.dark)
    }

    pub fn preview_options(&self) -> PreviewOptions {
        PreviewOptions {
            theme: self.theme(),
            engine: self.engine.into(),
            debug: self.debug,
        }
    }

    /// Reads the raw input text from file or standard input.
    ///
    /// # Errors
    ///
    /// Returns error if the input cannot be read or is not valid UTF8.
    pub fn read_input(&self) -> Result<String> {
        if self.reads_stdin() {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read markdown from standard input")?;
            return Ok(content);
        }

        std::fs::read_to_string(&self.input)
            .with_context(|| format!("Failed to read input file: {}", self.input.display()))
    }

    /// Returns whether the written output should be opened in a browser.
    pub fn should_open(&self) -> bool {
        self.output.is_some() && !self.no_open
    }
}

/// Parses a boolean flag value the way the debug environment variable is
/// written: `true` in any case or `1` enables it, anything else disables it.
fn parse_flag(value: &str) -> Result<bool, std::convert::Infallible> {
    let value = value.trim();
    Ok(value.eq_ignore_ascii_case("true") || value == "1")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_args(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("codeexplain").chain(args.iter().copied()))
            .expect("Arguments should parse")
    }

    #[test]
    fn test_parse_flag_values() {
        assert_eq!(parse_flag("true"), Ok(true));
        assert_eq!(parse_flag(" TRUE "), Ok(true));
        assert_eq!(parse_flag("1"), Ok(true));
        assert_eq!(parse_flag("0"), Ok(false));
        assert_eq!(parse_flag("yes"), Ok(false));
        assert_eq!(parse_flag(""), Ok(false));
    }

    #[test]
    fn test_config_defaults() {
        // Arrange & Act
        let config = parse_args(&["notes.md"]);

        // Assert
        assert_eq!(config.input, PathBuf::from("notes.md"));
        assert_eq!(config.output, None);
        assert!(!config.dark);
        assert_eq!(config.engine, EngineArg::Pipeline);
        assert!(!config.json);
        assert!(!config.page);
        assert!(!config.no_open);
    }

    #[test]
    fn test_config_stdin_default() {
        let config = parse_args(&[]);

        assert!(config.reads_stdin());
        assert!(config.validate().is_ok(), "Standard input needs no file");
    }

    #[test]
    fn test_config_all_flags() {
        // Arrange & Act
        let config = parse_args(&[
            "in.md",
            "-o",
            "out.html",
            "--dark",
            "--engine",
            "commonmark",
            "--json",
            "--page",
            "--debug",
            "--no-open",
        ]);

        // Assert
        assert_eq!(config.output, Some(PathBuf::from("out.html")));
        assert_eq!(config.theme(), Theme::Dark);
        assert_eq!(Engine::from(config.engine), Engine::CommonMark);
        assert!(config.json);
        assert!(config.page);
        assert!(config.debug);
        assert!(!config.should_open());
    }

    #[test]
    fn test_preview_options_follow_flags() {
        // Arrange
        let config = parse_args(&["--dark", "--debug", "in.md"]);

        // Act
        let options = config.preview_options();

        // Assert
        assert_eq!(options.theme, Theme::Dark);
        assert_eq!(options.engine, Engine::Pipeline);
        assert!(options.debug);
    }

    #[test]
    fn test_debug_flag_takes_no_value() {
        // Arrange & Act
        let config = parse_args(&["--debug", "notes.md"]);

        // Assert
        assert_eq!(config.input, PathBuf::from("notes.md"));
        assert!(config.debug);
        assert!(!config.reads_stdin());
    }

    #[test]
    fn test_should_open_only_for_files() {
        assert!(!parse_args(&["in.md"]).should_open());
        assert!(parse_args(&["in.md", "-o", "out.html"]).should_open());
    }

    #[test]
    fn test_validate_missing_input() {
        // Arrange
        let config = parse_args(&["definitely/not/here.md"]);

        // Act
        let result = config.validate();

        // Assert
        assert!(result.is_err());
        assert!(
            result.unwrap_err().to_string().contains("does not exist"),
            "Error should name the problem"
        );
    }

    #[test]
    fn test_read_input_from_file() -> Result<()> {
        // Arrange
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join("explain.md");
        std::fs::write(&path, "# Explained")?;
        let config = parse_args(&[path.to_str().expect("Temp path should be UTF8")]);

        // Act
        let content = config.read_input()?;

        // Assert
        assert_eq!(content, "# Explained");
        Ok(())
    }
}
