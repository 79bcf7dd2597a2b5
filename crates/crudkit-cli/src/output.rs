//! Terminal output for commands.
//!
//! Everything a command prints goes through [`OutputManager`], which applies
//! `--quiet`, `--no-color` and the resolved output format.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Kind of status line, each with its own marker and colour.
#[derive(Debug, Clone, Copy)]
enum Tone {
    Success,
    Warning,
    Info,
}

impl Tone {
    fn marker(self) -> &'static str {
        match self {
            Self::Success => "\u{2713}",
            Self::Warning => "\u{26a0}",
            Self::Info => "\u{2139}",
        }
    }

    fn paint(self, msg: &str) -> String {
        let marker = self.marker();
        match self {
            Self::Success => format!("{} {}", marker.green().bold(), msg.green()),
            Self::Warning => format!("{} {}", marker.yellow().bold(), msg.yellow()),
            Self::Info => format!("{} {}", marker.blue().bold(), msg.blue()),
        }
    }
}

pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let format = resolve_format(
            args.output_format,
            config.output.format,
            io::stdout().is_terminal(),
        );
        Self {
            format,
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color || format == OutputFormat::Plain,
            term: Term::stdout(),
        }
    }

    /// Plain line; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Success, msg)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Warning, msg)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Info, msg)
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        if self.no_color {
            self.term.write_line(text)
        } else {
            self.term.write_line(&text.cyan().bold().to_string())
        }
    }

    /// Numbered list entry: `  1. <msg>`.
    pub fn item(&self, index: usize, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("  {index}. {msg}")
        } else {
            format!("  {}. {msg}", index.dimmed())
        };
        self.term.write_line(&line)
    }

    /// Pretty-printed JSON. Written even in quiet mode.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::from)?;
        self.term.write_line(&text)
    }

    /// The resolved format, never `Auto`.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    fn status(&self, tone: Tone, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("{} {msg}", tone.marker())
        } else {
            tone.paint(msg)
        };
        self.term.write_line(&line)
    }
}

/// The flag wins unless it is `auto`, then the config; an `auto` left over
/// becomes `Human` on a terminal and `Plain` otherwise.
fn resolve_format(flag: OutputFormat, configured: OutputFormat, tty: bool) -> OutputFormat {
    match (flag, configured) {
        (OutputFormat::Auto, OutputFormat::Auto) if tty => OutputFormat::Human,
        (OutputFormat::Auto, OutputFormat::Auto) => OutputFormat::Plain,
        (OutputFormat::Auto, configured) => configured,
        (flag, _) => flag,
    }
}
