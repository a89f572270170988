//! Colored terminal output for pipeline progress.

use owo_colors::OwoColorize;

/// User-facing progress lines, separate from the `log` diagnostics.
#[derive(Clone, Copy, Debug)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Create a new output manager.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Plain informational line.
    pub fn info(&self, message: &str) {
        if !self.quiet {
            println!("{}", message);
        }
    }

    /// Step announcement with the arrow prefix.
    pub fn progress(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", "==>".green(), message);
        }
    }

    /// Success line.
    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{}", message.green());
        }
    }

    /// Warning line on stderr.
    pub fn warn(&self, message: &str) {
        if !self.quiet {
            eprintln!("{}", message.yellow());
        }
    }

    /// Error line on stderr.
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "[Error]".red(), message);
    }

    /// Indented detail line, shown only in verbose mode.
    pub fn indent(&self, message: &str) {
        if self.verbose && !self.quiet {
            println!("    {}", message);
        }
    }
}
