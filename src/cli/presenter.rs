//! CLI presenter for output formatting

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Mark spinner as success and finish
    pub fn spinner_success(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        }
    }

    /// Mark spinner as failed and finish
    pub fn spinner_fail(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✗".red(), message));
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message.red());
    }

    /// Print primary output to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair to stdout
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.bold(), value);
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}
