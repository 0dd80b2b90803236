//! CLI presenter for output formatting

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::wizard::{Step, ALL_STEPS};

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
    is_spinner_active: Arc<AtomicBool>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self {
            spinner: None,
            is_spinner_active: Arc::new(AtomicBool::new(false)),
        }
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
        self.is_spinner_active.store(true, Ordering::SeqCst);
    }

    /// Mark spinner as success and finish
    pub fn spinner_success(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        }
        self.is_spinner_active.store(false, Ordering::SeqCst);
    }

    /// Mark spinner as failed and finish
    pub fn spinner_fail(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✗".red(), message));
        }
        self.is_spinner_active.store(false, Ordering::SeqCst);
    }

    /// Stop spinner without status
    pub fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
        self.is_spinner_active.store(false, Ordering::SeqCst);
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout (documents, hashes, config values)
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Output text to stdout without newline
    pub fn output_inline(&self, text: &str) {
        print!("{}", text);
        let _ = io::stdout().flush();
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Print a screen heading
    pub fn heading(&self, text: &str) {
        eprintln!();
        eprintln!("{}", text.bold());
        eprintln!("{}", "─".repeat(text.chars().count()).dimmed());
    }

    /// Render the step indicator: completed steps plain, the current one
    /// highlighted, future ones dimmed. The terminal step is not shown,
    /// matching the flow's final screen.
    pub fn step_indicator(&self, current: Step) {
        let line = ALL_STEPS
            .iter()
            .filter(|step| !step.is_terminal())
            .map(|step| {
                let label = format!("{} {}", step.number(), step.short_label());
                if *step == current {
                    label.blue().bold().to_string()
                } else if *step < current {
                    label.normal().to_string()
                } else {
                    label.dimmed().to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" › ");
        eprintln!();
        eprintln!("{}", line);
    }

    /// Print one labelled value of a review list
    pub fn review_item(&self, label: &str, value: &str, edit_step: Step) {
        eprintln!(
            "  {:<32} {}  {}",
            label.dimmed(),
            if value.is_empty() { "Not provided" } else { value },
            format!("[edit: step {}]", edit_step.number()).dimmed()
        );
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}
