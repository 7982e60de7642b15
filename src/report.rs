//! User-facing progress reporting
//!
//! The workflow core reports through [`Reporter`] purely for observability;
//! nothing it reports feeds back into control flow.

use std::sync::Mutex;

/// Sink for user-facing workflow messages
pub trait Reporter: Send + Sync {
    fn warn(&self, message: &str);
    fn info(&self, message: &str);
    fn success(&self, message: &str);

    /// Announce step `index` (1-based) of `total`
    fn step(&self, index: usize, total: usize, description: &str);
}

/// Prints to the terminal. Warnings go to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter {
    quiet: bool,
}

impl ConsoleReporter {
    pub fn new(quiet: bool) -> Self {
        ConsoleReporter { quiet }
    }
}

impl Reporter for ConsoleReporter {
    fn warn(&self, message: &str) {
        tracing::debug!(%message, "reporting warning");
        eprintln!("warning: {}", message);
    }

    fn info(&self, message: &str) {
        if !self.quiet {
            println!("{}", message);
        }
    }

    fn success(&self, message: &str) {
        println!("✓ {}", message);
    }

    fn step(&self, index: usize, total: usize, description: &str) {
        if !self.quiet {
            println!("[{}/{}] {}", index, total, description);
        }
    }
}

/// A single recorded report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Warn(String),
    Info(String),
    Success(String),
    Step {
        index: usize,
        total: usize,
        description: String,
    },
}

/// Keeps every report in memory
#[derive(Debug, Default)]
pub struct RecordingReporter {
    reports: Mutex<Vec<Report>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, report: Report) {
        self.reports
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(report);
    }

    /// Snapshot of everything reported so far
    pub fn reports(&self) -> Vec<Report> {
        self.reports
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Only the warning messages
    pub fn warnings(&self) -> Vec<String> {
        self.reports()
            .into_iter()
            .filter_map(|r| match r {
                Report::Warn(message) => Some(message),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn warn(&self, message: &str) {
        self.push(Report::Warn(message.to_string()));
    }

    fn info(&self, message: &str) {
        self.push(Report::Info(message.to_string()));
    }

    fn success(&self, message: &str) {
        self.push(Report::Success(message.to_string()));
    }

    fn step(&self, index: usize, total: usize, description: &str) {
        self.push(Report::Step {
            index,
            total,
            description: description.to_string(),
        });
    }
}
