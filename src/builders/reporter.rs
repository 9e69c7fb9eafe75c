use colored::Colorize;

use crate::builders::classifier::Category;
use crate::core::error::FileError;

/// What a run did with a file that did not fail.
///
/// Failures (missing file, no region, unbalanced delimiters, I/O) are carried
/// as `FileError` instead, so every `Ok` in a `FileEntry` is one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// The wrapper was injected (or would have been, on a dry run).
    Wrapped,
    /// The file already carried the wrapper and was left untouched.
    AlreadyWrapped,
}

/// The result of processing one entry of the file list.
///
/// This provides a clean way to pass file-specific data from the `WrapEngine`
/// to the `StatusReporter`.
#[derive(Debug)]
pub struct FileEntry {
    /// The entry as written in the configuration.
    pub path: String,
    /// `None` when the file could not be read.
    pub category: Option<Category>,
    /// Byte offset of the anchor that was wrapped or failed to close.
    pub anchor: Option<usize>,
    /// Either what was done to the file or why nothing could be done.
    pub result: Result<FileOutcome, FileError>,
}

/// Aggregate of a whole run, in file-list order.
#[derive(Debug, Default)]
pub struct RunReport {
    /// One entry per configured file, in the order they were processed.
    pub entries: Vec<FileEntry>,
    /// Whether the run skipped all writes.
    pub dry_run: bool,
}

impl RunReport {
    /// Creates an empty report.
    ///
    /// # Arguments
    /// * `dry_run`: Whether the run this report describes writes files.
    pub fn new(dry_run: bool) -> Self {
        Self {
            entries: Vec::new(),
            dry_run,
        }
    }

    /// Appends the result for the next file of the list.
    pub fn push(&mut self, entry: FileEntry) {
        self.entries.push(entry);
    }

    /// Number of files that were (or, on a dry run, would be) wrapped.
    pub fn wrapped(&self) -> usize {
        self.count(|r| matches!(r, Ok(FileOutcome::Wrapped)))
    }

    /// Number of files skipped because they already carry the wrapper.
    pub fn already_wrapped(&self) -> usize {
        self.count(|r| matches!(r, Ok(FileOutcome::AlreadyWrapped)))
    }

    /// Number of files that failed for any reason.
    pub fn failed(&self) -> usize {
        self.count(|r| r.is_err())
    }

    fn count(&self, pred: impl Fn(&Result<FileOutcome, FileError>) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.result)).count()
    }
}

/// The `StatusReporter` trait decouples how a run is presented from how it
/// is performed. The engine only builds a `RunReport`; implementors decide
/// where and how it is shown.
pub trait StatusReporter {
    /// Presents a complete run: one line per file, then the totals.
    ///
    /// # Arguments
    /// * `report`: The report produced by `WrapEngine::run`.
    fn generate_run_report(&self, report: &RunReport);
}

/// A concrete implementation of `StatusReporter` that prints the report to
/// standard output.
///
/// This is the reporter used by the `run` command.
pub struct ConsoleReporter {
    verbose: bool,
}

impl ConsoleReporter {
    /// Constructs a new `ConsoleReporter`.
    ///
    /// # Arguments
    /// * `verbose`: When `true`, every line also shows the file's category
    ///   and the byte offset of its anchor.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// A private helper that formats the status line for a single file.
    ///
    /// ✅ marks a wrapped file, ✓ an already wrapped one, ⚠️ a missing file
    /// and ❌ any other failure.
    ///
    /// # Arguments
    /// * `entry`: The result for the file.
    /// * `dry_run`: Whether to phrase a wrap as "would wrap".
    ///
    /// # Returns
    /// The formatted, possibly colored, line.
    fn format_entry(&self, entry: &FileEntry, dry_run: bool) -> String {
        let line = match &entry.result {
            Ok(FileOutcome::Wrapped) if dry_run => {
                format!("✅ Would wrap: {}", entry.path).green().to_string()
            }
            Ok(FileOutcome::Wrapped) => format!("✅ Wrapped: {}", entry.path).green().to_string(),
            Ok(FileOutcome::AlreadyWrapped) => format!("✓  Already wrapped: {}", entry.path),
            Err(FileError::MissingFile(_)) => {
                format!("⚠️  File not found: {}", entry.path).yellow().to_string()
            }
            Err(e) => format!("❌ {}: {}", e, entry.path).red().to_string(),
        };

        if !self.verbose {
            return line;
        }
        let mut details = Vec::new();
        if let Some(category) = entry.category {
            details.push(format!("category={category}"));
        }
        if let Some(anchor) = entry.anchor {
            details.push(format!("anchor@{anchor}"));
        }
        if details.is_empty() {
            line
        } else {
            format!("{line} {}", format!("({})", details.join(", ")).dimmed())
        }
    }
}

/// Implementation of the `StatusReporter` trait for `ConsoleReporter`.
impl StatusReporter for ConsoleReporter {
    /// Prints every file line followed by the summary block. On a dry run the
    /// summary ends with a reminder that nothing was written.
    fn generate_run_report(&self, report: &RunReport) {
        for entry in &report.entries {
            println!("{}", self.format_entry(entry, report.dry_run));
        }

        println!("\n📊 {}", "Results:".bold());
        let label = if report.dry_run { "Would wrap" } else { "Wrapped" };
        println!("   ✅ {label}: {}", report.wrapped());
        println!("   ✓  Already wrapped: {}", report.already_wrapped());
        println!("   ⚠️  Errors: {}", report.failed());
        if report.dry_run {
            println!("\n{}", "Dry run: no files were written.".bright_blue());
        }
    }
}
