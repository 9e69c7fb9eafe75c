use anyhow::Result;
use log::{debug, info, warn};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::builders::classifier::{Category, Classifier, PathClassifier};
use crate::builders::injector::{Injector, WrapOutcome, WrapStatus};
use crate::builders::reporter::{FileEntry, FileOutcome, RunReport};
use crate::core::config::{ConfigManager, ConfigProvider, WrapConfig};
use crate::core::error::FileError;

/// Drives a run over the configured file list.
///
/// Files are handled one at a time in list order; each read-modify-write is
/// independent and a failure on one file never stops the others.
pub struct WrapEngine {
    config_manager: ConfigManager,
    config: WrapConfig,
    classifier: PathClassifier,
    injector: Injector,
}

impl WrapEngine {
    pub fn new(config_manager: ConfigManager) -> Result<Self> {
        let config = config_manager.load_config()?;
        let classifier = config.classifier();
        let injector = config.injector()?;

        Ok(Self {
            config_manager,
            config,
            classifier,
            injector,
        })
    }

    pub fn config(&self) -> &WrapConfig {
        &self.config
    }

    pub fn classify(&self, path: &str) -> Category {
        self.classifier.classify(path)
    }

    pub fn run(&self, dry_run: bool) -> RunReport {
        let mut report = RunReport::new(dry_run);
        info!(
            "processing {} file(s){}",
            self.config.files.len(),
            if dry_run { " (dry run)" } else { "" }
        );

        for file in &self.config.files {
            let entry = self.process_file(file, dry_run);
            if let Err(e) = &entry.result {
                warn!("{file}: {e}");
            }
            report.push(entry);
        }

        info!(
            "done: {} wrapped, {} already wrapped, {} failed",
            report.wrapped(),
            report.already_wrapped(),
            report.failed()
        );
        report
    }

    /// Classifies, wraps and (unless `dry_run`) rewrites a single entry.
    pub fn process_file(&self, file: &str, dry_run: bool) -> FileEntry {
        let category = self.classify(file);
        match self.process_as(file, category) {
            Ok(outcome) => {
                let result = self.commit(file, &outcome, dry_run);
                FileEntry {
                    path: file.to_string(),
                    category: Some(category),
                    anchor: outcome.anchor,
                    result,
                }
            }
            Err(e) => FileEntry {
                path: file.to_string(),
                category: None,
                anchor: None,
                result: Err(e),
            },
        }
    }

    /// Returns what wrapping `file` would produce without writing anything.
    pub fn preview(&self, file: &str) -> Result<WrapOutcome, FileError> {
        self.process_as(file, self.classify(file))
    }

    fn process_as(&self, file: &str, category: Category) -> Result<WrapOutcome, FileError> {
        let path = self.config_manager.resolve(file);
        if !path.exists() {
            return Err(FileError::MissingFile(path));
        }

        let text = fs::read_to_string(&path)?;
        debug!("{file}: category {category}");
        Ok(self.injector.process(&text, category))
    }

    fn commit(
        &self,
        file: &str,
        outcome: &WrapOutcome,
        dry_run: bool,
    ) -> Result<FileOutcome, FileError> {
        match outcome.status {
            WrapStatus::Wrapped => {
                if dry_run {
                    debug!("{file}: dry run, not writing");
                } else {
                    write_atomically(&self.config_manager.resolve(file), &outcome.text)?;
                }
                Ok(FileOutcome::Wrapped)
            }
            WrapStatus::AlreadyWrapped => Ok(FileOutcome::AlreadyWrapped),
            WrapStatus::NoRegionFound => Err(FileError::NoRegionFound),
            WrapStatus::UnbalancedDelimiters => Err(FileError::UnbalancedDelimiters {
                anchor: outcome.anchor.unwrap_or_default(),
            }),
        }
    }
}

/// Replaces the file at `path` with `content` through a temporary file in
/// the same directory, keeping the original permissions.
///
/// Symlinks are followed: the file they point to is rewritten and the link
/// itself is left in place.
fn write_atomically(path: &Path, content: &str) -> std::io::Result<()> {
    let target = fs::canonicalize(path)?;
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    let permissions = fs::metadata(&target)?.permissions();

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    fs::set_permissions(tmp.path(), permissions)?;
    tmp.persist(&target).map_err(|e| e.error)?;
    Ok(())
}
