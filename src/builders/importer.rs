use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// A trait that defines the behavior for importing file-list entries from a
/// source.
///
/// The returned entries are merged into the configuration by
/// `ConfigManager::import_files`, which skips entries already listed.
pub trait FileListImporter {
    /// Imports file-list entries from a file.
    ///
    /// # Arguments
    /// * `path`: The path to the list file to be imported.
    ///
    /// # Returns
    /// A `Result<Vec<String>>` with the entries in the order they appear, or an
    /// error if the file cannot be read.
    fn import_from_file(&mut self, path: &Path) -> Result<Vec<String>>;
}

/// Imports a plain list file: one path per line.
///
/// Blank lines and lines starting with `#` are skipped, a leading `./` is
/// dropped, and repeated entries are kept only once.
pub struct ListFileImporter;

impl ListFileImporter {
    /// Creates a new `ListFileImporter`.
    pub fn new() -> Self {
        Self
    }

    /// Parses the content of a list file.
    ///
    /// # Arguments
    /// * `content`: The full text of the list file.
    ///
    /// # Returns
    /// The entries in order of first appearance, each trimmed and without a
    /// leading `./`.
    fn parse_list(&self, content: &str) -> Vec<String> {
        let mut entries: Vec<String> = Vec::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let entry = line.strip_prefix("./").unwrap_or(line).to_string();
            if !entries.contains(&entry) {
                entries.push(entry);
            }
        }
        entries
    }
}

impl Default for ListFileImporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Implementation of the `FileListImporter` trait for `ListFileImporter`.
impl FileListImporter for ListFileImporter {
    /// Reads the list file and parses it with `parse_list`.
    fn import_from_file(&mut self, path: &Path) -> Result<Vec<String>> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read import file {}", path.display()))?;
        Ok(self.parse_list(&content))
    }
}
