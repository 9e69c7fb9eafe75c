use anyhow::Result;
use regex::Regex;
use std::collections::HashSet;
use std::path::PathBuf;

use crate::builders::classifier::CategoryRule;
use crate::builders::injector::WrapTemplate;
use crate::builders::locator::AnchorSettings;
use crate::core::config::{self, WrapConfig};

/// The `ConfigValidator` trait defines the public interface for validating a
/// wrap configuration before it is used for a run.
///
/// Validators only report problems; they never modify the configuration.
pub trait ConfigValidator {
    /// Performs a full validation of the `WrapConfig` and returns a list of
    /// issues found.
    ///
    /// # Arguments
    /// * `config`: The `WrapConfig` to be validated.
    ///
    /// # Returns
    /// A `Result<Vec<String>>` containing one human-readable string per issue.
    /// An empty vector means the configuration is usable.
    fn validate_config(&self, config: &WrapConfig) -> Result<Vec<String>>;

    /// Validates the category rule table on its own.
    ///
    /// # Arguments
    /// * `rules`: The ordered rules, as they will be evaluated by the classifier.
    ///
    /// # Returns
    /// A vector of strings, each describing a problem with one rule.
    fn validate_rules(&self, rules: &[CategoryRule]) -> Vec<String>;
}

/// The `StandardValidator` is a concrete implementation of `ConfigValidator`.
///
/// It checks the configuration against the workspace it will run in: listed
/// files must exist under `repo_root`, and the rule table, anchor and wrapper
/// must be usable.
pub struct StandardValidator {
    repo_root: PathBuf,
}

impl StandardValidator {
    /// Creates a new instance of `StandardValidator`.
    ///
    /// # Arguments
    /// * `repo_root`: The directory configured file paths are relative to.
    pub fn new(repo_root: PathBuf) -> Self {
        Self { repo_root }
    }

    /// Checks if a configured file exists under the workspace root.
    ///
    /// # Arguments
    /// * `file_path`: The entry as written in the file list.
    ///
    /// # Returns
    /// `true` if the file exists, `false` otherwise.
    fn check_file_exists(&self, file_path: &str) -> bool {
        self.repo_root.join(file_path).exists()
    }

    /// Checks the anchor settings.
    ///
    /// The pattern must compile, and the delimiters must differ or no scan can
    /// ever close.
    ///
    /// # Arguments
    /// * `anchor`: The anchor pattern and delimiter pair.
    ///
    /// # Returns
    /// A vector of issues, empty when the anchor is usable.
    fn check_anchor(&self, anchor: &AnchorSettings) -> Vec<String> {
        let mut issues = Vec::new();

        if let Err(e) = Regex::new(&anchor.pattern) {
            issues.push(format!("Invalid anchor pattern '{}': {}", anchor.pattern, e));
        }
        if anchor.open == anchor.close {
            issues.push(format!(
                "Opening and closing delimiters are both '{}'",
                anchor.open
            ));
        }
        issues
    }

    /// Checks that every name the wrapper renders is a valid identifier and
    /// that the two pass-through names differ.
    ///
    /// # Arguments
    /// * `wrapper`: The wrapper template.
    ///
    /// # Returns
    /// A vector of issues, empty when the wrapper is usable.
    fn check_wrapper(&self, wrapper: &WrapTemplate) -> Vec<String> {
        let mut issues = Vec::new();

        if !is_identifier(&wrapper.component) {
            issues.push(format!(
                "Wrapper component '{}' is not a valid element name",
                wrapper.component
            ));
        }
        if !is_identifier(&wrapper.role_attribute) {
            issues.push(format!(
                "Role attribute '{}' is not a valid attribute name",
                wrapper.role_attribute
            ));
        }
        for name in &wrapper.pass_through {
            if !is_identifier(name) {
                issues.push(format!("Pass-through identifier '{name}' is not valid"));
            }
        }
        if wrapper.pass_through[0] == wrapper.pass_through[1] {
            issues.push(format!(
                "Pass-through identifier '{}' is listed twice",
                wrapper.pass_through[0]
            ));
        }
        issues
    }
}

/// Returns `true` for a name usable as an element, attribute or variable name
/// in the wrapped markup.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

/// Implementation of the `ConfigValidator` trait for `StandardValidator`.
impl ConfigValidator for StandardValidator {
    /// Runs every check: version, file list (empty, duplicates, missing files),
    /// rules, anchor and wrapper. Issues are returned in that order.
    fn validate_config(&self, config: &WrapConfig) -> Result<Vec<String>> {
        let mut issues = Vec::new();

        if config.version != config::CONFIG_VERSION {
            issues.push(format!("Unsupported config version: {}", config.version));
        }

        if config.files.is_empty() {
            issues.push("No files configured".to_string());
        }
        let mut seen = HashSet::new();
        for file_path in &config.files {
            if !seen.insert(file_path) {
                issues.push(format!("Duplicate file entry: {file_path}"));
            }
            if !self.check_file_exists(file_path) {
                issues.push(format!("File not found: {file_path}"));
            }
        }

        issues.extend(self.validate_rules(&config.rules));
        issues.extend(self.check_anchor(&config.anchor));
        issues.extend(self.check_wrapper(&config.wrapper));

        Ok(issues)
    }

    /// Reports empty segments, segments containing a path separator, and
    /// segments already claimed by an earlier rule.
    fn validate_rules(&self, rules: &[CategoryRule]) -> Vec<String> {
        let mut issues = Vec::new();
        let mut segments = HashSet::new();

        for rule in rules {
            let segment = rule.segment.as_str();
            if segment.trim().is_empty() {
                issues.push(format!("Rule for '{}' has an empty segment", rule.category));
                continue;
            }
            if segment.contains(['/', '\\']) {
                issues.push(format!(
                    "Segment '{segment}' must be a single directory name"
                ));
            }
            // A later rule with the same segment can never match.
            if !segments.insert(segment) {
                issues.push(format!(
                    "Segment '{segment}' for '{}' is shadowed by an earlier rule",
                    rule.category
                ));
            }
        }
        issues
    }
}
