use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::builders::classifier::{Category, CategoryRule, Classifier, PathClassifier};
use crate::builders::importer::{FileListImporter, ListFileImporter};
use crate::builders::injector::{Injector, WrapTemplate};
use crate::builders::locator::{AnchorSettings, RegionLocator};
use crate::builders::validator::{ConfigValidator, StandardValidator};
use crate::core::workspace;

/// Name of the configuration file, stored at the workspace root.
pub const CONFIG_FILE_NAME: &str = ".layout-wrap.toml";

/// The configuration version this build reads and writes.
pub const CONFIG_VERSION: &str = "1.0";

/// The pages the tool has always processed when no configuration is present.
const DEFAULT_FILES: &[&str] = &[
    "src/pages/admin/Clients.jsx",
    "src/pages/admin/ClientDetail.jsx",
    "src/pages/admin/EditClient.jsx",
    "src/pages/admin/NewClient.jsx",
    "src/pages/admin/AdminAnamnesi.jsx",
    "src/pages/admin/BusinessHistory.jsx",
    "src/pages/admin/Statistiche.jsx",
    "src/pages/admin/Analytics.jsx",
    "src/pages/admin/Collaboratori.jsx",
    "src/pages/admin/CollaboratoreDetail.jsx",
    "src/pages/admin/Dipendenti.jsx",
    "src/pages/client/ClientAnamnesi.jsx",
    "src/pages/client/ClientChecks.jsx",
    "src/pages/client/ClientPayments.jsx",
    "src/pages/coach/CoachClients.jsx",
    "src/pages/coach/CoachClientDetail.jsx",
    "src/pages/coach/CoachAnamnesi.jsx",
    "src/pages/coach/CoachSchede.jsx",
    "src/pages/coach/CoachUpdates.jsx",
    "src/pages/collaboratore/CollaboratoreDashboard.jsx",
];

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GlobalSettings {
    /// Print the category and anchor offset next to every file in the report.
    pub verbose: bool,
}

/// Everything a run needs: which files to touch, how to classify them, what
/// to look for, and what to inject.
///
/// Field order matters for TOML output: plain values first, then tables.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct WrapConfig {
    pub version: String,
    /// Category used when no rule matches a path.
    pub default_category: Category,
    /// Processed in order. Relative entries are joined to the workspace root.
    pub files: Vec<String>,
    /// Checked in order; the first match wins.
    pub rules: Vec<CategoryRule>,
    pub anchor: AnchorSettings,
    pub wrapper: WrapTemplate,
    pub global_settings: GlobalSettings,
}

impl Default for WrapConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            default_category: Category::Admin,
            files: DEFAULT_FILES.iter().map(|f| f.to_string()).collect(),
            rules: CategoryRule::default_rules(),
            anchor: AnchorSettings::default(),
            wrapper: WrapTemplate::default(),
            global_settings: GlobalSettings { verbose: false },
        }
    }
}

impl WrapConfig {
    pub fn classifier(&self) -> PathClassifier {
        PathClassifier::new(self.rules.clone(), self.default_category)
    }

    pub fn injector(&self) -> Result<Injector> {
        let locator = RegionLocator::new(&self.anchor)
            .with_context(|| format!("Invalid anchor pattern: {}", self.anchor.pattern))?;
        Ok(Injector::new(locator, self.wrapper.clone()))
    }
}

/// Export formats accepted by `ConfigManager::export_config`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Toml,
    Json,
    Yaml,
}

impl ExportFormat {
    /// Unknown names fall back to TOML.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "json" => ExportFormat::Json,
            "yaml" | "yml" => ExportFormat::Yaml,
            _ => ExportFormat::Toml,
        }
    }
}

pub struct ConfigManager {
    config_path: PathBuf,
    repo_root: PathBuf,
}

impl ConfigManager {
    /// Locates the workspace root (see `workspace::resolve_root`) and the
    /// configuration file inside it.
    pub fn new(root: Option<&Path>) -> Result<Self> {
        let repo_root = workspace::resolve_root(root)?;
        Self::new_at(repo_root)
    }

    pub fn new_at(repo_root: PathBuf) -> Result<Self> {
        let config_path = repo_root.join(CONFIG_FILE_NAME);
        Ok(Self {
            config_path,
            repo_root,
        })
    }

    /// Writes the default configuration unless one already exists.
    /// Returns `true` when a file was created.
    pub fn initialize(&self) -> Result<bool> {
        if self.config_path.exists() {
            return Ok(false);
        }

        self.save_config(&WrapConfig::default())?;
        Ok(true)
    }

    pub fn validate_config(&self) -> Result<()> {
        let config = self.load_config()?;
        let validator = StandardValidator::new(self.repo_root.clone());
        let issues = validator.validate_config(&config)?;

        if issues.is_empty() {
            println!("✓ Configuration is valid.");
            Ok(())
        } else {
            println!("⚠️  Found issues in configuration:");
            for issue in issues {
                println!("  - {issue}");
            }
            anyhow::bail!("Configuration validation failed.");
        }
    }

    /// Appends files to the list, skipping ones already present.
    /// Returns how many were added.
    pub fn add_files(&mut self, files: Vec<String>) -> Result<usize> {
        let mut config = self.load_config()?;
        let added = merge_files(&mut config.files, files);
        self.save_config(&config)?;
        Ok(added)
    }

    /// Returns how many entries were removed.
    pub fn remove_files(&mut self, files: &[String]) -> Result<usize> {
        let mut config = self.load_config()?;
        let before = config.files.len();
        config.files.retain(|f| !files.contains(f));
        let removed = before - config.files.len();

        self.save_config(&config)?;
        Ok(removed)
    }

    pub fn list_files(&self) -> Result<()> {
        let config = self.load_config()?;

        if config.files.is_empty() {
            println!("No files configured.");
            return Ok(());
        }

        let classifier = config.classifier();
        for file in &config.files {
            let icon = if self.resolve(file).exists() { "📄" } else { "❓" };
            println!("{icon} {file} → {}", classifier.classify(file));
        }
        Ok(())
    }

    /// Imports a newline-delimited list of paths into the file list.
    pub fn import_files(&mut self, list_path: &Path) -> Result<usize> {
        let mut importer = ListFileImporter::new();
        let imported = importer.import_from_file(list_path)?;
        self.add_files(imported)
    }

    pub fn export_config(&self, out_path: &Path, format: ExportFormat) -> Result<()> {
        let config = self.load_config()?;

        let content = match format {
            ExportFormat::Json => {
                serde_json::to_string_pretty(&config).context("Failed to serialize to JSON")?
            }
            ExportFormat::Yaml => {
                serde_yaml::to_string(&config).context("Failed to serialize to YAML")?
            }
            ExportFormat::Toml => {
                toml::to_string_pretty(&config).context("Failed to serialize to TOML")?
            }
        };

        fs::write(out_path, content).context("Failed to write export file")?;

        Ok(())
    }

    /// Joins a configured entry to the workspace root. Absolute entries are
    /// returned unchanged.
    pub fn resolve(&self, file: &str) -> PathBuf {
        self.repo_root.join(file)
    }
}

fn merge_files(existing: &mut Vec<String>, incoming: Vec<String>) -> usize {
    let mut added = 0;
    for file in incoming {
        if !existing.contains(&file) {
            existing.push(file);
            added += 1;
        }
    }
    added
}

pub trait ConfigProvider {
    fn load_config(&self) -> Result<WrapConfig>;
    fn save_config(&self, config: &WrapConfig) -> Result<()>;
    fn get_config_path(&self) -> Result<PathBuf>;
}

impl ConfigProvider for ConfigManager {
    fn load_config(&self) -> Result<WrapConfig> {
        if !self.config_path.exists() {
            return Ok(WrapConfig::default());
        }

        let content =
            fs::read_to_string(&self.config_path).context("Failed to read config file")?;

        toml::from_str(&content).context("Failed to parse config file")
    }

    fn save_config(&self, config: &WrapConfig) -> Result<()> {
        let content = toml::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, content).context("Failed to write config file")?;

        Ok(())
    }

    fn get_config_path(&self) -> Result<PathBuf> {
        Ok(self.config_path.clone())
    }
}
