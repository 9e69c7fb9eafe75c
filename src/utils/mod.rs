use anyhow::{Context, Result};
use std::path::Path;

use crate::builders::classifier::Classifier;
use crate::builders::reporter::{ConsoleReporter, StatusReporter};
use crate::core::config::{ConfigManager, ConfigProvider, ExportFormat};
use crate::core::engine::WrapEngine;

pub fn initialize_repository(root: Option<&Path>) -> Result<()> {
    let config_manager = get_config_manager(root)?;
    let path = config_manager.get_config_path()?;
    if config_manager.initialize()? {
        println!("✓ Created {}", path.display());
    } else {
        println!("✓ Configuration already present at {}", path.display());
    }
    println!("Run 'layout-wrap run --dry-run' to preview the changes");
    Ok(())
}

pub fn run(root: Option<&Path>, dry_run: bool, verbose: bool) -> Result<()> {
    let engine = WrapEngine::new(get_config_manager(root)?)?;
    println!("🚀 Wrapping pages...\n");

    let report = engine.run(dry_run);
    let reporter = ConsoleReporter::new(verbose || engine.config().global_settings.verbose);
    reporter.generate_run_report(&report);
    Ok(())
}

pub fn preview(root: Option<&Path>, file: &str) -> Result<()> {
    let engine = WrapEngine::new(get_config_manager(root)?)?;
    let outcome = engine
        .preview(file)
        .with_context(|| format!("Failed to preview {file}"))?;

    eprintln!("{file}: {} ({})", outcome.status, engine.classify(file));
    print!("{}", outcome.text);
    Ok(())
}

pub fn classify_paths(root: Option<&Path>, paths: &[String]) -> Result<()> {
    let config = get_config_manager(root)?.load_config()?;
    let classifier = config.classifier();
    for path in paths {
        println!("{path}: {}", classifier.classify(path));
    }
    Ok(())
}

pub fn validate(root: Option<&Path>) -> Result<()> {
    get_config_manager(root)?.validate_config()
}

pub fn list_files(root: Option<&Path>) -> Result<()> {
    get_config_manager(root)?.list_files()
}

pub fn add_files(root: Option<&Path>, files: Vec<String>) -> Result<()> {
    let added = get_config_manager(root)?.add_files(files)?;
    println!("✓ Added {added} file(s)");
    Ok(())
}

pub fn remove_files(root: Option<&Path>, files: &[String]) -> Result<()> {
    let removed = get_config_manager(root)?.remove_files(files)?;
    println!("✓ Removed {removed} file(s)");
    Ok(())
}

pub fn import_files(root: Option<&Path>, list_file: &Path) -> Result<()> {
    let imported = get_config_manager(root)?.import_files(list_file)?;
    println!("✓ Imported {imported} new file(s) from {}", list_file.display());
    Ok(())
}

pub fn export_config(root: Option<&Path>, out: &Path, format: &str) -> Result<()> {
    get_config_manager(root)?.export_config(out, ExportFormat::from_name(format))?;
    println!("✓ Exported configuration to {}", out.display());
    Ok(())
}

// Helper function to create ConfigManager instance
fn get_config_manager(root: Option<&Path>) -> Result<ConfigManager> {
    ConfigManager::new(root)
}
