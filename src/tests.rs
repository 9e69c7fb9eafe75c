use crate::builders::classifier::Category;
use crate::builders::injector::WrapStatus;
use crate::builders::reporter::FileOutcome;
use crate::core::config::{ConfigManager, ConfigProvider, WrapConfig};
use crate::core::engine::WrapEngine;
use crate::core::error::FileError;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const PAGE: &str = "export default function Clients() {\n  return (\n    <section>\n      <h1>Clients</h1>\n    </section>\n  );\n}\n";

fn setup(root: &Path, files: &[&str]) -> ConfigManager {
    let manager = ConfigManager::new_at(root.to_path_buf()).unwrap();
    manager
        .save_config(&WrapConfig {
            files: files.iter().map(|f| f.to_string()).collect(),
            ..WrapConfig::default()
        })
        .unwrap();
    manager
}

fn write_page(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_process_file_wraps_with_directory_category() {
    let dir = tempdir().unwrap();
    write_page(dir.path(), "src/pages/coach/CoachSchede.jsx", PAGE);
    let engine = WrapEngine::new(setup(dir.path(), &["src/pages/coach/CoachSchede.jsx"])).unwrap();

    let entry = engine.process_file("src/pages/coach/CoachSchede.jsx", false);
    assert!(matches!(entry.result, Ok(FileOutcome::Wrapped)));
    assert_eq!(entry.category, Some(Category::Coach));

    let content = fs::read_to_string(dir.path().join("src/pages/coach/CoachSchede.jsx")).unwrap();
    assert!(content.contains("<UnifiedLayout role=\"coach\" userName={userName} userEmail={userEmail}>"));
    assert!(content.starts_with("export default function Clients() {\n  return (\n"));
    assert!(content.ends_with("</UnifiedLayout>\n    );\n}\n"));
}

#[test]
fn test_dry_run_does_not_write() {
    let dir = tempdir().unwrap();
    write_page(dir.path(), "src/pages/admin/Clients.jsx", PAGE);
    let engine = WrapEngine::new(setup(dir.path(), &["src/pages/admin/Clients.jsx"])).unwrap();

    let report = engine.run(true);
    assert!(report.dry_run);
    assert_eq!(report.wrapped(), 1);

    let content = fs::read_to_string(dir.path().join("src/pages/admin/Clients.jsx")).unwrap();
    assert_eq!(content, PAGE);
}

#[test]
fn test_missing_file_is_reported_not_fatal() {
    let dir = tempdir().unwrap();
    write_page(dir.path(), "src/pages/client/ClientChecks.jsx", PAGE);
    let engine = WrapEngine::new(setup(
        dir.path(),
        &["src/pages/client/Gone.jsx", "src/pages/client/ClientChecks.jsx"],
    ))
    .unwrap();

    let report = engine.run(false);
    assert_eq!(report.entries.len(), 2);
    assert!(matches!(report.entries[0].result, Err(FileError::MissingFile(_))));
    assert_eq!(report.entries[0].category, None);
    assert!(matches!(report.entries[1].result, Ok(FileOutcome::Wrapped)));
    assert_eq!((report.wrapped(), report.failed()), (1, 1));
}

#[test]
fn test_preview_matches_what_run_writes() {
    let dir = tempdir().unwrap();
    write_page(dir.path(), "src/pages/collaboratore/CollaboratoreDashboard.jsx", PAGE);
    let engine = WrapEngine::new(setup(
        dir.path(),
        &["src/pages/collaboratore/CollaboratoreDashboard.jsx"],
    ))
    .unwrap();

    let preview = engine
        .preview("src/pages/collaboratore/CollaboratoreDashboard.jsx")
        .unwrap();
    assert_eq!(preview.status, WrapStatus::Wrapped);
    engine.run(false);

    let written =
        fs::read_to_string(dir.path().join("src/pages/collaboratore/CollaboratoreDashboard.jsx"))
            .unwrap();
    assert_eq!(written, preview.text);
    assert!(written.contains("role=\"collaboratore\""));
}

#[test]
fn test_unreadable_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let broken = dir.path().join("src/pages/admin/Broken.jsx");
    fs::create_dir_all(broken.parent().unwrap()).unwrap();
    fs::write(&broken, [0xff, 0xfe]).unwrap();
    write_page(dir.path(), "src/pages/admin/Clients.jsx", PAGE);

    let engine = WrapEngine::new(setup(
        dir.path(),
        &["src/pages/admin/Broken.jsx", "src/pages/admin/Clients.jsx"],
    ))
    .unwrap();
    let report = engine.run(false);

    assert!(matches!(report.entries[0].result, Err(FileError::Io(_))));
    assert_eq!(report.entries[0].category, None);
    assert!(matches!(report.entries[1].result, Ok(FileOutcome::Wrapped)));
    assert_eq!((report.wrapped(), report.failed()), (1, 1));
    assert_eq!(fs::read(&broken).unwrap(), vec![0xff, 0xfe]);
}

#[cfg(unix)]
#[test]
fn test_rewrite_keeps_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    write_page(dir.path(), "Page.jsx", PAGE);
    let path = dir.path().join("Page.jsx");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

    let engine = WrapEngine::new(setup(dir.path(), &["Page.jsx"])).unwrap();
    engine.run(false);

    let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o644);
    assert_ne!(fs::read_to_string(&path).unwrap(), PAGE);
}

#[cfg(unix)]
#[test]
fn test_rewrite_follows_symlinks() {
    let dir = tempdir().unwrap();
    write_page(dir.path(), "shared/Page.jsx", PAGE);
    let target = dir.path().join("shared/Page.jsx");
    let link = dir.path().join("src/pages/admin/Page.jsx");
    fs::create_dir_all(link.parent().unwrap()).unwrap();
    std::os::unix::fs::symlink(&target, &link).unwrap();

    let engine = WrapEngine::new(setup(dir.path(), &["src/pages/admin/Page.jsx"])).unwrap();
    let report = engine.run(false);
    assert_eq!(report.wrapped(), 1);

    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert!(fs::read_to_string(&target).unwrap().contains("role=\"admin\""));
}
