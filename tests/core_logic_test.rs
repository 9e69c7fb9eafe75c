use layout_wrap::builders::reporter::FileOutcome;
use layout_wrap::core::config::{ConfigManager, ConfigProvider, WrapConfig};
use layout_wrap::core::engine::WrapEngine;
use layout_wrap::core::error::FileError;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const COMPONENT: &str = r#"import { useState } from 'react';

function StatCard({ label, value }) {
  return (
    <div className="card">{label}: {value}</div>
  );
}

export default function Statistiche() {
  const [range, setRange] = useState('month');
  return (
    <div className="stats">
      <select onChange={(e) => setRange(e.target.value)}>{range}</select>
      <StatCard label="Clienti" value={count(range)} />
    </div>
  );
}
"#;

fn setup_workspace(files: &[(&str, &str)], listed: &[&str]) -> (TempDir, ConfigManager) {
    let dir = tempfile::tempdir().unwrap();
    for (rel, content) in files {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    let manager = ConfigManager::new_at(dir.path().to_path_buf()).unwrap();
    manager
        .save_config(&WrapConfig {
            files: listed.iter().map(|f| f.to_string()).collect(),
            ..WrapConfig::default()
        })
        .unwrap();
    (dir, manager)
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}

#[test]
fn test_core_workflow() {
    let already = "export default function CoachUpdates() {\n  return (\n    <UnifiedLayout role=\"coach\">\n      <p/>\n    </UnifiedLayout>\n  );\n}\n";
    let no_return = "export const ClientPayments = () => <table/>;\n";
    let unbalanced = "export default function Dipendenti() {\n  return (\n    <ul>{items.map((i) => <li>{i}</li>}</ul>\n}\n";

    let (td, manager) = setup_workspace(
        &[
            ("src/pages/admin/Statistiche.jsx", COMPONENT),
            ("src/pages/coach/CoachUpdates.jsx", already),
            ("src/pages/client/ClientPayments.jsx", no_return),
            ("src/pages/admin/Dipendenti.jsx", unbalanced),
        ],
        &[
            "src/pages/admin/Statistiche.jsx",
            "src/pages/coach/CoachUpdates.jsx",
            "src/pages/client/ClientPayments.jsx",
            "src/pages/admin/Dipendenti.jsx",
            "src/pages/collaboratore/Missing.jsx",
        ],
    );
    let root = td.path().to_path_buf();

    let engine = WrapEngine::new(manager).unwrap();
    let report = engine.run(false);

    // 1. Tally: one wrapped, one skipped, three failures, batch not aborted
    assert_eq!(report.entries.len(), 5);
    assert_eq!(report.wrapped(), 1);
    assert_eq!(report.already_wrapped(), 1);
    assert_eq!(report.failed(), 3);
    assert!(matches!(report.entries[2].result, Err(FileError::NoRegionFound)));
    assert!(matches!(
        report.entries[3].result,
        Err(FileError::UnbalancedDelimiters { .. })
    ));
    assert!(matches!(report.entries[4].result, Err(FileError::MissingFile(_))));

    // 2. Only the main component's return was wrapped
    let wrapped = read(&root, "src/pages/admin/Statistiche.jsx");
    assert_eq!(wrapped.matches("<UnifiedLayout").count(), 1);
    assert!(wrapped.contains(
        "  return (\n    <div className=\"card\">{label}: {value}</div>\n  );"
    ));
    assert!(wrapped.contains(
        "  return (\n      <UnifiedLayout role=\"admin\" userName={userName} userEmail={userEmail}>\n      <div className=\"stats\">"
    ));
    assert!(wrapped.ends_with("    </div>\n    </UnifiedLayout>\n    );\n}\n"));

    // 3. Failed and skipped files are byte-identical
    assert_eq!(read(&root, "src/pages/coach/CoachUpdates.jsx"), already);
    assert_eq!(read(&root, "src/pages/client/ClientPayments.jsx"), no_return);
    assert_eq!(read(&root, "src/pages/admin/Dipendenti.jsx"), unbalanced);

    // 4. A second run changes nothing
    let second = engine.run(false);
    assert_eq!(second.wrapped(), 0);
    assert_eq!(second.already_wrapped(), 2);
    assert!(matches!(second.entries[0].result, Ok(FileOutcome::AlreadyWrapped)));
    assert_eq!(read(&root, "src/pages/admin/Statistiche.jsx"), wrapped);
}

#[test]
fn test_custom_rules_and_template_from_config() {
    let page = "export default function Team() {\n  return (<ul/>);\n}\n";
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("web/staff/Team.jsx");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, page).unwrap();

    fs::write(
        dir.path().join(".layout-wrap.toml"),
        r#"
version = "1.0"
default_category = "client"
files = ["web/staff/Team.jsx"]

[[rules]]
category = "collaboratore"
segment = "staff"

[anchor]
pattern = 'return\s*\('
open = "("
close = ")"

[wrapper]
component = "Shell"
role_attribute = "area"
pass_through = ["user", "tenant"]

[global_settings]
verbose = false
"#,
    )
    .unwrap();

    let engine = WrapEngine::new(ConfigManager::new_at(dir.path().to_path_buf()).unwrap()).unwrap();
    let report = engine.run(false);
    assert_eq!(report.wrapped(), 1);

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "export default function Team() {\n  return (\n      <Shell area=\"collaboratore\" user={user} tenant={tenant}>\n      <ul/>\n    </Shell>\n    );\n}\n"
    );
}
