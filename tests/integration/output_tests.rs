use super::common::write_with_mtime;
use hashdupe::cli::OutputFormat;
use hashdupe::config::ScanConfig;
use hashdupe::run_scan;
use std::fs;
use tempfile::tempdir;

fn quiet_config(root: &std::path::Path, output: OutputFormat) -> ScanConfig {
    ScanConfig {
        output,
        show_progress: false,
        ..ScanConfig::default().with_root(root)
    }
}

#[test]
fn test_text_report_for_basic_scenario() {
    let dir = tempdir().unwrap();
    let a = write_with_mtime(dir.path(), "a.txt", b"x", 1_600_000_000);
    let b = write_with_mtime(dir.path(), "b.txt", b"x", 1_600_000_100);
    let c = write_with_mtime(dir.path(), "c.txt", b"y", 1_600_000_200);

    let mut out = Vec::new();
    let summary = run_scan(&quiet_config(dir.path(), OutputFormat::Text), &mut out).unwrap();
    let report = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = report.lines().collect();

    assert_eq!(summary.total_files, 3);
    assert_eq!(lines[0], "3 files, 2 hashes (duplicates found)");
    assert_eq!(lines[1], "");
    assert_eq!(
        lines[2],
        format!(
            "{} has 1 duplicate(s) (SHA3-256 {})",
            a.display(),
            sha3_of(b"x")
        )
    );
    assert!(lines[3].starts_with("[ FileRecord { path: "));
    assert!(lines[3].contains("b.txt"));
    assert!(lines.contains(&"Found 1 duplicate file(s)"));
    assert!(lines.contains(&"Linux command to delete:"));
    assert!(lines.contains(&"PowerShell command to delete:"));

    let abs_b = fs::canonicalize(&b).unwrap();
    let abs_c = fs::canonicalize(&c).unwrap();
    let rm = lines.iter().find(|l| l.starts_with("rm -f ")).unwrap();
    assert_eq!(*rm, format!("rm -f \"{}\"", abs_b.display()));
    assert!(!rm.contains(&abs_c.display().to_string()));
    let remove = lines.iter().find(|l| l.starts_with("Remove-Item ")).unwrap();
    assert_eq!(*remove, format!("Remove-Item \"{}\"", abs_b.display()));
}

#[test]
fn test_text_report_without_duplicates() {
    let dir = tempdir().unwrap();
    write_with_mtime(dir.path(), "a", b"one", 1_000);
    write_with_mtime(dir.path(), "b", b"two", 2_000);

    let mut out = Vec::new();
    run_scan(&quiet_config(dir.path(), OutputFormat::Text), &mut out).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "2 files, 2 hashes\n\n");
}

#[test]
fn test_text_report_empty_directory() {
    let dir = tempdir().unwrap();

    let mut out = Vec::new();
    run_scan(&quiet_config(dir.path(), OutputFormat::Text), &mut out).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "0 files, 0 hashes\n\n");
}

#[test]
fn test_json_output() {
    let dir = tempdir().unwrap();
    write_with_mtime(dir.path(), "a.txt", b"x", 1_000);
    write_with_mtime(dir.path(), "b.txt", b"x", 2_000);
    write_with_mtime(dir.path(), "c.txt", b"y", 3_000);

    let mut out = Vec::new();
    run_scan(&quiet_config(dir.path(), OutputFormat::Json), &mut out).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(json["summary"]["total_files"], 3);
    assert_eq!(json["summary"]["distinct_hashes"], 2);
    assert_eq!(json["summary"]["duplicate_groups"], 1);
    assert_eq!(json["summary"]["duplicate_files"], 1);
    assert_eq!(json["summary"]["total_size"], 3);
    assert_eq!(json["summary"]["reclaimable_space"], 1);

    let groups = json["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["sha3_256"], sha3_of(b"x"));
    assert!(groups[0]["original"]["path"]
        .as_str()
        .unwrap()
        .ends_with("a.txt"));
    let duplicate = &groups[0]["duplicates"][0];
    assert!(duplicate["path"].as_str().unwrap().ends_with("b.txt"));
    assert_eq!(duplicate["md5"], "9dd4e461268c8034f5c8564e155c67a6");
    assert_eq!(duplicate["sha1"], "11f6ad8ec52a2984abaafd7c3b516503785c2072");

    let posix = json["commands"]["posix"].as_str().unwrap();
    assert!(posix.starts_with("rm -f \""));
    assert!(posix.ends_with("b.txt\""));
}

#[test]
fn test_json_output_without_duplicates() {
    let dir = tempdir().unwrap();
    write_with_mtime(dir.path(), "only", b"one", 1_000);

    let mut out = Vec::new();
    run_scan(&quiet_config(dir.path(), OutputFormat::Json), &mut out).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();

    assert!(json["commands"].is_null());
    assert!(json["groups"].as_array().unwrap().is_empty());
}

#[test]
fn test_failed_scan_writes_nothing() {
    let dir = tempdir().unwrap();

    let mut out = Vec::new();
    let result = run_scan(
        &quiet_config(&dir.path().join("missing"), OutputFormat::Text),
        &mut out,
    );

    assert!(result.is_err());
    assert!(out.is_empty());
}

fn sha3_of(data: &[u8]) -> String {
    hashdupe::scanner::Hasher::default()
        .digest_reader(data)
        .unwrap()
        .sha3_256
}
