use super::common::write_with_mtime;
use hashdupe::duplicates::{DuplicateFinder, FinderConfig, FinderError};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();
    let finder = DuplicateFinder::with_defaults();

    let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.total_files, 0);
    assert_eq!(summary.distinct_hashes, 0);
    assert_eq!(summary.duplicate_groups, 0);
}

#[test]
fn test_scan_unique_files() {
    let dir = tempdir().unwrap();
    let files = [
        ("a.txt", "content a"),
        ("b.txt", "content b"),
        ("c.txt", "content c"),
    ];
    for (name, content) in files {
        File::create(dir.path().join(name))
            .unwrap()
            .write_all(content.as_bytes())
            .unwrap();
    }

    let finder = DuplicateFinder::with_defaults();
    let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(groups.len(), 3);
    assert!(!groups.has_duplicates());
    assert_eq!(summary.total_files, 3);
    assert_eq!(summary.distinct_hashes, 3);
    assert_eq!(summary.duplicate_groups, 0);
    assert_eq!(summary.reclaimable_space, 0);
}

#[test]
fn test_scan_original_and_duplicate() {
    let dir = tempdir().unwrap();
    let a = write_with_mtime(dir.path(), "a.txt", b"x", 1_600_000_000);
    let b = write_with_mtime(dir.path(), "b.txt", b"x", 1_600_000_100);
    let c = write_with_mtime(dir.path(), "c.txt", b"y", 1_600_000_200);

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(summary.total_files, 3);
    assert_eq!(summary.distinct_hashes, 2);
    assert_eq!(summary.duplicate_files, 1);

    let group = groups.duplicate_groups().next().unwrap();
    assert_eq!(group.original().unwrap().path, a);
    assert_eq!(group.duplicates().len(), 1);
    assert_eq!(group.duplicates()[0].path, b);

    let all: Vec<_> = groups.all_duplicates().map(|r| r.path.clone()).collect();
    assert!(!all.contains(&c));
    assert!(!all.contains(&a));
}

#[test]
fn test_scan_nested_directories_ordered_by_mtime() {
    let dir = tempdir().unwrap();
    let newest = write_with_mtime(dir.path(), "top.txt", b"same", 3_000);
    let oldest = write_with_mtime(dir.path(), "sub/deep/inner.txt", b"same", 1_000);
    let middle = write_with_mtime(dir.path(), "sub/mid.txt", b"same", 2_000);

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(summary.total_files, 3);
    let group = groups.duplicate_groups().next().unwrap();
    let paths: Vec<_> = group.files.iter().map(|r| r.path.clone()).collect();
    assert_eq!(paths, vec![oldest, middle, newest]);
}

#[test]
fn test_scan_equal_mtimes_break_ties_by_path() {
    let dir = tempdir().unwrap();
    let b = write_with_mtime(dir.path(), "b.txt", b"tie", 5_000);
    let a = write_with_mtime(dir.path(), "a.txt", b"tie", 5_000);

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    let group = groups.duplicate_groups().next().unwrap();
    assert_eq!(group.original().unwrap().path, a);
    assert_eq!(group.duplicates()[0].path, b);
}

#[test]
fn test_scan_empty_files_are_duplicates() {
    let dir = tempdir().unwrap();
    write_with_mtime(dir.path(), "empty1", b"", 1_000);
    write_with_mtime(dir.path(), "empty2", b"", 2_000);

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(summary.total_files, 2);
    assert_eq!(summary.duplicate_files, 1);
    assert_eq!(summary.reclaimable_space, 0);
    assert_eq!(
        groups.duplicate_groups().next().unwrap().digest,
        "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
    );
}

#[test]
fn test_scan_reclaimable_space() {
    let dir = tempdir().unwrap();
    let big = vec![7u8; 10_000];
    write_with_mtime(dir.path(), "one.bin", &big, 1_000);
    write_with_mtime(dir.path(), "two.bin", &big, 2_000);
    write_with_mtime(dir.path(), "three.bin", &big, 3_000);
    write_with_mtime(dir.path(), "other.bin", b"other", 4_000);

    let (_, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(summary.total_size, 30_005);
    assert_eq!(summary.duplicate_groups, 1);
    assert_eq!(summary.duplicate_files, 2);
    assert_eq!(summary.reclaimable_space, 20_000);
}

#[test]
fn test_chunk_size_does_not_change_digests() {
    let dir = tempdir().unwrap();
    let content: Vec<u8> = (0..100_000u32).map(|i| (i % 251) as u8).collect();
    write_with_mtime(dir.path(), "data.bin", &content, 1_000);
    write_with_mtime(dir.path(), "copy.bin", &content, 2_000);

    let (default_groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();
    let (small_groups, _) = DuplicateFinder::new(FinderConfig::default().with_chunk_size(7))
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(default_groups, small_groups);
}

#[test]
fn test_parallel_digesting_preserves_order() {
    let dir = tempdir().unwrap();
    for i in 0..40i64 {
        let content = format!("payload {}", i % 5);
        let name = format!("d{}/f{i:02}", i % 3);
        write_with_mtime(dir.path(), &name, content.as_bytes(), 10_000 - i);
    }

    let (sequential, seq_summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();
    let (parallel, par_summary) =
        DuplicateFinder::new(FinderConfig::default().with_io_threads(8))
            .find_duplicates(dir.path())
            .unwrap();

    assert_eq!(sequential, parallel);
    assert_eq!(seq_summary.duplicate_files, par_summary.duplicate_files);
    assert_eq!(sequential.len(), 5);
}

#[test]
fn test_rescan_is_deterministic() {
    let dir = tempdir().unwrap();
    write_with_mtime(dir.path(), "a", b"alpha", 1_000);
    write_with_mtime(dir.path(), "b", b"beta", 2_000);
    write_with_mtime(dir.path(), "c", b"alpha", 3_000);

    let finder = DuplicateFinder::with_defaults();
    let (first, _) = finder.find_duplicates(dir.path()).unwrap();
    let (second, _) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_scan_missing_root() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing");

    let err = DuplicateFinder::with_defaults()
        .find_duplicates(&missing)
        .unwrap_err();

    assert!(matches!(err, FinderError::PathNotFound(ref p) if p == &missing));
}

#[test]
fn test_scan_file_as_root() {
    let dir = tempdir().unwrap();
    let file = write_with_mtime(dir.path(), "file.txt", b"data", 1_000);

    let err = DuplicateFinder::with_defaults()
        .find_duplicates(&file)
        .unwrap_err();

    assert!(matches!(err, FinderError::NotADirectory(_)));
    assert!(err.is_invalid_root());
}

#[test]
fn test_relative_root_keeps_relative_paths() {
    let dir = tempdir().unwrap();
    write_with_mtime(dir.path(), "rel/a.txt", b"same", 1_000);
    write_with_mtime(dir.path(), "rel/b.txt", b"same", 2_000);

    // Relative roots are resolved against the working directory, so build
    // one that reaches the temp dir from here.
    let cwd = std::env::current_dir().unwrap();
    let Some(relative) = pathdiff(dir.path().join("rel").as_path(), &cwd) else {
        eprintln!("Skipping: temp dir not reachable by a relative path");
        return;
    };

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(&relative)
        .unwrap();

    let group = groups.duplicate_groups().next().unwrap();
    let record = &group.duplicates()[0];
    assert!(record.path.is_relative());
    assert!(record.absolute_path.is_absolute());
    assert_eq!(
        fs::canonicalize(&record.path).unwrap(),
        record.absolute_path
    );
}

/// Minimal relative path from `base` to `target` for absolute paths.
fn pathdiff(target: &Path, base: &Path) -> Option<std::path::PathBuf> {
    use std::path::Component;

    let target = fs::canonicalize(target).ok()?;
    let base = fs::canonicalize(base).ok()?;
    let t: Vec<Component> = target.components().collect();
    let b: Vec<Component> = base.components().collect();
    if t.first() != b.first() {
        return None;
    }
    let common = t.iter().zip(&b).take_while(|(x, y)| x == y).count();
    let mut out = std::path::PathBuf::new();
    for _ in common..b.len() {
        out.push("..");
    }
    for component in &t[common..] {
        out.push(component.as_os_str());
    }
    Some(out)
}
