use super::common::write_with_mtime;
use hashdupe::duplicates::DuplicateFinder;
use hashdupe::output::{ScriptOutput, ScriptType};
use tempfile::tempdir;

#[test]
fn test_paths_with_spaces() {
    let dir = tempdir().unwrap();
    write_with_mtime(dir.path(), "my file.txt", b"content", 1_000);
    write_with_mtime(dir.path(), "my copy.txt", b"content", 2_000);

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    let posix = ScriptOutput::new(&groups)
        .command(ScriptType::Posix)
        .unwrap();
    assert!(posix.starts_with("rm -f \""));
    assert!(posix.ends_with("my copy.txt\""));
}

#[test]
fn test_paths_with_quotes() {
    let dir = tempdir().unwrap();

    // Windows does not allow double quotes in filenames.
    if cfg!(not(windows)) {
        write_with_mtime(dir.path(), "plain.txt", b"content", 1_000);
        write_with_mtime(dir.path(), "file_with_\"quote\".txt", b"content", 2_000);

        let (groups, _) = DuplicateFinder::with_defaults()
            .find_duplicates(dir.path())
            .unwrap();
        let output = ScriptOutput::new(&groups);

        let posix = output.command(ScriptType::Posix).unwrap();
        assert!(posix.ends_with("file_with_\\\"quote\\\".txt\""));

        let powershell = output.command(ScriptType::PowerShell).unwrap();
        assert!(powershell.ends_with("file_with_`\"quote`\".txt\""));
    }
}

#[test]
fn test_paths_with_shell_expansions() {
    let dir = tempdir().unwrap();

    if cfg!(not(windows)) {
        write_with_mtime(dir.path(), "keep.txt", b"content", 1_000);
        write_with_mtime(dir.path(), "$HOME `id`.txt", b"content", 2_000);

        let (groups, _) = DuplicateFinder::with_defaults()
            .find_duplicates(dir.path())
            .unwrap();
        let output = ScriptOutput::new(&groups);

        let posix = output.command(ScriptType::Posix).unwrap();
        assert!(posix.ends_with("\\$HOME \\`id\\`.txt\""));

        let powershell = output.command(ScriptType::PowerShell).unwrap();
        assert!(powershell.ends_with("`$HOME ``id``.txt\""));
    }
}

#[test]
fn test_unicode_paths() {
    let dir = tempdir().unwrap();
    let original = write_with_mtime(dir.path(), "日本語.txt", b"unicode", 1_000);
    let copy = write_with_mtime(dir.path(), "émigré/ψ.txt", b"unicode", 2_000);

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(summary.duplicate_files, 1);
    let group = groups.duplicate_groups().next().unwrap();
    assert_eq!(group.original().unwrap().path, original);
    assert_eq!(group.duplicates()[0].path, copy);
}

#[test]
fn test_hidden_files_are_scanned() {
    let dir = tempdir().unwrap();
    write_with_mtime(dir.path(), ".hidden", b"secret", 1_000);
    write_with_mtime(dir.path(), ".config/visible", b"secret", 2_000);

    let (_, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(summary.total_files, 2);
    assert_eq!(summary.duplicate_files, 1);
}
