//! Deletion command generation for duplicate files.
//!
//! Builds a single command line per shell dialect that removes every
//! duplicate found by a scan:
//!
//! ```text
//! rm -f "/data/b.txt" "/data/sub/c.txt"
//! Remove-Item "/data/b.txt", "/data/sub/c.txt"
//! ```
//!
//! Originals never appear in a command. A duplicate whose resolved path is
//! an original's resolved path (a symlink to it, for instance), or is
//! already listed, is left out.
//! Paths that are not valid UTF-8 are left out with a warning. The
//! commands are only printed;
//! nothing here touches the filesystem.
//!
//! # Quoting
//!
//! Paths are wrapped in double quotes. Characters that stay special
//! inside double quotes are escaped for the target shell so the command
//! removes exactly the listed file:
//!
//! | Dialect    | Escaped characters | Escape      |
//! |------------|--------------------|-------------|
//! | POSIX      | `\` `"` `$` `` ` ``| backslash   |
//! | PowerShell | `` ` `` `"` `$`    | backtick    |

use std::collections::HashSet;
use std::path::Path;

use crate::duplicates::HashGroups;

/// Shell dialect of a deletion command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptType {
    /// POSIX-compliant shell (sh/bash/zsh)
    Posix,
    /// Windows PowerShell
    PowerShell,
}

impl ScriptType {
    /// Every supported dialect, in report order.
    pub const ALL: [ScriptType; 2] = [ScriptType::Posix, ScriptType::PowerShell];

    /// Heading printed above the command in the text report.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Posix => "Linux command to delete:",
            Self::PowerShell => "PowerShell command to delete:",
        }
    }

    /// Quote a single path for this dialect.
    ///
    /// Returns `None` for a path that is not valid UTF-8.
    #[must_use]
    pub fn quote(self, path: &Path) -> Option<String> {
        let path = path.to_str()?;
        Some(match self {
            Self::Posix => quote_posix(path),
            Self::PowerShell => quote_powershell(path),
        })
    }

    /// Build the deletion command for `paths`.
    ///
    /// Paths that are not valid UTF-8 are skipped with a warning. Returns
    /// `None` when there is nothing to delete.
    #[must_use]
    pub fn command<'p>(self, paths: impl IntoIterator<Item = &'p Path>) -> Option<String> {
        let quoted: Vec<String> = paths
            .into_iter()
            .filter_map(|p| {
                let quoted = self.quote(p);
                if quoted.is_none() {
                    log::warn!(
                        "Leaving non-UTF-8 path out of the deletion command: {}",
                        p.display()
                    );
                }
                quoted
            })
            .collect();
        if quoted.is_empty() {
            return None;
        }

        Some(match self {
            Self::Posix => format!("rm -f {}", quoted.join(" ")),
            Self::PowerShell => format!("Remove-Item {}", quoted.join(", ")),
        })
    }
}

/// Deletion commands for every duplicate of a scan.
pub struct ScriptOutput<'a> {
    /// Grouped scan results
    pub groups: &'a HashGroups,
}

impl<'a> ScriptOutput<'a> {
    /// Create a new command formatter.
    #[must_use]
    pub fn new(groups: &'a HashGroups) -> Self {
        Self { groups }
    }

    /// Absolute paths of every duplicate, group order then walk order.
    ///
    /// A path that resolves to any original, or that was already listed,
    /// is skipped.
    #[must_use]
    pub fn duplicate_paths(&self) -> Vec<&'a Path> {
        let groups: &'a HashGroups = self.groups;
        let originals: HashSet<&Path> = groups
            .iter()
            .filter_map(|group| group.original())
            .map(|record| record.absolute_path.as_path())
            .collect();

        let mut emitted = HashSet::new();
        let mut paths = Vec::new();
        for record in groups.all_duplicates() {
            let path = record.absolute_path.as_path();
            if originals.contains(path) {
                log::debug!(
                    "Not deleting {}: it resolves to a kept original {}",
                    record.path.display(),
                    path.display()
                );
                continue;
            }
            if !emitted.insert(path) {
                log::debug!(
                    "Not deleting {}: {} is already listed",
                    record.path.display(),
                    path.display()
                );
                continue;
            }
            paths.push(path);
        }
        paths
    }

    /// Deletion command for `script_type`, or `None` without duplicates.
    #[must_use]
    pub fn command(&self, script_type: ScriptType) -> Option<String> {
        script_type.command(self.duplicate_paths())
    }
}

fn quote_posix(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

fn quote_powershell(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if matches!(c, '`' | '"' | '$') {
            out.push('`');
        }
        out.push(c);
    }
    out.push('"');
    out
}
