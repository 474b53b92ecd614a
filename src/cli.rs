//! Command-line interface definitions for hashdupe.
//!
//! This module defines all CLI arguments and options using the clap derive API.
//!
//! # Example
//!
//! ```bash
//! # Scan ./sample-data (the default root)
//! hashdupe
//!
//! # Scan another directory with JSON output for scripting
//! hashdupe ~/Downloads --output json
//!
//! # Larger read chunks, four digest threads
//! hashdupe ~/Downloads --chunk-size 1MiB --jobs 4
//!
//! # Verbose mode for debugging
//! hashdupe -v ~/Downloads
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Default scan root when no path is given.
pub const DEFAULT_ROOT: &str = "./sample-data";

/// Find duplicate files by content digest.
///
/// hashdupe walks a directory tree in modification-time order, digests every
/// regular file with MD5, SHA-1 and SHA3-256, and reports files whose
/// SHA3-256 digests match. The earliest file of each group is the original;
/// deletion commands are printed for the rest but never executed.
#[derive(Debug, Parser)]
#[command(name = "hashdupe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory path to scan for duplicates
    #[arg(value_name = "PATH", default_value = DEFAULT_ROOT)]
    pub path: PathBuf,

    /// Read chunk size used while digesting (e.g., 64KiB, 1MB)
    ///
    /// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB, TB, TiB
    #[arg(
        short,
        long,
        value_name = "SIZE",
        env = "HASHDUPE_CHUNK_SIZE",
        default_value = "65536",
        value_parser = parse_chunk_size
    )]
    pub chunk_size: usize,

    /// Number of threads digesting files (1 digests one file at a time)
    #[arg(
        short,
        long,
        value_name = "N",
        default_value = "1",
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub jobs: u16,

    /// Output format (text for people, json for scripting)
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Follow symbolic links during scan
    ///
    /// Warning: May cause infinite loops if symlinks form cycles.
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Report fatal errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}

/// Output format for scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain-text report with deletion commands
    Text,
    /// JSON output for scripting
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Parse a human-readable size string into bytes.
///
/// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB, TB, TiB
/// Case-insensitive. Numbers without suffix are treated as bytes.
///
/// # Examples
///
/// ```
/// use hashdupe::cli::parse_size;
///
/// assert_eq!(parse_size("1024").unwrap(), 1024);
/// assert_eq!(parse_size("1KB").unwrap(), 1000);
/// assert_eq!(parse_size("1KiB").unwrap(), 1024);
/// assert_eq!(parse_size("1MB").unwrap(), 1_000_000);
/// assert_eq!(parse_size("1MiB").unwrap(), 1_048_576);
/// ```
/// # Errors
///
/// Returns an error if the string is empty, contains an invalid number,
/// a negative number, or an unknown size suffix.
pub fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Size cannot be empty".to_string());
    }

    // Find where the number ends and the suffix begins
    let (num_str, suffix) = match s.find(|c: char| !c.is_ascii_digit() && c != '.') {
        Some(idx) => (&s[..idx], s[idx..].trim().to_uppercase()),
        None => (s, String::new()),
    };

    let num: f64 = num_str
        .parse()
        .map_err(|_| format!("Invalid number: '{num_str}'"))?;

    if num < 0.0 {
        return Err("Size cannot be negative".to_string());
    }

    let multiplier: u64 = match suffix.as_str() {
        "" | "B" => 1,
        "KB" | "K" => 1_000,
        "KIB" => 1_024,
        "MB" | "M" => 1_000_000,
        "MIB" => 1_048_576,
        "GB" | "G" => 1_000_000_000,
        "GIB" => 1_073_741_824,
        "TB" | "T" => 1_000_000_000_000,
        "TIB" => 1_099_511_627_776,
        _ => return Err(format!("Unknown size suffix: '{suffix}'")),
    };

    Ok((num * multiplier as f64) as u64)
}

/// Parse a read chunk size: a human-readable size of at least one byte.
///
/// # Errors
///
/// Returns an error for anything [`parse_size`] rejects, for zero, and for
/// sizes that do not fit in memory addressing.
pub fn parse_chunk_size(s: &str) -> Result<usize, String> {
    let bytes = parse_size(s)?;
    if bytes == 0 {
        return Err("Chunk size must be at least 1 byte".to_string());
    }
    usize::try_from(bytes).map_err(|_| format!("Chunk size too large: {bytes} bytes"))
}
