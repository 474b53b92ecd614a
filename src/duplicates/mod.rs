//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Grouping digested files by SHA3-256 ([`groups`])
//! - Running the walk / digest / group pipeline ([`finder`])

pub mod finder;
pub mod groups;

pub use finder::{DuplicateFinder, FinderConfig, FinderError, ScanSummary};
pub use groups::{DuplicateGroup, GroupingStats, HashGroups};
