//! Output formatters for duplicate scan results.
//!
//! This module provides different output formats for scan results:
//! - Plain text for people ([`report`])
//! - JSON for automation and scripting ([`json`])
//! - Deletion commands shared by both ([`script`])
//!
//! # Example
//!
//! ```no_run
//! use hashdupe::duplicates::DuplicateFinder;
//! use hashdupe::output::{JsonOutput, TextReport};
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let (groups, summary) = finder.find_duplicates(Path::new("./sample-data")).unwrap();
//!
//! print!("{}", TextReport::new(&groups).render());
//!
//! let output = JsonOutput::new(&groups, &summary);
//! println!("{}", output.to_json_pretty().unwrap());
//! ```

pub mod json;
pub mod report;
pub mod script;

// Re-export main types
pub use json::JsonOutput;
pub use report::TextReport;
pub use script::{ScriptOutput, ScriptType};
