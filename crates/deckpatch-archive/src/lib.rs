//! Mod archive staging with path sanitization.
//!
//! # Architecture
//!
//! - `sanitize.rs` - Path sanitization (zip-slip prevention)
//! - `stage.rs` - Extraction of a zip into a fresh staging area
//! - `report.rs` - What was written and what was refused

pub use error::{Error, Result};
pub use options::{DEFAULT_INTERNAL_PATH, StageOptions};
pub use report::{ExtractedEntry, SkippedEntry, StageReport};
pub use sanitize::{is_unsafe_entry_name, safe_join};
pub use stage::{StagedArchive, stage};

mod error;
mod options;
mod report;
mod sanitize;
mod stage;
