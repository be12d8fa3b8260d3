//! Backup, restore, and staging filesystem primitives.
//!
//! - `copy` - metadata-preserving file copy and merge-overwrite tree copy
//! - `backup` - first-snapshot-wins `.bak` files and tree snapshots
//! - `staging` - scratch directories removed unconditionally on drop
//! - `lock` - advisory per-installation lock for callers that serialize work

mod error;

pub mod backup;
pub mod copy;
pub mod lock;
pub mod staging;

pub use backup::{backup_file, backup_path, backup_tree, restore_file, restore_tree};
pub use copy::{copy_dir_merge, copy_file_preserving};
pub use error::{Error, Result};
pub use lock::InstallLock;
pub use staging::StagingArea;
