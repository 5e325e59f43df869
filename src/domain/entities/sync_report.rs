//! Sync report entity

use std::path::PathBuf;

/// Changes a mirror sync made (or would make) to the destination tree.
///
/// Paths are relative to the deployment root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Files that did not exist at the destination
    pub created: Vec<PathBuf>,
    /// Files whose content differed
    pub updated: Vec<PathBuf>,
    /// Destination-only files and directories that were removed
    pub deleted: Vec<PathBuf>,
    /// Files already identical
    pub unchanged: usize,
    /// True when the report describes a preview, not applied changes
    pub dry_run: bool,
}

impl SyncReport {
    /// Number of created, updated and deleted entries.
    pub fn change_count(&self) -> usize {
        self.created.len() + self.updated.len() + self.deleted.len()
    }

    /// True when the destination already mirrors the source.
    pub fn is_noop(&self) -> bool {
        self.change_count() == 0
    }
}
