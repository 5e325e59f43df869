//! Local Mirror Transfer
//!
//! In-process mirror for targets without a host: staging directories on the
//! deploy machine and tests. Same contract as rsync with `--delete`, files
//! compared by content.

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::domain::entities::SyncReport;
use crate::domain::ports::{CommandRunner, SyncRequest, TransferStrategy};
use crate::domain::value_objects::ExclusionSet;
use crate::error::{DeployError, DeployResult};

/// Transfer strategy for local directories
#[derive(Debug, Default)]
pub struct LocalMirrorTransfer;

impl LocalMirrorTransfer {
    pub fn new() -> Self {
        Self
    }

    fn mirror(&self, request: &SyncRequest, apply: bool) -> DeployResult<SyncReport> {
        let source = request.source.as_path();
        let dest = Path::new(request.target.path());
        if !dest.is_dir() {
            return Err(io_error(
                dest,
                io::Error::new(io::ErrorKind::NotFound, "target directory does not exist"),
            ));
        }

        let src_tree = Tree::scan(source, &request.exclusions, Links::Skip)?;
        let dest_tree = Tree::scan(dest, &request.exclusions, Links::AsFiles)?;

        // Replacing such a directory with a file would delete excluded content.
        if let Some(file) = src_tree
            .files
            .iter()
            .find(|f| dest_tree.dirs.contains(*f) && dest_tree.holds_excluded(f))
        {
            return Err(DeployError::TransferIo {
                path: dest.join(file),
                message: "cannot replace directory holding excluded paths".to_string(),
            });
        }

        let mut report = SyncReport {
            dry_run: !apply,
            ..SyncReport::default()
        };

        for dir in &src_tree.dirs {
            let target = dest.join(dir);
            if dest_tree.files.contains(dir) {
                // file in the way of a directory
                report.deleted.push(dir.clone());
                if apply {
                    fs::remove_file(&target).map_err(|e| io_error(&target, e))?;
                }
            }
            if apply && !target.is_dir() {
                fs::create_dir_all(&target).map_err(|e| io_error(&target, e))?;
            }
        }

        for file in &src_tree.files {
            let from = source.join(file);
            let to = dest.join(file);

            if dest_tree.dirs.contains(file) {
                report.deleted.push(file.clone());
                if apply {
                    fs::remove_dir_all(&to).map_err(|e| io_error(&to, e))?;
                }
                report.created.push(file.clone());
            } else if !dest_tree.files.contains(file) {
                report.created.push(file.clone());
            } else if digest(&from)? != digest(&to)? {
                report.updated.push(file.clone());
            } else {
                report.unchanged += 1;
                continue;
            }

            if apply {
                copy_file(&from, &to)?;
            }
        }

        if request.delete {
            self.delete_extraneous(dest, &src_tree, &dest_tree, apply, &mut report)?;
        }

        tracing::debug!(
            created = report.created.len(),
            updated = report.updated.len(),
            deleted = report.deleted.len(),
            unchanged = report.unchanged,
            "local mirror"
        );
        Ok(report)
    }

    fn delete_extraneous(
        &self,
        dest: &Path,
        src_tree: &Tree,
        dest_tree: &Tree,
        apply: bool,
        report: &mut SyncReport,
    ) -> DeployResult<()> {
        for file in &dest_tree.files {
            if src_tree.files.contains(file) || src_tree.dirs.contains(file) {
                continue;
            }
            let path = dest.join(file);
            if apply {
                match fs::remove_file(&path) {
                    Ok(()) => {}
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(io_error(&path, e)),
                }
            }
            report.deleted.push(file.clone());
        }

        // Deepest first, so children go before their parents.
        for dir in dest_tree.dirs.iter().rev() {
            if src_tree.dirs.contains(dir)
                || src_tree.files.contains(dir)
                || dest_tree.holds_excluded(dir)
            {
                continue;
            }
            let path = dest.join(dir);
            if apply {
                match fs::remove_dir(&path) {
                    Ok(()) => {}
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => {
                        tracing::warn!(dir = %path.display(), error = %e, "could not remove directory");
                        continue;
                    }
                }
            }
            report.deleted.push(dir.clone());
        }

        Ok(())
    }
}

impl TransferStrategy for LocalMirrorTransfer {
    fn name(&self) -> &'static str {
        "local"
    }

    fn transfer(&self, request: &SyncRequest, runner: &dyn CommandRunner) -> DeployResult<SyncReport> {
        self.mirror(request, !runner.is_dry_run())
    }

    fn plan(&self, request: &SyncRequest, _runner: &dyn CommandRunner) -> DeployResult<SyncReport> {
        self.mirror(request, false)
    }
}

/// What a scan does with symbolic links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Links {
    /// Leave them out, as rsync does without `-l`
    Skip,
    /// Record them as plain files so they can be replaced or deleted
    AsFiles,
}

/// Non-excluded entries of one side of the mirror, relative to its root.
#[derive(Debug, Default)]
struct Tree {
    files: BTreeSet<PathBuf>,
    /// Sorted so that parents come before children
    dirs: BTreeSet<PathBuf>,
    /// Directories with an excluded entry somewhere below them
    excluded_parents: BTreeSet<PathBuf>,
}

impl Tree {
    fn scan(root: &Path, exclusions: &ExclusionSet, links: Links) -> DeployResult<Self> {
        let mut tree = Tree::default();
        tree.walk(root, Path::new(""), exclusions, links)?;
        Ok(tree)
    }

    fn walk(
        &mut self,
        root: &Path,
        rel: &Path,
        exclusions: &ExclusionSet,
        links: Links,
    ) -> DeployResult<()> {
        let dir = root.join(rel);
        let mut entries = fs::read_dir(&dir)
            .map_err(|e| io_error(&dir, e))?
            .collect::<io::Result<Vec<_>>>()
            .map_err(|e| io_error(&dir, e))?;
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let rel_path = rel.join(entry.file_name());
            let path = entry.path();
            let metadata = fs::symlink_metadata(&path).map_err(|e| io_error(&path, e))?;
            if metadata.file_type().is_symlink() && links == Links::Skip {
                tracing::warn!(path = %path.display(), "skipping symlink");
                continue;
            }
            let is_dir = metadata.is_dir();

            if exclusions.is_excluded(&rel_path, is_dir) {
                tracing::trace!(path = %rel_path.display(), "excluded");
                self.mark_excluded(&rel_path);
                continue;
            }

            if is_dir {
                self.dirs.insert(rel_path.clone());
                self.walk(root, &rel_path, exclusions, links)?;
            } else {
                self.files.insert(rel_path);
            }
        }
        Ok(())
    }

    fn mark_excluded(&mut self, rel_path: &Path) {
        for ancestor in rel_path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.excluded_parents.insert(ancestor.to_path_buf());
        }
    }

    fn holds_excluded(&self, dir: &Path) -> bool {
        self.excluded_parents.contains(dir)
    }
}

fn digest(path: &Path) -> DeployResult<Vec<u8>> {
    let mut file = File::open(path).map_err(|e| io_error(path, e))?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher).map_err(|e| io_error(path, e))?;
    Ok(hasher.finalize().to_vec())
}

/// Copy content and permissions, then carry over the modification time.
fn copy_file(from: &Path, to: &Path) -> DeployResult<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }
    if fs::symlink_metadata(to).is_ok_and(|m| m.file_type().is_symlink()) {
        fs::remove_file(to).map_err(|e| io_error(to, e))?;
    }
    fs::copy(from, to).map_err(|e| io_error(to, e))?;

    let modified = fs::metadata(from)
        .and_then(|m| m.modified())
        .map_err(|e| io_error(from, e))?;
    File::options()
        .write(true)
        .open(to)
        .and_then(|f| f.set_modified(modified))
        .map_err(|e| io_error(to, e))?;
    Ok(())
}

fn io_error(path: &Path, err: io::Error) -> DeployError {
    DeployError::TransferIo {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
