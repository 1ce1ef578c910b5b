//! Cleanup strategies for the scratch directory.
//!
//! The platform branch is a single construction-time decision: families
//! whose loader does not lock loaded files sweep their own directory on
//! normal termination; the Windows family cannot (the OS refuses to remove
//! a file that is memory-mapped by the loader), so it hands cleanup off to
//! whichever process runs next via a prefixed-sibling sweep.
//!
//! Every failure in here is logged and swallowed. Cleanup is best-effort;
//! it must never prevent the primary capability from being usable, and
//! leftover directories after an abrupt kill are an accepted, bounded cost.

use std::path::Path;
use std::time::Duration;
use std::{fs, thread};

use tracing::{debug, warn};

use nblas_core::OsFamily;

use super::SCRATCH_DIR_PREFIX;

/// Grace period before the deferred sweep scans the temp root. Heuristic
/// concurrency control only, not a correctness guarantee.
const SWEEP_GRACE: Duration = Duration::from_secs(1);

/// One cleanup policy, installed once per process.
pub trait CleanupStrategy: Send + Sync {
    /// Called once, right after the scratch directory is created.
    fn register(&self, dir: &Path, parent: &Path);

    /// Called when the owning context is dropped (normal termination).
    fn on_exit(&self, dir: &Path);
}

/// Select the strategy for the host OS family.
pub fn cleanup_strategy_for(family: &OsFamily) -> Box<dyn CleanupStrategy> {
    if family.locks_loaded_libraries() {
        Box::new(DeferredSweep)
    } else {
        Box::new(ImmediateCleanup)
    }
}

/// Own-directory sweep on normal termination, for families where loaded
/// files can be deleted by the loading process.
pub struct ImmediateCleanup;

impl CleanupStrategy for ImmediateCleanup {
    fn register(&self, dir: &Path, _parent: &Path) {
        debug!(dir = %dir.display(), "immediate cleanup registered");
    }

    fn on_exit(&self, dir: &Path) {
        remove_dir_files(dir);
        if let Err(e) = fs::remove_dir(dir) {
            warn!(dir = %dir.display(), error = %e, "failed to remove scratch directory");
        }
    }
}

/// Eventually-consistent sweep of *sibling* scratch directories, for the
/// Windows family. The loading process cannot delete its own artifacts, so
/// a detached thread sleeps out a grace period and then clears directories
/// left behind by earlier processes, skipping this process's own.
pub struct DeferredSweep;

impl CleanupStrategy for DeferredSweep {
    fn register(&self, dir: &Path, parent: &Path) {
        let own = dir.to_path_buf();
        let parent = parent.to_path_buf();
        let spawned = thread::Builder::new()
            .name("nblas-scratch-sweep".to_string())
            .spawn(move || {
                thread::sleep(SWEEP_GRACE);
                sweep_sibling_dirs(&parent, &own);
            });
        if let Err(e) = spawned {
            warn!(error = %e, "failed to spawn deferred scratch sweep");
        }
    }

    fn on_exit(&self, dir: &Path) {
        // Loaded files stay locked until the process dies; a later
        // process's sweep will reclaim this directory.
        debug!(dir = %dir.display(), "leaving scratch directory for a later sweep");
    }
}

/// Delete the contents of every prefixed sibling scratch directory under
/// `parent`, skipping `skip` (the current process's own directory).
/// Best-effort: every failure is logged and swallowed.
pub fn sweep_sibling_dirs(parent: &Path, skip: &Path) {
    let entries = match fs::read_dir(parent) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(parent = %parent.display(), error = %e, "scratch sweep could not read temp root");
            return;
        }
    };

    for entry in entries.filter_map(Result::ok) {
        let path = entry.path();
        if path == skip || !is_scratch_dir(&path) {
            continue;
        }

        debug!(dir = %path.display(), "sweeping leftover scratch directory");
        remove_dir_files(&path);
        // Removing the directory itself can still fail if another process
        // holds files open; it will be retried by the next sweep.
        if let Err(e) = fs::remove_dir(&path) {
            warn!(dir = %path.display(), error = %e, "leftover scratch directory not removed; left for the next sweep");
        }
    }
}

fn is_scratch_dir(path: &Path) -> bool {
    path.is_dir()
        && path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(SCRATCH_DIR_PREFIX))
}

/// Delete every file directly under `dir`, logging each failure but never
/// aborting the sweep of remaining files.
fn remove_dir_files(dir: &Path) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "failed to list scratch directory");
            return;
        }
    };

    for entry in entries.filter_map(Result::ok) {
        let path = entry.path();
        if let Err(e) = fs::remove_file(&path) {
            warn!(file = %path.display(), error = %e, "failed to remove extracted artifact");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn make_scratch_dir(parent: &Path, name: &str, files: &[&str]) -> PathBuf {
        let dir = parent.join(name);
        fs::create_dir(&dir).expect("create dir");
        for file in files {
            fs::write(dir.join(file), b"leftover").expect("write file");
        }
        dir
    }

    #[test]
    fn sweep_removes_siblings_and_skips_own_directory() {
        let parent = tempfile::tempdir().expect("tempdir");
        let dead = make_scratch_dir(parent.path(), "nblas424242_1", &["libnblas.so"]);
        let own = make_scratch_dir(parent.path(), "nblas424243_2", &["libnblas.so"]);

        sweep_sibling_dirs(parent.path(), &own);

        assert!(!dead.exists(), "dead sibling should be removed");
        assert!(own.join("libnblas.so").exists(), "own directory untouched");
    }

    #[test]
    fn sweep_ignores_unprefixed_directories() {
        let parent = tempfile::tempdir().expect("tempdir");
        let unrelated = make_scratch_dir(parent.path(), "other_tool_tmp", &["data.bin"]);
        let own = make_scratch_dir(parent.path(), "nblas1_1", &[]);

        sweep_sibling_dirs(parent.path(), &own);

        assert!(unrelated.join("data.bin").exists());
    }

    #[test]
    fn unremovable_sibling_directory_is_swallowed() {
        let parent = tempfile::tempdir().expect("tempdir");
        let dead = make_scratch_dir(parent.path(), "nblas424242_1", &["libnblas.so"]);
        // A nested directory keeps remove_dir failing after the file sweep.
        fs::create_dir(dead.join("nested")).expect("create nested");
        let own = make_scratch_dir(parent.path(), "nblas424243_2", &[]);

        sweep_sibling_dirs(parent.path(), &own);

        assert!(!dead.join("libnblas.so").exists(), "files still swept");
        assert!(dead.exists(), "non-empty directory left for the next sweep");
    }

    #[test]
    fn sweep_of_missing_parent_is_swallowed() {
        let parent = tempfile::tempdir().expect("tempdir");
        let gone = parent.path().join("missing");
        // Must not panic or error out.
        sweep_sibling_dirs(&gone, &parent.path().join("nblas1_1"));
    }
}
