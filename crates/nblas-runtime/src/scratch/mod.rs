//! Process-wide scratch space for extracted native artifacts.
//!
//! Created lazily, at most once per process, under the platform temp root.
//! Every extracted artifact lives directly under it, named with the
//! platform-conventional library filename (no subdirectories). The
//! directory name carries a fixed, greppable prefix so a later process's
//! deferred sweep can find leftovers.

mod cleanup;

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};
use std::{fs, process};

use tracing::{debug, error};

use nblas_core::ProvisionError;

pub use cleanup::{
    CleanupStrategy, DeferredSweep, ImmediateCleanup, cleanup_strategy_for, sweep_sibling_dirs,
};

/// Fixed prefix of every scratch directory name. The deferred sweep greps
/// the temp root for this.
pub const SCRATCH_DIR_PREFIX: &str = "nblas";

/// The scratch directory record: path plus ownership metadata.
#[derive(Debug, Clone)]
pub struct ScratchDir {
    /// Absolute path of the directory.
    pub path: PathBuf,
    /// When the directory was created.
    pub created_at: SystemTime,
    /// PID of the process that created (and owns) the directory.
    pub owner_pid: u32,
}

/// Process-scoped scratch space. Construct once at startup and share by
/// reference; the initialization barrier is a [`OnceLock`], not per-call
/// locking.
pub struct ScratchSpace {
    parent: PathBuf,
    strategy: Box<dyn CleanupStrategy>,
    dir: OnceLock<Result<ScratchDir, ProvisionError>>,
    cleanup_registered: OnceLock<()>,
}

impl ScratchSpace {
    /// Scratch space rooted under `parent` (normally [`std::env::temp_dir`])
    /// with the cleanup strategy chosen once for the host OS family.
    pub fn new(parent: PathBuf, strategy: Box<dyn CleanupStrategy>) -> Self {
        Self {
            parent,
            strategy,
            dir: OnceLock::new(),
            cleanup_registered: OnceLock::new(),
        }
    }

    /// The temp root this scratch space lives under.
    pub fn parent(&self) -> &Path {
        &self.parent
    }

    /// Create the scratch directory on first call and return its path on
    /// every call. Creation failure (including a name collision) is
    /// unrecoverable: there is no safe degraded mode without a scratch
    /// directory, so the stored error is returned to every caller.
    pub fn ensure_created(&self) -> Result<&Path, ProvisionError> {
        let outcome = self.dir.get_or_init(|| self.create_dir());
        match outcome {
            Ok(dir) => {
                self.register_cleanup();
                Ok(&dir.path)
            }
            Err(e) => Err(e.clone()),
        }
    }

    /// Install the cleanup strategy, at most once per process. Called
    /// automatically when the directory is first created; safe to call
    /// again explicitly. A call before the directory exists is a no-op
    /// and does not consume the once-guard: installation happens at
    /// creation time instead.
    pub fn register_cleanup(&self) {
        if let Some(Ok(dir)) = self.dir.get() {
            self.cleanup_registered
                .get_or_init(|| self.strategy.register(&dir.path, &self.parent));
        }
    }

    /// Path of the scratch directory, if it has been created.
    pub fn dir(&self) -> Option<&Path> {
        match self.dir.get() {
            Some(Ok(dir)) => Some(&dir.path),
            _ => None,
        }
    }

    fn create_dir(&self) -> Result<ScratchDir, ProvisionError> {
        let owner_pid = process::id();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let path = self
            .parent
            .join(format!("{SCRATCH_DIR_PREFIX}{owner_pid}_{nanos}"));

        // create_dir, not create_dir_all: a pre-existing directory for this
        // process id means leftover state we must not silently adopt.
        if let Err(e) = fs::create_dir(&path) {
            error!(
                path = %path.display(),
                error = %e,
                "failed to create scratch directory; cannot provision native artifacts"
            );
            return Err(ProvisionError::Extraction {
                path: path.clone(),
                reason: e.to_string(),
            });
        }

        debug!(path = %path.display(), owner_pid, "created scratch directory");
        Ok(ScratchDir {
            path,
            created_at: SystemTime::now(),
            owner_pid,
        })
    }
}

impl Drop for ScratchSpace {
    /// Normal-termination hook: the immediate strategy sweeps the
    /// directory here, the deferred strategy leaves it for a later
    /// process's sibling sweep.
    fn drop(&mut self) {
        if let Some(Ok(dir)) = self.dir.get() {
            self.strategy.on_exit(&dir.path);
        }
    }
}

impl std::fmt::Debug for ScratchSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScratchSpace")
            .field("parent", &self.parent)
            .field("dir", &self.dir.get())
            .finish_non_exhaustive()
    }
}
