//! Filesystem-backed resource bundle.
//!
//! Production bundles are directory trees laid out exactly like the
//! resource paths the resolver produces:
//! `/lib/{static|dynamic}/{os_family}/{arch}/[{flavor}/]{filename}`.

use std::env;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use nblas_core::ResourceBundle;

/// Environment variable overriding the bundle root directory.
pub const BUNDLE_DIR_ENV: &str = "NBLAS_RESOURCE_DIR";

/// Bundle rooted at a directory on disk.
#[derive(Debug, Clone)]
pub struct DirBundle {
    root: PathBuf,
}

impl DirBundle {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The directory this bundle reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resource paths always use `/` separators; rebuild them with the
    /// platform separator under the root.
    fn on_disk(&self, path: &str) -> PathBuf {
        path.trim_start_matches('/')
            .split('/')
            .fold(self.root.clone(), |acc, segment| acc.join(segment))
    }
}

impl ResourceBundle for DirBundle {
    fn open(&self, path: &str) -> Option<Box<dyn Read + Send>> {
        let on_disk = self.on_disk(path);
        File::open(on_disk)
            .ok()
            .map(|file| Box::new(file) as Box<dyn Read + Send>)
    }
}

/// Resolve the default on-disk bundle root.
///
/// Resolution order:
/// 1. `NBLAS_RESOURCE_DIR` environment variable
/// 2. The directory containing the current executable, if it has a `lib/`
///    subtree (the layout produced by the release bundler)
/// 3. The platform data directory (e.g. `~/.local/share/nblas`)
/// 4. The executable directory regardless, as a last resort
///
/// Best-effort: a wrong root simply surfaces later as `LibraryNotFound`,
/// which names the file that was sought.
pub fn resolve_bundle_root() -> PathBuf {
    if let Ok(path) = env::var(BUNDLE_DIR_ENV) {
        debug!(path = %path, "bundle root from environment");
        return PathBuf::from(path);
    }

    let exe_dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));

    if let Some(dir) = &exe_dir {
        if dir.join("lib").is_dir() {
            debug!(path = %dir.display(), "bundle root adjacent to executable");
            return dir.clone();
        }
    }

    if let Some(data_dir) = dirs::data_local_dir() {
        let root = data_dir.join("nblas");
        if root.is_dir() {
            debug!(path = %root.display(), "bundle root in platform data directory");
            return root;
        }
    }

    exe_dir.unwrap_or_else(|| PathBuf::from("."))
}
