//! OS-level provisioning runtime for nblas.
//!
//! Implements the ports defined in `nblas-core`: a filesystem-backed
//! resource bundle, the process-wide scratch space with platform cleanup
//! strategies, the native capability probe and detector, and the
//! provisioner that extracts and dynamically loads native artifacts.

pub mod bundle;
pub mod detector;
pub mod extract;
pub mod layout;
pub mod probe;
pub mod provisioner;
pub mod scratch;

// Re-export the primary surface
pub use bundle::{DirBundle, resolve_bundle_root};
pub use detector::CapabilityDetector;
pub use extract::{extract_to_scratch, locate_and_extract, locate_in_bundle};
pub use layout::ResolvedLayout;
pub use probe::{NativeFlavorProbe, PROBE_LIBRARY};
pub use provisioner::{MAIN_LIBRARY, Provisioner};
pub use scratch::{
    CleanupStrategy, DeferredSweep, ImmediateCleanup, SCRATCH_DIR_PREFIX, ScratchDir,
    ScratchSpace, cleanup_strategy_for, sweep_sibling_dirs,
};
