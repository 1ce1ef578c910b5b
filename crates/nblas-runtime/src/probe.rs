//! Native capability probe.
//!
//! Bootstrap load: before any flavored artifact can be selected, the
//! unflavored probe library is extracted and loaded, and its single entry
//! point is called to report the host CPU feature level. Every failure
//! along the way degrades to "no flavor" rather than erroring; flavored
//! builds are an optimization, not a requirement.

use std::sync::Arc;

use tracing::debug;

use nblas_core::{CapabilityProbe, HostProfile, ResourceBundle};

use crate::extract::locate_and_extract;
use crate::scratch::ScratchSpace;

/// Base name of the bundled probe artifact (always unflavored).
pub const PROBE_LIBRARY: &str = "nblas_arch_flavor";

/// Entry point exported by the probe artifact.
const PROBE_SYMBOL: &[u8] = b"nblas_arch_flavor";

/// Probe implementation backed by the real bundled native artifact.
pub struct NativeFlavorProbe {
    profile: HostProfile,
    bundle: Arc<dyn ResourceBundle>,
    scratch: Arc<ScratchSpace>,
}

impl NativeFlavorProbe {
    pub fn new(
        profile: HostProfile,
        bundle: Arc<dyn ResourceBundle>,
        scratch: Arc<ScratchSpace>,
    ) -> Self {
        Self {
            profile,
            bundle,
            scratch,
        }
    }
}

impl CapabilityProbe for NativeFlavorProbe {
    #[allow(unsafe_code)]
    fn flavor_code(&self) -> Option<i32> {
        let artifact = match locate_and_extract(
            self.bundle.as_ref(),
            &self.scratch,
            &self.profile,
            PROBE_LIBRARY,
            None,
        ) {
            Ok(artifact) => artifact,
            Err(e) => {
                debug!(error = %e, "capability probe artifact unavailable");
                return None;
            }
        };

        // Safety: the extracted file is the probe artifact shipped with
        // this build; its only export takes no arguments and returns i32.
        let code = unsafe {
            let library = match libloading::Library::new(&artifact.destination) {
                Ok(library) => library,
                Err(e) => {
                    debug!(error = %e, "capability probe failed to load");
                    return None;
                }
            };
            let probe_fn = match library.get::<unsafe extern "C" fn() -> i32>(PROBE_SYMBOL) {
                Ok(probe_fn) => probe_fn,
                Err(e) => {
                    debug!(error = %e, "capability probe entry point missing");
                    return None;
                }
            };
            probe_fn()
        };

        debug!(code, "native capability probe returned");
        Some(code)
    }
}

impl std::fmt::Debug for NativeFlavorProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeFlavorProbe")
            .field("profile", &self.profile)
            .finish_non_exhaustive()
    }
}
