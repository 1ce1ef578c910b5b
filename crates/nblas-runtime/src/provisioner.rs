//! Native capability provisioning.
//!
//! Orchestrates detection, candidate resolution, bundle lookup, extraction
//! to scratch, and the process-wide dynamic load. Provisioning the same
//! name is once-per-process: the first call does the work and every later
//! or concurrent call for that name observes the first outcome, success or
//! the identical stored failure.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info};

use nblas_core::{Flavor, HostProfile, ProvisionError, ResourceBundle};

use crate::detector::CapabilityDetector;
use crate::extract::locate_and_extract;
use crate::scratch::ScratchSpace;

/// Base name of the main numeric backend artifact.
pub const MAIN_LIBRARY: &str = "nblas";

/// A successfully loaded artifact. The library handle is retained for
/// process lifetime; dropping it would unload the backend under callers
/// holding its entry points.
struct LoadedArtifact {
    filename: String,
    library: libloading::Library,
}

/// Makes named native capabilities available to the process.
pub struct Provisioner {
    profile: HostProfile,
    bundle: Arc<dyn ResourceBundle>,
    scratch: Arc<ScratchSpace>,
    detector: Arc<CapabilityDetector>,
    loaded: Mutex<HashMap<String, Result<LoadedArtifact, ProvisionError>>>,
}

impl Provisioner {
    pub fn new(
        profile: HostProfile,
        bundle: Arc<dyn ResourceBundle>,
        scratch: Arc<ScratchSpace>,
        detector: Arc<CapabilityDetector>,
    ) -> Self {
        Self {
            profile,
            bundle,
            scratch,
            detector,
            loaded: Mutex::new(HashMap::new()),
        }
    }

    /// Make the named capability available: detect the flavor (when
    /// `with_probe`), resolve candidates static-before-dynamic, extract
    /// the first bundle hit into scratch, and load it process-wide.
    ///
    /// All failures are typed and surfaced to the caller; a caller that
    /// requires this capability must treat them as fatal.
    pub fn provision(&self, base_name: &str, with_probe: bool) -> Result<(), ProvisionError> {
        let mut loaded = self
            .loaded
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(outcome) = loaded.get(base_name) {
            debug!(base_name, "already provisioned; returning stored outcome");
            return match outcome {
                Ok(_) => Ok(()),
                Err(e) => Err(e.clone()),
            };
        }

        // The lock is held across the work: concurrent callers for the
        // same name block here and then observe the stored outcome.
        let outcome = self.provision_uncached(base_name, with_probe);
        let result = outcome.as_ref().map(|_| ()).map_err(Clone::clone);
        loaded.insert(base_name.to_string(), outcome);
        result
    }

    /// Resolve an entry point in a previously provisioned artifact.
    #[allow(unsafe_code)]
    pub fn symbol_address(
        &self,
        base_name: &str,
        symbol: &str,
    ) -> Result<*const (), ProvisionError> {
        let loaded = self
            .loaded
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let Some(Ok(artifact)) = loaded.get(base_name) else {
            return Err(ProvisionError::NotProvisioned {
                base_name: base_name.to_string(),
            });
        };

        // Safety: only the symbol's address is taken here; it is never
        // called through this pointer type.
        let address = unsafe {
            artifact
                .library
                .get::<unsafe extern "C" fn()>(symbol.as_bytes())
                .map(|entry| *entry as *const ())
        };
        address.map_err(|_| ProvisionError::SymbolNotFound {
            symbol: symbol.to_string(),
            filename: artifact.filename.clone(),
        })
    }

    #[allow(unsafe_code)]
    fn provision_uncached(
        &self,
        base_name: &str,
        with_probe: bool,
    ) -> Result<LoadedArtifact, ProvisionError> {
        let flavor = if with_probe {
            self.detector.detect()
        } else {
            None
        };

        // The SSE2 tier was dropped in 1.2.0; it must never reach
        // extraction.
        if flavor.as_deref() == Some(Flavor::Sse2.as_str()) {
            return Err(ProvisionError::UnsupportedArchitecture {
                flavor: Flavor::Sse2.as_str().to_string(),
            });
        }

        debug!(
            base_name,
            flavor = flavor.as_deref().unwrap_or("none"),
            "provisioning native library"
        );

        let artifact = locate_and_extract(
            self.bundle.as_ref(),
            &self.scratch,
            &self.profile,
            base_name,
            flavor.as_deref(),
        )?;
        let filename = artifact
            .destination
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| base_name.to_string());

        // Safety: the file was just written byte-for-byte from the
        // packaged artifact for this platform; the loader rejects anything
        // it cannot map, and that rejection is surfaced verbatim.
        let library = unsafe { libloading::Library::new(&artifact.destination) }.map_err(|e| {
            ProvisionError::NativeLoad {
                filename: filename.clone(),
                message: e.to_string(),
            }
        })?;

        info!(
            base_name,
            path = %artifact.destination.display(),
            byte_count = artifact.byte_count,
            "native library loaded"
        );
        Ok(LoadedArtifact { filename, library })
    }
}

impl std::fmt::Debug for Provisioner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provisioner")
            .field("profile", &self.profile)
            .finish_non_exhaustive()
    }
}
