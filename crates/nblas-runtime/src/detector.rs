//! Host CPU capability detection.
//!
//! Wraps the capability probe with the platform rules for when probing is
//! worthwhile, and caches the outcome for process lifetime.

use std::sync::{Arc, OnceLock};

use tracing::debug;

use nblas_core::{CapabilityProbe, Flavor, HostProfile, OsFamily};

/// Detects the host's instruction-set flavor, with a sticky manual
/// override.
///
/// The flavor is a process-scoped value set at most once: explicitly via
/// [`CapabilityDetector::override_flavor`], or computed lazily on the first
/// [`CapabilityDetector::detect`]. Subsequent reads return the cached
/// value, so the native probe runs at most once even under concurrent
/// callers.
///
/// Known race, inherited and documented rather than silently handled: an
/// `override_flavor` call racing a concurrent first `detect` is
/// unspecified. Overrides are only honored when they happen-before any
/// `detect` call that depends on them; apply them during startup, before
/// provisioning begins.
pub struct CapabilityDetector {
    profile: HostProfile,
    probe: Arc<dyn CapabilityProbe>,
    sticky: OnceLock<Option<String>>,
}

impl CapabilityDetector {
    pub fn new(profile: HostProfile, probe: Arc<dyn CapabilityProbe>) -> Self {
        Self {
            profile,
            probe,
            sticky: OnceLock::new(),
        }
    }

    /// Force a flavor for the remainder of the process. No validation is
    /// performed here; an illegal value simply won't resolve in the
    /// bundle. Ignored if a value (override or detected) is already set.
    pub fn override_flavor(&self, flavor: &str) {
        if self
            .sticky
            .set(Some(flavor.to_string()))
            .is_ok()
        {
            debug!(flavor, "architecture flavor overridden");
        } else {
            debug!(flavor, "flavor already fixed; override ignored");
        }
    }

    /// The host's flavor, or `None` for platforms that intentionally ship
    /// unflavored builds.
    pub fn detect(&self) -> Option<String> {
        self.sticky.get_or_init(|| self.compute()).clone()
    }

    /// The sticky value if one has been set or computed. Never probes;
    /// for diagnostics that must stay side-effect free.
    pub fn cached(&self) -> Option<Option<String>> {
        self.sticky.get().cloned()
    }

    fn compute(&self) -> Option<String> {
        // 64-bit x86 Windows intentionally skips flavor-specific builds.
        // A build-matrix rule, distinct from the Windows file-locking
        // cleanup policy.
        if self.profile.os_family == OsFamily::Windows && self.profile.is_x86_64() {
            debug!("64-bit x86 Windows host; using unflavored builds");
            return None;
        }

        if !self.profile.is_x86_family() {
            debug!(arch = %self.profile.arch_name, "non-x86 architecture; no flavor");
            return None;
        }

        // Unknown codes and probe failure both mean "no flavor".
        let flavor = self
            .probe
            .flavor_code()
            .and_then(Flavor::from_probe_code)
            .map(|f| f.as_str().to_string());
        debug!(flavor = flavor.as_deref().unwrap_or("none"), "capability probe completed");
        flavor
    }
}

impl std::fmt::Debug for CapabilityDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityDetector")
            .field("profile", &self.profile)
            .field("sticky", &self.sticky.get())
            .finish_non_exhaustive()
    }
}
