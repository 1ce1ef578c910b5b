//! CLI bootstrap - the composition root.
//!
//! The only place where infrastructure is wired together: bundle root
//! resolution, scratch space with the platform cleanup strategy, the
//! native capability probe, the detector, and the provisioner. Handlers
//! receive the composed context and delegate to it.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use nblas_core::HostProfile;
use nblas_runtime::{
    CapabilityDetector, DirBundle, NativeFlavorProbe, Provisioner, ScratchSpace,
    cleanup_strategy_for, resolve_bundle_root,
};

/// Fully composed context for CLI commands.
pub struct CliContext {
    /// Host profile derived once at startup.
    pub profile: HostProfile,
    /// Root of the on-disk resource bundle.
    pub bundle_root: PathBuf,
    /// Temp root the scratch directory lives under.
    pub scratch_parent: PathBuf,
    /// Capability detector shared with the provisioner.
    pub detector: Arc<CapabilityDetector>,
    /// The provisioner itself.
    pub provisioner: Provisioner,
}

/// Wire the provisioning context, applying the sticky flavor override
/// before anything can probe.
pub fn bootstrap(arch_flavor: Option<&str>) -> CliContext {
    let profile = HostProfile::detect();
    let bundle_root = resolve_bundle_root();
    let scratch_parent = env::temp_dir();

    let bundle = Arc::new(DirBundle::new(bundle_root.clone()));
    let scratch = Arc::new(ScratchSpace::new(
        scratch_parent.clone(),
        cleanup_strategy_for(&profile.os_family),
    ));

    let probe = Arc::new(NativeFlavorProbe::new(
        profile.clone(),
        bundle.clone(),
        scratch.clone(),
    ));
    let detector = Arc::new(CapabilityDetector::new(profile.clone(), probe));
    if let Some(flavor) = arch_flavor {
        detector.override_flavor(flavor);
    }

    let provisioner = Provisioner::new(
        profile.clone(),
        bundle,
        scratch,
        detector.clone(),
    );

    debug!(
        bundle_root = %bundle_root.display(),
        scratch_parent = %scratch_parent.display(),
        "provisioning context wired"
    );

    CliContext {
        profile,
        bundle_root,
        scratch_parent,
        detector,
        provisioner,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_applies_the_flavor_override() {
        let ctx = bootstrap(Some("sse3"));
        assert_eq!(ctx.detector.detect().as_deref(), Some("sse3"));
    }
}
