//! Resolved-layout introspection for diagnostics.
//!
//! Captures everything the provisioner would use in one struct, for the
//! `nblas paths` command and for debugging bundle-layout issues.

use std::path::PathBuf;

use nblas_core::{HostProfile, candidate_paths};

use crate::provisioner::MAIN_LIBRARY;

/// Snapshot of the provisioning layout for the current configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLayout {
    /// Host profile the resolver keys on.
    pub profile: HostProfile,
    /// Flavor in effect (override or detected), if any.
    pub flavor: Option<String>,
    /// Root directory of the resource bundle.
    pub bundle_root: PathBuf,
    /// Temp root the scratch directory is created under.
    pub scratch_parent: PathBuf,
    /// Candidate resource paths for the main backend artifact, in probe
    /// order.
    pub main_candidates: Vec<String>,
}

impl ResolvedLayout {
    pub fn resolve(
        profile: HostProfile,
        flavor: Option<String>,
        bundle_root: PathBuf,
        scratch_parent: PathBuf,
    ) -> Self {
        let main_candidates = candidate_paths(&profile, MAIN_LIBRARY, flavor.as_deref());
        Self {
            profile,
            flavor,
            bundle_root,
            scratch_parent,
            main_candidates,
        }
    }
}

impl std::fmt::Display for ResolvedLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "os_family = {}", self.profile.os_family)?;
        writeln!(f, "arch_name = {}", self.profile.arch_name)?;
        writeln!(f, "flavor = {}", self.flavor.as_deref().unwrap_or("none"))?;
        writeln!(f, "bundle_root = {}", self.bundle_root.display())?;
        writeln!(f, "scratch_parent = {}", self.scratch_parent.display())?;
        for (index, candidate) in self.main_candidates.iter().enumerate() {
            writeln!(f, "candidate[{index}] = {candidate}")?;
        }
        Ok(())
    }
}
