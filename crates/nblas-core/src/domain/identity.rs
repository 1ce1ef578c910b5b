//! Artifact identity and extraction records.

use std::path::PathBuf;

use super::host::HostProfile;

/// Whether a native artifact statically links its own dependencies or
/// expects them resolved by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Linkage {
    Static,
    Dynamic,
}

impl Linkage {
    /// Candidate enumeration order. Static is preferred when both variants
    /// exist in the bundle; this ordering is a contract.
    pub const ORDERED: [Self; 2] = [Self::Static, Self::Dynamic];

    /// Directory segment used in resource-bundle paths.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Dynamic => "dynamic",
        }
    }
}

/// Identifies one candidate native artifact. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryIdentity {
    /// Logical library name without platform prefix/suffix.
    pub base_name: String,
    /// Linkage mode of this candidate.
    pub linkage: Linkage,
    /// Instruction-set flavor segment, omitted entirely when absent.
    pub flavor: Option<String>,
}

impl LibraryIdentity {
    pub fn new(base_name: impl Into<String>, linkage: Linkage, flavor: Option<&str>) -> Self {
        Self {
            base_name: base_name.into(),
            linkage,
            flavor: flavor.map(str::to_string),
        }
    }

    /// Resource-bundle path of this candidate for the given host, with
    /// `filename` already mapped to the platform convention.
    ///
    /// Template: `/lib/{linkage}/{os_family}/{arch}/[{flavor}/]{filename}`.
    pub fn resource_path(&self, profile: &HostProfile, filename: &str) -> String {
        let mut path = format!(
            "/lib/{}/{}/{}/",
            self.linkage.as_str(),
            profile.os_family.dir_name(),
            profile.arch_name
        );
        if let Some(flavor) = &self.flavor {
            path.push_str(flavor);
            path.push('/');
        }
        path.push_str(filename);
        path
    }
}

/// Record of one completed extraction. Transient; lives only for the
/// duration of a provisioning call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedArtifact {
    /// Resource path the bytes were read from.
    pub source_path: String,
    /// Scratch file the bytes were written to.
    pub destination: PathBuf,
    /// Number of bytes copied.
    pub byte_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_is_enumerated_before_dynamic() {
        assert_eq!(Linkage::ORDERED, [Linkage::Static, Linkage::Dynamic]);
    }

    #[test]
    fn resource_path_includes_flavor_segment_when_present() {
        let profile = HostProfile::from_raw("linux", "x86_64");
        let identity = LibraryIdentity::new("nblas", Linkage::Static, Some("sse3"));
        assert_eq!(
            identity.resource_path(&profile, "libnblas.so"),
            "/lib/static/Linux/x86_64/sse3/libnblas.so"
        );
    }

    #[test]
    fn resource_path_omits_flavor_segment_when_absent() {
        let profile = HostProfile::from_raw("linux", "x86_64");
        let identity = LibraryIdentity::new("nblas", Linkage::Dynamic, None);
        assert_eq!(
            identity.resource_path(&profile, "libnblas.so"),
            "/lib/dynamic/Linux/x86_64/libnblas.so"
        );
    }
}
