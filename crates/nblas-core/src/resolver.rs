//! Pure candidate-path resolver.
//!
//! Given a logical library name and an optional flavor, produces the ordered
//! list of resource-bundle paths a provisioner should probe. No filesystem
//! or bundle access happens here; this is pure path construction, which is
//! what makes the ordering and determinism properties unit-testable.

use crate::domain::{HostProfile, LibraryIdentity, Linkage, OsFamily};

/// Map a logical library name to the platform-conventional shared-library
/// filename (`lib` prefix and `.so`/`.dll`/`.dylib` suffix rules live here,
/// not in extraction).
pub fn mapped_library_name(profile: &HostProfile, base_name: &str) -> String {
    match profile.os_family {
        OsFamily::Windows => format!("{base_name}.dll"),
        OsFamily::MacOs => format!("lib{base_name}.dylib"),
        OsFamily::Linux | OsFamily::Other(_) => format!("lib{base_name}.so"),
    }
}

/// macOS ships two dynamic-library suffix conventions depending on platform
/// version. Returns the sibling spelling of `filename`, or `None` when no
/// rewrite applies. The provisioner tries this as a final extraction-time
/// fallback; it is never a path-candidate concern.
pub fn alternate_library_name(filename: &str) -> Option<String> {
    if let Some(stem) = filename.strip_suffix(".dylib") {
        Some(format!("{stem}.jnilib"))
    } else {
        filename
            .strip_suffix(".jnilib")
            .map(|stem| format!("{stem}.dylib"))
    }
}

/// Ordered candidate resource paths for `base_name`, static linkage strictly
/// before dynamic. A pure function of its inputs: identical arguments always
/// yield identical sequences.
pub fn candidate_paths(
    profile: &HostProfile,
    base_name: &str,
    flavor: Option<&str>,
) -> Vec<String> {
    let filename = mapped_library_name(profile, base_name);
    candidate_paths_for_filename(profile, base_name, &filename, flavor)
}

/// Same as [`candidate_paths`], but with the platform filename already
/// mapped. Used by the provisioner when retrying under the macOS alternate
/// suffix.
pub fn candidate_paths_for_filename(
    profile: &HostProfile,
    base_name: &str,
    filename: &str,
    flavor: Option<&str>,
) -> Vec<String> {
    Linkage::ORDERED
        .iter()
        .map(|&linkage| {
            LibraryIdentity::new(base_name, linkage, flavor).resource_path(profile, filename)
        })
        .collect()
}
