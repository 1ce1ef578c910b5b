//! Locating artifacts in the resource bundle and copying them to scratch.
//!
//! Shared by the provisioner and the bootstrap capability probe, which
//! performs the same locate/extract sequence for the unflavored probe
//! artifact before any flavored load can happen.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};

use tracing::{debug, error};

use nblas_core::{
    ExtractedArtifact, HostProfile, ProvisionError, ResourceBundle, alternate_library_name,
    candidate_paths_for_filename, mapped_library_name,
};

use crate::scratch::ScratchSpace;

/// Probe the bundle at each candidate path, in order. First hit wins:
/// candidate lists are ordered static-before-dynamic, so a static-linked
/// variant is preferred whenever both exist. Misses are silent.
pub fn locate_in_bundle(
    bundle: &dyn ResourceBundle,
    candidates: &[String],
) -> Option<(String, Box<dyn Read + Send>)> {
    for path in candidates {
        debug!(path = %path, "probing resource bundle");
        if let Some(reader) = bundle.open(path) {
            debug!(path = %path, "resource bundle hit");
            return Some((path.clone(), reader));
        }
    }
    None
}

/// Buffered, byte-exact copy of `reader` into the scratch directory under
/// `filename`. Creates the scratch directory on first use.
pub fn extract_to_scratch(
    scratch: &ScratchSpace,
    source_path: &str,
    filename: &str,
    mut reader: Box<dyn Read + Send>,
) -> Result<ExtractedArtifact, ProvisionError> {
    let dir = scratch.ensure_created()?;
    let destination = dir.join(filename);

    let extraction_failed = |e: &io::Error| {
        error!(
            destination = %destination.display(),
            error = %e,
            "failed to extract native artifact"
        );
        ProvisionError::Extraction {
            path: destination.clone(),
            reason: e.to_string(),
        }
    };

    let file = File::create(&destination).map_err(|e| extraction_failed(&e))?;
    let mut writer = BufWriter::new(file);
    let byte_count = io::copy(&mut reader, &mut writer).map_err(|e| extraction_failed(&e))?;
    writer.flush().map_err(|e| extraction_failed(&e))?;

    debug!(
        source = %source_path,
        destination = %destination.display(),
        byte_count,
        "extracted native artifact"
    );

    Ok(ExtractedArtifact {
        source_path: source_path.to_string(),
        destination,
        byte_count,
    })
}

/// Full locate-and-extract sequence for one logical library: map the
/// platform filename, walk the resolver's candidates, and as a final
/// fallback retry under the macOS alternate suffix. Misses everywhere
/// yield [`ProvisionError::LibraryNotFound`] naming the sought filename.
pub fn locate_and_extract(
    bundle: &dyn ResourceBundle,
    scratch: &ScratchSpace,
    profile: &HostProfile,
    base_name: &str,
    flavor: Option<&str>,
) -> Result<ExtractedArtifact, ProvisionError> {
    let filename = mapped_library_name(profile, base_name);
    let candidates = candidate_paths_for_filename(profile, base_name, &filename, flavor);
    if let Some((path, reader)) = locate_in_bundle(bundle, &candidates) {
        return extract_to_scratch(scratch, &path, &filename, reader);
    }

    // Final fallback: the other macOS dynamic-library suffix.
    if let Some(alternate) = alternate_library_name(&filename) {
        debug!(filename = %alternate, "retrying under alternate library suffix");
        let candidates = candidate_paths_for_filename(profile, base_name, &alternate, flavor);
        if let Some((path, reader)) = locate_in_bundle(bundle, &candidates) {
            return extract_to_scratch(scratch, &path, &alternate, reader);
        }
    }

    Err(ProvisionError::LibraryNotFound { filename })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scratch::ImmediateCleanup;
    use nblas_core::StaticBundle;

    fn scratch_in(parent: &std::path::Path) -> ScratchSpace {
        ScratchSpace::new(parent.to_path_buf(), Box::new(ImmediateCleanup))
    }

    #[test]
    fn static_candidate_wins_over_dynamic() {
        let profile = HostProfile::from_raw("linux", "x86_64");
        let mut bundle = StaticBundle::new();
        bundle.insert("/lib/static/Linux/x86_64/libfoo.so", b"static".to_vec());
        bundle.insert("/lib/dynamic/Linux/x86_64/libfoo.so", b"dynamic".to_vec());

        let parent = tempfile::tempdir().expect("tempdir");
        let scratch = scratch_in(parent.path());
        let artifact =
            locate_and_extract(&bundle, &scratch, &profile, "foo", None).expect("extract");

        assert_eq!(artifact.source_path, "/lib/static/Linux/x86_64/libfoo.so");
        assert_eq!(
            std::fs::read(&artifact.destination).expect("read back"),
            b"static"
        );
    }

    #[test]
    fn dynamic_candidate_used_after_silent_static_miss() {
        let profile = HostProfile::from_raw("linux", "x86_64");
        let mut bundle = StaticBundle::new();
        bundle.insert("/lib/dynamic/Linux/x86_64/libfoo.so", b"dynamic".to_vec());

        let parent = tempfile::tempdir().expect("tempdir");
        let scratch = scratch_in(parent.path());
        let artifact =
            locate_and_extract(&bundle, &scratch, &profile, "foo", None).expect("extract");

        assert_eq!(artifact.source_path, "/lib/dynamic/Linux/x86_64/libfoo.so");
    }

    #[test]
    fn macos_alternate_suffix_tried_as_final_fallback() {
        let profile = HostProfile::from_raw("macos", "x86_64");
        let mut bundle = StaticBundle::new();
        bundle.insert(
            "/lib/static/Mac OS X/x86_64/libfoo.jnilib",
            b"jnilib".to_vec(),
        );

        let parent = tempfile::tempdir().expect("tempdir");
        let scratch = scratch_in(parent.path());
        let artifact =
            locate_and_extract(&bundle, &scratch, &profile, "foo", None).expect("extract");

        assert_eq!(
            artifact.source_path,
            "/lib/static/Mac OS X/x86_64/libfoo.jnilib"
        );
        assert!(artifact.destination.ends_with("libfoo.jnilib"));
    }

    #[test]
    fn miss_everywhere_names_the_platform_filename() {
        let profile = HostProfile::from_raw("linux", "x86_64");
        let bundle = StaticBundle::new();

        let parent = tempfile::tempdir().expect("tempdir");
        let scratch = scratch_in(parent.path());
        let err = locate_and_extract(&bundle, &scratch, &profile, "foo", None)
            .expect_err("should miss");

        assert_eq!(
            err,
            ProvisionError::LibraryNotFound {
                filename: "libfoo.so".to_string()
            }
        );
    }

    #[test]
    fn extraction_is_byte_exact_across_sizes() {
        let profile = HostProfile::from_raw("linux", "x86_64");
        let parent = tempfile::tempdir().expect("tempdir");
        let scratch = scratch_in(parent.path());

        for size in [0usize, 1, 4096, 3 * 1024 * 1024] {
            let payload: Vec<u8> = (0..size).map(|i| (i % 251) as u8).collect();
            let mut bundle = StaticBundle::new();
            bundle.insert("/lib/static/Linux/x86_64/libfoo.so", payload.clone());

            let artifact =
                locate_and_extract(&bundle, &scratch, &profile, "foo", None).expect("extract");

            assert_eq!(artifact.byte_count, size as u64);
            assert_eq!(
                std::fs::read(&artifact.destination).expect("read back"),
                payload,
                "round trip must be byte-exact for {size} bytes"
            );
        }
    }
}
