//! Core domain types and port definitions for nblas native provisioning.
//!
//! This crate is pure: it owns the host/flavor/identity data model, the
//! candidate-path resolver, the provisioning error taxonomy, and the port
//! traits (resource bundle, capability probe) that the runtime crate
//! implements. Nothing in here touches the filesystem or the dynamic loader.

pub mod domain;
pub mod error;
pub mod ports;
pub mod resolver;

// Re-export commonly used types for convenience
pub use domain::{ExtractedArtifact, Flavor, HostProfile, LibraryIdentity, Linkage, OsFamily};
pub use error::ProvisionError;
pub use ports::{CapabilityProbe, FixedFlavorProbe, ResourceBundle, StaticBundle};
pub use resolver::{
    alternate_library_name, candidate_paths, candidate_paths_for_filename, mapped_library_name,
};
