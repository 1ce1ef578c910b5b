//! Domain types for native artifact provisioning.

mod flavor;
mod host;
mod identity;

pub use flavor::Flavor;
pub use host::{HostProfile, OsFamily};
pub use identity::{ExtractedArtifact, LibraryIdentity, Linkage};
