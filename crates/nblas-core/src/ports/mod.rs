//! Port definitions for the provisioning pipeline.
//!
//! Core owns the traits; the runtime crate owns the implementations that
//! touch the filesystem and the dynamic loader. The fakes shipped here
//! ([`StaticBundle`], [`FixedFlavorProbe`]) let the pipeline run end to end
//! in unit tests without a real bundle or a real native probe.

mod bundle;
mod probe;

pub use bundle::{ResourceBundle, StaticBundle};
pub use probe::{CapabilityProbe, FixedFlavorProbe};
