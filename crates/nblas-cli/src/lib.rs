//! CLI crate for nblas native provisioning.
//!
//! The binary is the composition root: `bootstrap` wires the bundle,
//! scratch space, detector, and provisioner once, and handlers delegate
//! to that context.

pub mod bootstrap;
pub mod commands;
pub mod handlers;
pub mod parser;

// Re-export primary types for convenient access
pub use bootstrap::{CliContext, bootstrap};
pub use commands::Commands;
pub use parser::Cli;
