//! Subcommand definitions.

use clap::Subcommand;

/// Available nblas subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Provision a named native artifact into this process
    Provision {
        /// Logical library name, without platform prefix or suffix
        name: String,

        /// Run the CPU capability probe to select a flavored build
        #[arg(long = "with-probe")]
        with_probe: bool,
    },

    /// Provision the main backend and verify its BLAS entry points
    Check,

    /// Show the resolved provisioning layout
    Paths,
}
