//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface definition for the nblas provisioning tool.
#[derive(Parser)]
#[command(name = "nblas")]
#[command(about = "Provision native numeric backends for the host")]
#[command(version)]
pub struct Cli {
    /// Force a CPU flavor (sse, sse3) instead of probing; sticky for the
    /// whole process
    #[arg(long = "arch-flavor", global = true, env = "NBLAS_ARCH_FLAVOR")]
    pub arch_flavor: Option<String>,

    /// Enable debug-level diagnostics
    #[arg(long = "debug", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
