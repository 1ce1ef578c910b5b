//! CLI entry point - the composition root.
//!
//! Wires the provisioning context once via bootstrap and dispatches
//! subcommands to handlers.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use nblas_cli::{Cli, Commands, bootstrap, handlers};

fn init_tracing(debug: bool) {
    // --debug raises the default filter; RUST_LOG still wins when set.
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> anyhow::Result<()> {
    // Load environment variables before parsing so env-backed flags see them
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.debug);

    // Bootstrap the provisioning context (composition root); the flavor
    // override is applied before anything can probe
    let ctx = bootstrap(cli.arch_flavor.as_deref());

    let Some(command) = cli.command else {
        // No command provided - show help
        use clap::CommandFactory;
        nblas_cli::Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Provision { name, with_probe } => {
            handlers::provision::execute(&ctx, &name, with_probe)?;
        }
        Commands::Check => {
            handlers::check::execute(&ctx)?;
        }
        Commands::Paths => {
            handlers::paths::execute(&ctx)?;
        }
    }

    Ok(())
}
