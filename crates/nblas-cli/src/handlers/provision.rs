//! Provision command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;

/// Provision an arbitrary artifact by base name. Failure surfaces the
/// typed error chain and exits nonzero; a missing required capability is
/// never something to continue past silently.
pub fn execute(ctx: &CliContext, name: &str, with_probe: bool) -> Result<()> {
    ctx.provisioner.provision(name, with_probe)?;
    println!("provisioned {name}");
    Ok(())
}
