//! Check command handler.
//!
//! Sanity check: provisions the main backend (probe enabled) and resolves
//! a fixed set of BLAS entry points through it, reporting per-symbol
//! status. Exits nonzero if provisioning or any required symbol fails.

use anyhow::{Result, bail};

use nblas_runtime::MAIN_LIBRARY;

use crate::bootstrap::CliContext;

/// Entry points every functional backend must export.
const REQUIRED_SYMBOLS: [&str; 4] = ["dgemm_", "sgemm_", "daxpy_", "ddot_"];

/// Execute the check command.
pub fn execute(ctx: &CliContext) -> Result<()> {
    println!("os_family = {}", ctx.profile.os_family);
    println!("arch_name = {}", ctx.profile.arch_name);

    ctx.provisioner.provision(MAIN_LIBRARY, true)?;
    let flavor = ctx.detector.cached().flatten();
    println!("flavor = {}", flavor.as_deref().unwrap_or("none"));

    let mut missing = Vec::new();
    for symbol in REQUIRED_SYMBOLS {
        match ctx.provisioner.symbol_address(MAIN_LIBRARY, symbol) {
            Ok(address) => println!("{symbol} = ok ({address:p})"),
            Err(e) => {
                println!("{symbol} = MISSING ({e})");
                missing.push(symbol);
            }
        }
    }

    if !missing.is_empty() {
        bail!("backend is missing required symbols: {}", missing.join(", "));
    }

    println!("native backend is functional");
    Ok(())
}
