//! Paths command handler.
//!
//! Displays the resolved provisioning layout in `key = value` format,
//! the "golden truth" tool for bundle-layout issues.

use anyhow::Result;

use nblas_runtime::ResolvedLayout;

use crate::bootstrap::CliContext;

/// Print the resolved layout. Uses the cached flavor only; this command
/// must never trigger the native probe.
pub fn execute(ctx: &CliContext) -> Result<()> {
    let layout = ResolvedLayout::resolve(
        ctx.profile.clone(),
        ctx.detector.cached().flatten(),
        ctx.bundle_root.clone(),
        ctx.scratch_parent.clone(),
    );
    print!("{layout}");
    Ok(())
}
