//! Command handlers. Each handler receives the composed [`crate::CliContext`]
//! and delegates to it.

pub mod check;
pub mod paths;
pub mod provision;
