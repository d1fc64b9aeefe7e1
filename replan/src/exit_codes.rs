//! Stable exit codes for replan CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Command failed: unreadable file, schema violation, bad arguments.
pub const INVALID: i32 = 1;
/// `replan validate` reported binding-audit findings (non-strict mode).
pub const FINDINGS: i32 = 2;
