//! Retargetable recorded-procedure engine.
//!
//! A [`core::procedure::Procedure`] owns an ordered sequence of encoded
//! operation records plus the identifier bindings (arguments, results)
//! needed to replay them with fresh data. Retargeting rewrites identifier
//! occurrences throughout the records — new argument values, new result
//! destinations, or a new owning worker — without re-recording or
//! reordering the operations. The architecture enforces a strict
//! separation:
//!
//! - **[`core`]**: Pure, deterministic logic (rewriting, retargeting, the
//!   transport codec, binding audit). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (procedure files, config).
//!   Isolated to enable mocking in tests.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod term;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
