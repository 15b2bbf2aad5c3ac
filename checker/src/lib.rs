//! Contest solution verifier.
//!
//! Given a problem dataset and a candidate solution, the checker validates
//! that the solution is well-formed and feasible, then recomputes its score.
//! The crate keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic validation and scoring per problem
//!   variant. No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting helpers (config files, verdict reports).
//!
//! [`verify`] wires the two together for the `checker` binary and for batch
//! grading. [`tokens`] is the whitespace token reader both files are parsed
//! with.

pub mod core;
pub mod io;
pub mod logging;
pub mod tokens;
pub mod verify;
