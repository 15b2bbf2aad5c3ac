//! Deterministic, pure verification logic.
//!
//! Core modules are free of I/O. They read datasets and solutions from an
//! in-memory [`Tokens`](crate::tokens::Tokens) stream, reject the first
//! infeasibility as a [`Violation`](violation::Violation), and score accepted
//! solutions.

pub mod grouping;
pub mod packing;
pub mod problem;
pub mod scheduling;
pub mod violation;
