//! Batch translation of an algebraic data specification into scheduled,
//! pattern-free declarations for a solver without native pattern matching.
//!
//! The loader populates a [`veris_ir::SpecContext`]; [`translate`] runs
//! discovery/synthesis, pattern-match unfolding, and dependency scheduling,
//! and returns ordered [`SortDecl`]/[`FunctionDecl`] sequences for an
//! external emitter to render.

mod deps;
mod errors;
mod output;
mod pipeline;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use errors::{TranslateError, TranslateResult};
pub use output::{ConstructorDecl, FunctionBody, FunctionDecl, SortDecl, Translation};
pub use pipeline::translate;
