//! Veris Patterns - Pattern-matching unfolder for the Veris translator.
//!
//! This crate turns a flat, possibly-incomplete set of conditional rewrite
//! rules for one function symbol into a single nested-conditional decision
//! expression built from recognizer and projection applications — the shape
//! solvers without native pattern matching can consume.
//!
//! It provides:
//! - [`RepresentativeGenerator`]: a memoized witness-term search used to
//!   preserve totality when a definition is incomplete
//! - [`discover_tables`] / [`complete_tables`]: discovery of existing
//!   recognizer/projection-shaped rewrite rules, and synthesis of fresh
//!   symbols for the gaps
//! - [`unfold_function`]: the pattern-matching compiler itself
//!
//! # Pipeline position
//!
//! The synthesizer runs once over the whole specification and freezes its
//! tables; the compiler then runs once per function symbol against those
//! tables and the shared representative cache.

mod errors;
mod representative;
mod rule;
mod synthesize;
mod unfold;

pub use errors::{PatternError, PatternResult};
pub use representative::{RepresentativeGenerator, DEFAULT_SEARCH_DEPTH};
pub use rule::Rule;
pub use synthesize::{complete_tables, defining_equations, discover_tables, SortTables};
pub use unfold::{
    ensure_pattern_matching_equation, is_pattern_matching_equation, unfold_function, Definition,
};
