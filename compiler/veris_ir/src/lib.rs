//! Veris IR - Specification Context and Term Types
//!
//! This crate contains the core data structures for the Veris translator:
//! - Interned `Name`s for identifiers
//! - `SortExpr` / `Sort` for algebraic sorts (constructed or opaque)
//! - `FunctionSymbol` tagged as constructor, recognizer, projection, or mapping
//! - `Equation` for conditional rewrite rules
//! - `Term`, an exhaustively-matched tagged union (no downcasts)
//! - `SpecContext`, the read-only registry populated by an external loader
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: Strings → `Name(u32)`, symbols → `FunId(u32)` /
//!   `SortId(u32)` indices into the context
//! - **Exhaustive matching**: `Term` has exactly four variants; every consumer
//!   matches all of them
//! - **Single-writer phase**: the context is mutated only while the loader and
//!   the synthesizer run; compilation reads it immutably

mod context;
mod equation;
mod function;
mod interner;
mod name;
mod sort;
mod term;

pub use context::SpecContext;
pub use equation::Equation;
pub use function::{FunId, FunctionKind, FunctionSymbol};
pub use interner::{FreshNameGenerator, NameInterner};
pub use name::Name;
pub use sort::{Sort, SortExpr, SortId};
pub use term::{Term, Variable};
