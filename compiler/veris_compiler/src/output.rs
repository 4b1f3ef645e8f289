//! Declarations handed to the external emitter.
//!
//! Both sequences are already scheduled: every declaration follows the
//! declarations it depends on. The dependency edge sets are kept on each
//! declaration so an emitter can additionally restrict output to the
//! reachability closure of one query.

use veris_ir::{Equation, FunId, SortId};
use veris_patterns::Definition;

/// One sort declaration, with the symbols the emitter must declare
/// alongside it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SortDecl {
    pub sort: SortId,
    /// Empty for opaque sorts.
    pub constructors: Vec<ConstructorDecl>,
    /// Sorts this declaration mentions, self excluded, in first-mention
    /// order.
    pub dependencies: Vec<SortId>,
}

/// A constructor together with its canonical recognizer and per-field
/// projections.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConstructorDecl {
    pub constructor: FunId,
    pub recognizer: FunId,
    pub projections: Vec<FunId>,
}

/// One function declaration with its dependency edge sets.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FunctionDecl {
    pub function: FunId,
    pub body: FunctionBody,
    /// Sorts mentioned in the signature or body, in first-mention order.
    pub sort_dependencies: Vec<SortId>,
    /// Functions invoked in the body, self excluded, in first-mention order.
    pub function_dependencies: Vec<FunId>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FunctionBody {
    /// A single pattern-free decision expression.
    Compiled(Definition),
    /// The original equations, kept verbatim because no pattern matching
    /// was involved (or the equations were not eligible for unfolding).
    /// Empty for uninterpreted symbols.
    Passthrough(Vec<Equation>),
}

/// The complete, scheduled output of a translation run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Translation {
    pub sorts: Vec<SortDecl>,
    pub functions: Vec<FunctionDecl>,
    /// Recognizer/projection symbols manufactured during synthesis, in
    /// synthesis order; the emitter declares these as primitives.
    pub synthesized: Vec<FunId>,
}
