//! Conditional rewrite equations.

use crate::function::FunId;
use crate::term::{Term, Variable};

/// A conditional rewrite rule `condition -> function(args) = rhs`.
///
/// The left-hand side is structurally a function symbol applied to argument
/// terms, so every equation names exactly one definition head.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Equation {
    /// The free variables ranged over by the rule.
    pub variables: Vec<Variable>,
    /// Boolean guard; the literal `true` for unconditional rules.
    pub condition: Term,
    /// Head symbol of the left-hand side.
    pub function: FunId,
    /// Arguments of the left-hand side, one per formal parameter.
    pub lhs_args: Vec<Term>,
    /// Right-hand side.
    pub rhs: Term,
}

impl Equation {
    pub fn new(
        variables: Vec<Variable>,
        condition: Term,
        function: FunId,
        lhs_args: Vec<Term>,
        rhs: Term,
    ) -> Self {
        Equation {
            variables,
            condition,
            function,
            lhs_args,
            rhs,
        }
    }
}
