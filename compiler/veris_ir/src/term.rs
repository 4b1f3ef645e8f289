//! Terms.
//!
//! `Term` is a tagged union with exactly four shapes. Constructor and
//! ordinary-function applications are distinct variants so that pattern code
//! never needs a "is this symbol a constructor" side lookup, and every
//! consumer is an exhaustive match.

use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;

use crate::function::FunId;
use crate::name::Name;
use crate::sort::SortExpr;

/// A sorted variable.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Variable {
    pub name: Name,
    pub sort: SortExpr,
}

impl Variable {
    pub fn new(name: Name, sort: SortExpr) -> Self {
        Variable { name, sort }
    }
}

/// A term over the specification's signature.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Term {
    /// A free variable.
    Var(Variable),
    /// A constructor application (possibly nullary).
    Ctor { ctor: FunId, args: Vec<Term> },
    /// An application of a non-constructor function symbol. An empty
    /// argument list on a symbol with non-empty domain denotes the symbol
    /// itself used as a function-sorted value.
    App { function: FunId, args: Vec<Term> },
    /// A conditional.
    If {
        condition: Box<Term>,
        then_branch: Box<Term>,
        else_branch: Box<Term>,
    },
}

impl Term {
    pub fn var(variable: Variable) -> Self {
        Term::Var(variable)
    }

    pub fn ctor(ctor: FunId, args: Vec<Term>) -> Self {
        Term::Ctor { ctor, args }
    }

    pub fn app(function: FunId, args: Vec<Term>) -> Self {
        Term::App { function, args }
    }

    pub fn conditional(condition: Term, then_branch: Term, else_branch: Term) -> Self {
        Term::If {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }

    /// Collect the free variables of this term.
    ///
    /// Terms have no binders, so every variable occurrence is free.
    pub fn free_variables(&self) -> FxHashSet<Variable> {
        let mut out = FxHashSet::default();
        self.collect_free(&mut out);
        out
    }

    fn collect_free(&self, out: &mut FxHashSet<Variable>) {
        match self {
            Term::Var(v) => {
                out.insert(v.clone());
            }
            Term::Ctor { args, .. } | Term::App { args, .. } => {
                for a in args {
                    a.collect_free(out);
                }
            }
            Term::If {
                condition,
                then_branch,
                else_branch,
            } => {
                condition.collect_free(out);
                then_branch.collect_free(out);
                else_branch.collect_free(out);
            }
        }
    }

    /// Simultaneously replace free variables according to `map`.
    ///
    /// Capture-free because terms have no binders.
    pub fn substitute(&self, map: &FxHashMap<Variable, Term>) -> Term {
        match self {
            Term::Var(v) => map.get(v).cloned().unwrap_or_else(|| self.clone()),
            Term::Ctor { ctor, args } => Term::Ctor {
                ctor: *ctor,
                args: args.iter().map(|a| a.substitute(map)).collect(),
            },
            Term::App { function, args } => Term::App {
                function: *function,
                args: args.iter().map(|a| a.substitute(map)).collect(),
            },
            Term::If {
                condition,
                then_branch,
                else_branch,
            } => Term::conditional(
                condition.substitute(map),
                then_branch.substitute(map),
                else_branch.substitute(map),
            ),
        }
    }

    /// Replace one variable by a term.
    pub fn substitute_var(&self, variable: &Variable, replacement: &Term) -> Term {
        match self {
            Term::Var(v) => {
                if v == variable {
                    replacement.clone()
                } else {
                    self.clone()
                }
            }
            Term::Ctor { ctor, args } => Term::Ctor {
                ctor: *ctor,
                args: args
                    .iter()
                    .map(|a| a.substitute_var(variable, replacement))
                    .collect(),
            },
            Term::App { function, args } => Term::App {
                function: *function,
                args: args
                    .iter()
                    .map(|a| a.substitute_var(variable, replacement))
                    .collect(),
            },
            Term::If {
                condition,
                then_branch,
                else_branch,
            } => Term::conditional(
                condition.substitute_var(variable, replacement),
                then_branch.substitute_var(variable, replacement),
                else_branch.substitute_var(variable, replacement),
            ),
        }
    }
}

#[cfg(test)]
mod tests;
