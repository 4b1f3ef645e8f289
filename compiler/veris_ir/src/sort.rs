//! Sort expressions and sort declarations.

use rustc_hash::FxHashSet;

use crate::function::FunId;
use crate::name::Name;

/// Index of a declared sort in the [`SpecContext`](crate::SpecContext).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[repr(transparent)]
pub struct SortId(u32);

impl SortId {
    #[inline]
    pub const fn from_index(index: u32) -> Self {
        SortId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A sort expression: a declared sort or a function sort over sorts.
///
/// Function sorts never have constructors; witnesses for them are found by
/// signature search among declared functions, not built structurally.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum SortExpr {
    Basic(SortId),
    Function {
        domain: Vec<SortExpr>,
        codomain: Box<SortExpr>,
    },
}

impl SortExpr {
    pub fn function(domain: Vec<SortExpr>, codomain: SortExpr) -> Self {
        SortExpr::Function {
            domain,
            codomain: Box::new(codomain),
        }
    }

    #[inline]
    pub fn is_function(&self) -> bool {
        matches!(self, SortExpr::Function { .. })
    }

    /// The sort a value of this sort expression ultimately produces:
    /// the codomain chain of a function sort, or the sort itself.
    pub fn target_sort(&self) -> &SortExpr {
        match self {
            SortExpr::Basic(_) => self,
            SortExpr::Function { codomain, .. } => codomain.target_sort(),
        }
    }

    /// Collect every declared sort mentioned anywhere in this expression.
    pub fn collect_basic(&self, out: &mut FxHashSet<SortId>) {
        match self {
            SortExpr::Basic(id) => {
                out.insert(*id);
            }
            SortExpr::Function { domain, codomain } => {
                for d in domain {
                    d.collect_basic(out);
                }
                codomain.collect_basic(out);
            }
        }
    }
}

/// A declared sort.
///
/// A sort with a non-empty constructor list is *constructed*; an empty list
/// means the sort is opaque (its values come from outside the specification).
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Sort {
    pub name: Name,
    /// Constructors in declaration order. Order matters: it drives both the
    /// representative search and the branch order of compiled conditionals.
    pub constructors: Vec<FunId>,
}

impl Sort {
    #[inline]
    pub fn is_constructed(&self) -> bool {
        !self.constructors.is_empty()
    }
}
