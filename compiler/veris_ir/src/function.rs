//! Function symbols.

use crate::name::Name;
use crate::sort::SortExpr;

/// Index of a declared function symbol in the [`SpecContext`](crate::SpecContext).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[repr(transparent)]
pub struct FunId(u32);

impl FunId {
    #[inline]
    pub const fn from_index(index: u32) -> Self {
        FunId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Role of a function symbol.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum FunctionKind {
    /// Builds values of its target sort; never itself rewritten.
    Constructor,
    /// Boolean test for one specific constructor.
    Recognizer,
    /// Extracts one field of a constructor application.
    Projection,
    /// Ordinary mapping defined by equations (or left uninterpreted).
    Mapping,
}

/// A declared function symbol.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FunctionSymbol {
    pub name: Name,
    pub domain: Vec<SortExpr>,
    pub codomain: SortExpr,
    pub kind: FunctionKind,
}

impl FunctionSymbol {
    #[inline]
    pub fn arity(&self) -> usize {
        self.domain.len()
    }

    /// A constant takes no arguments.
    #[inline]
    pub fn is_constant(&self) -> bool {
        self.domain.is_empty()
    }

    /// The sort of this symbol used as a value: its codomain for constants,
    /// a function sort otherwise.
    pub fn value_sort(&self) -> SortExpr {
        if self.domain.is_empty() {
            self.codomain.clone()
        } else {
            SortExpr::function(self.domain.clone(), self.codomain.clone())
        }
    }
}
