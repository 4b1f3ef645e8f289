//! The specification context.
//!
//! `SpecContext` is the registry an external loader populates with sorts,
//! constructors, functions, and equations. It is mutated during loading and
//! recognizer/projection synthesis, then read immutably by the pattern
//! compiler (the interner stays usable behind `&self` for fresh variable
//! names).
//!
//! Booleans are built in: every context starts with sort `Bool`, its
//! constructors `true` and `false`, and the mapping `not`. Equation
//! conditions and compiled decision expressions are terms of this sort.

use rustc_hash::FxHashMap;

use crate::equation::Equation;
use crate::function::{FunId, FunctionKind, FunctionSymbol};
use crate::interner::{FreshNameGenerator, NameInterner};
use crate::name::Name;
use crate::sort::{Sort, SortExpr, SortId};
use crate::term::Term;

pub struct SpecContext {
    interner: NameInterner,
    sorts: Vec<Sort>,
    functions: Vec<FunctionSymbol>,
    equations: Vec<Equation>,
    /// Declared sort and function names, for collision-free synthesis.
    declared: FreshNameGenerator,
    bool_sort: SortId,
    true_ctor: FunId,
    false_ctor: FunId,
    not_fun: FunId,
}

impl SpecContext {
    pub fn new() -> Self {
        let mut ctx = SpecContext {
            interner: NameInterner::new(),
            sorts: Vec::new(),
            functions: Vec::new(),
            equations: Vec::new(),
            declared: FreshNameGenerator::new(),
            bool_sort: SortId::from_index(0),
            true_ctor: FunId::from_index(0),
            false_ctor: FunId::from_index(0),
            not_fun: FunId::from_index(0),
        };
        ctx.bool_sort = ctx.add_sort("Bool");
        ctx.true_ctor = ctx.add_constructor(ctx.bool_sort, "true", Vec::new());
        ctx.false_ctor = ctx.add_constructor(ctx.bool_sort, "false", Vec::new());
        ctx.not_fun = ctx.add_mapping(
            "not",
            vec![SortExpr::Basic(ctx.bool_sort)],
            SortExpr::Basic(ctx.bool_sort),
        );
        ctx
    }

    // ── Names ───────────────────────────────────────────────────────

    pub fn interner(&self) -> &NameInterner {
        &self.interner
    }

    pub fn intern(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    pub fn resolve(&self, name: Name) -> &'static str {
        self.interner.resolve(name)
    }

    /// Produce a declaration-level name not colliding with any declared
    /// sort or function name, and reserve it.
    pub fn fresh_name(&mut self, base: &str) -> Name {
        self.declared.fresh(&self.interner, base)
    }

    // ── Declarations ────────────────────────────────────────────────

    pub fn add_sort(&mut self, name: &str) -> SortId {
        let name = self.intern(name);
        self.declared.add_identifier(name);
        let id = SortId::from_index(self.index_u32(self.sorts.len()));
        self.sorts.push(Sort {
            name,
            constructors: Vec::new(),
        });
        id
    }

    pub fn add_constructor(&mut self, sort: SortId, name: &str, fields: Vec<SortExpr>) -> FunId {
        let name = self.intern(name);
        let id = self.push_function(FunctionSymbol {
            name,
            domain: fields,
            codomain: SortExpr::Basic(sort),
            kind: FunctionKind::Constructor,
        });
        self.sorts[sort.index()].constructors.push(id);
        id
    }

    pub fn add_mapping(&mut self, name: &str, domain: Vec<SortExpr>, codomain: SortExpr) -> FunId {
        let name = self.intern(name);
        self.push_function(FunctionSymbol {
            name,
            domain,
            codomain,
            kind: FunctionKind::Mapping,
        })
    }

    /// Declare a synthesized recognizer for a constructor of `sort`.
    pub fn add_recognizer(&mut self, name: Name, sort: SortId) -> FunId {
        self.push_function(FunctionSymbol {
            name,
            domain: vec![SortExpr::Basic(sort)],
            codomain: SortExpr::Basic(self.bool_sort),
            kind: FunctionKind::Recognizer,
        })
    }

    /// Declare a synthesized projection from `sort` to one field sort.
    pub fn add_projection(&mut self, name: Name, sort: SortId, field: SortExpr) -> FunId {
        self.push_function(FunctionSymbol {
            name,
            domain: vec![SortExpr::Basic(sort)],
            codomain: field,
            kind: FunctionKind::Projection,
        })
    }

    pub fn add_equation(&mut self, equation: Equation) {
        self.equations.push(equation);
    }

    fn push_function(&mut self, symbol: FunctionSymbol) -> FunId {
        self.declared.add_identifier(symbol.name);
        let id = FunId::from_index(self.index_u32(self.functions.len()));
        self.functions.push(symbol);
        id
    }

    fn index_u32(&self, len: usize) -> u32 {
        u32::try_from(len).unwrap_or_else(|_| panic!("declaration count exceeds u32::MAX"))
    }

    // ── Lookups ─────────────────────────────────────────────────────

    pub fn sort(&self, id: SortId) -> &Sort {
        &self.sorts[id.index()]
    }

    pub fn function(&self, id: FunId) -> &FunctionSymbol {
        &self.functions[id.index()]
    }

    pub fn sort_name(&self, id: SortId) -> &'static str {
        self.resolve(self.sort(id).name)
    }

    pub fn function_name(&self, id: FunId) -> &'static str {
        self.resolve(self.function(id).name)
    }

    /// Sort ids in declaration order.
    pub fn sort_ids(&self) -> impl Iterator<Item = SortId> + '_ {
        (0..self.sorts.len()).map(|i| SortId::from_index(i as u32))
    }

    /// Function ids in declaration order.
    pub fn fun_ids(&self) -> impl Iterator<Item = FunId> + '_ {
        (0..self.functions.len()).map(|i| FunId::from_index(i as u32))
    }

    pub fn equations(&self) -> &[Equation] {
        &self.equations
    }

    /// Group equation indices by their head symbol, preserving declaration
    /// order within each group.
    pub fn equations_by_function(&self) -> FxHashMap<FunId, Vec<usize>> {
        let mut groups: FxHashMap<FunId, Vec<usize>> = FxHashMap::default();
        for (index, eq) in self.equations.iter().enumerate() {
            groups.entry(eq.function).or_default().push(index);
        }
        groups
    }

    // ── Booleans ────────────────────────────────────────────────────

    pub fn bool_sort(&self) -> SortId {
        self.bool_sort
    }

    pub fn true_ctor(&self) -> FunId {
        self.true_ctor
    }

    pub fn false_ctor(&self) -> FunId {
        self.false_ctor
    }

    pub fn not_fun(&self) -> FunId {
        self.not_fun
    }

    pub fn term_true(&self) -> Term {
        Term::ctor(self.true_ctor, Vec::new())
    }

    pub fn term_false(&self) -> Term {
        Term::ctor(self.false_ctor, Vec::new())
    }

    pub fn is_true(&self, term: &Term) -> bool {
        matches!(term, Term::Ctor { ctor, args } if *ctor == self.true_ctor && args.is_empty())
    }

    pub fn is_false(&self, term: &Term) -> bool {
        matches!(term, Term::Ctor { ctor, args } if *ctor == self.false_ctor && args.is_empty())
    }

    /// Boolean negation as a term.
    pub fn not(&self, term: Term) -> Term {
        Term::app(self.not_fun, vec![term])
    }

    /// Whether one term is the syntactic negation of the other.
    pub fn is_complement(&self, a: &Term, b: &Term) -> bool {
        let negates = |outer: &Term, inner: &Term| {
            matches!(outer, Term::App { function, args }
                if *function == self.not_fun && args.len() == 1 && args[0] == *inner)
        };
        negates(a, b) || negates(b, a)
    }

    /// Build a conditional, simplifying the trivial cases:
    /// a literal `true`/`false` condition selects a branch directly, and
    /// equal branches collapse.
    pub fn lazy_if(&self, condition: Term, then_branch: Term, else_branch: Term) -> Term {
        if self.is_true(&condition) || then_branch == else_branch {
            return then_branch;
        }
        if self.is_false(&condition) {
            return else_branch;
        }
        Term::conditional(condition, then_branch, else_branch)
    }

    // ── Sorting of terms ────────────────────────────────────────────

    /// The sort of a term.
    pub fn term_sort(&self, term: &Term) -> SortExpr {
        match term {
            Term::Var(v) => v.sort.clone(),
            Term::Ctor { ctor, .. } => self.function(*ctor).codomain.clone(),
            Term::App { function, args } => {
                let symbol = self.function(*function);
                if args.is_empty() && !symbol.domain.is_empty() {
                    // The symbol used as a function-sorted value.
                    symbol.value_sort()
                } else {
                    symbol.codomain.clone()
                }
            }
            Term::If { then_branch, .. } => self.term_sort(then_branch),
        }
    }

    /// Render a term for diagnostics and trace output.
    pub fn display_term(&self, term: &Term) -> String {
        match term {
            Term::Var(v) => self.resolve(v.name).to_owned(),
            Term::Ctor { ctor, args } => self.display_application(self.function_name(*ctor), args),
            Term::App { function, args } => {
                self.display_application(self.function_name(*function), args)
            }
            Term::If {
                condition,
                then_branch,
                else_branch,
            } => format!(
                "if({}, {}, {})",
                self.display_term(condition),
                self.display_term(then_branch),
                self.display_term(else_branch)
            ),
        }
    }

    fn display_application(&self, head: &str, args: &[Term]) -> String {
        if args.is_empty() {
            return head.to_owned();
        }
        let rendered: Vec<String> = args.iter().map(|a| self.display_term(a)).collect();
        format!("{head}({})", rendered.join(", "))
    }
}

impl Default for SpecContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
