//! Dependency edge extraction.
//!
//! Edge sets are collected in first-mention order with self-edges removed,
//! so scheduling and the emitted declarations are reproducible run to run.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use veris_ir::{FunId, SortExpr, SortId, SpecContext, Term};

/// The sorts a constructed sort's fields mention, self excluded.
pub(crate) fn sort_deps_of_sort(ctx: &SpecContext, sort: SortId) -> Vec<SortId> {
    let mut seen = FxHashSet::default();
    seen.insert(sort);
    let mut out = Vec::new();
    for &constructor in &ctx.sort(sort).constructors {
        for field in &ctx.function(constructor).domain {
            push_sort_expr(field, &mut seen, &mut out);
        }
    }
    out
}

/// The `(sort, function)` dependency edge sets of one function declaration:
/// sorts mentioned in the signature or any of `terms`, and non-constructor
/// functions invoked in `terms`. Constructor applications are data and show
/// up through their sort instead.
pub(crate) fn function_decl_deps(
    ctx: &SpecContext,
    function: FunId,
    terms: &[&Term],
) -> (Vec<SortId>, Vec<FunId>) {
    let mut sort_seen = FxHashSet::default();
    let mut sorts = Vec::new();
    let mut fun_seen = FxHashSet::default();
    fun_seen.insert(function);
    let mut functions = Vec::new();

    let symbol = ctx.function(function);
    for expr in symbol.domain.iter().chain([&symbol.codomain]) {
        push_sort_expr(expr, &mut sort_seen, &mut sorts);
    }

    // Depth-first, leftmost subterm first (the worklist pops from the back,
    // so children go on reversed).
    let mut work: SmallVec<[&Term; 8]> = terms.iter().rev().copied().collect();
    while let Some(term) = work.pop() {
        match term {
            Term::Var(v) => push_sort_expr(&v.sort, &mut sort_seen, &mut sorts),
            Term::Ctor { ctor, args } => {
                let head = ctx.function(*ctor);
                push_sort_expr(&head.codomain, &mut sort_seen, &mut sorts);
                work.extend(args.iter().rev());
            }
            Term::App { function: head, args } => {
                let symbol = ctx.function(*head);
                for expr in symbol.domain.iter().chain([&symbol.codomain]) {
                    push_sort_expr(expr, &mut sort_seen, &mut sorts);
                }
                if fun_seen.insert(*head) {
                    functions.push(*head);
                }
                work.extend(args.iter().rev());
            }
            Term::If {
                condition,
                then_branch,
                else_branch,
            } => {
                work.push(else_branch);
                work.push(then_branch);
                work.push(condition);
            }
        }
    }

    (sorts, functions)
}

fn push_sort_expr(expr: &SortExpr, seen: &mut FxHashSet<SortId>, out: &mut Vec<SortId>) {
    match expr {
        SortExpr::Basic(id) => {
            if seen.insert(*id) {
                out.push(*id);
            }
        }
        SortExpr::Function { domain, codomain } => {
            for d in domain {
                push_sort_expr(d, seen, out);
            }
            push_sort_expr(codomain, seen, out);
        }
    }
}
