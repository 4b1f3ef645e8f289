use pretty_assertions::assert_eq;
use rustc_hash::FxHashMap;

use crate::{SortExpr, SpecContext, Term, Variable};

fn var(ctx: &SpecContext, name: &str, sort: SortExpr) -> Variable {
    Variable::new(ctx.intern(name), sort)
}

#[test]
fn free_variables_of_nested_term() {
    let mut ctx = SpecContext::new();
    let nat = ctx.add_sort("Nat");
    let succ = ctx.add_constructor(nat, "succ", vec![SortExpr::Basic(nat)]);

    let n = var(&ctx, "n", SortExpr::Basic(nat));
    let m = var(&ctx, "m", SortExpr::Basic(nat));
    let term = Term::conditional(
        ctx.term_true(),
        Term::ctor(succ, vec![Term::var(n.clone())]),
        Term::var(m.clone()),
    );

    let free = term.free_variables();
    assert_eq!(free.len(), 2);
    assert!(free.contains(&n));
    assert!(free.contains(&m));
}

#[test]
fn substitute_replaces_only_mapped_variables() {
    let mut ctx = SpecContext::new();
    let nat = ctx.add_sort("Nat");
    let zero = ctx.add_constructor(nat, "zero", vec![]);
    let succ = ctx.add_constructor(nat, "succ", vec![SortExpr::Basic(nat)]);

    let n = var(&ctx, "n", SortExpr::Basic(nat));
    let m = var(&ctx, "m", SortExpr::Basic(nat));
    let term = Term::ctor(succ, vec![Term::var(n.clone())]);

    let mut map = FxHashMap::default();
    map.insert(n, Term::ctor(zero, vec![]));
    map.insert(m.clone(), Term::var(m.clone()));

    let result = term.substitute(&map);
    assert_eq!(result, Term::ctor(succ, vec![Term::ctor(zero, vec![])]));
}

#[test]
fn substitute_var_descends_into_conditionals() {
    let mut ctx = SpecContext::new();
    let nat = ctx.add_sort("Nat");
    let zero = ctx.add_constructor(nat, "zero", vec![]);

    let n = var(&ctx, "n", SortExpr::Basic(nat));
    let term = Term::conditional(ctx.term_true(), Term::var(n.clone()), Term::var(n.clone()));
    let replaced = term.substitute_var(&n, &Term::ctor(zero, vec![]));

    assert_eq!(
        replaced,
        Term::conditional(
            ctx.term_true(),
            Term::ctor(zero, vec![]),
            Term::ctor(zero, vec![]),
        )
    );
}
