use pretty_assertions::assert_eq;

use crate::{Equation, FunctionKind, SortExpr, SpecContext, Term, Variable};

#[test]
fn booleans_are_built_in() {
    let ctx = SpecContext::new();
    assert_eq!(ctx.sort_name(ctx.bool_sort()), "Bool");
    assert_eq!(ctx.function_name(ctx.true_ctor()), "true");
    assert_eq!(ctx.function_name(ctx.false_ctor()), "false");
    assert!(ctx.is_true(&ctx.term_true()));
    assert!(ctx.is_false(&ctx.term_false()));
    assert_eq!(
        ctx.function(ctx.true_ctor()).kind,
        FunctionKind::Constructor
    );
}

#[test]
fn lazy_if_simplifies_literal_conditions() {
    let ctx = SpecContext::new();
    let t = ctx.term_true();
    let f = ctx.term_false();
    assert_eq!(ctx.lazy_if(t.clone(), f.clone(), t.clone()), f);
    assert_eq!(ctx.lazy_if(f.clone(), f.clone(), t.clone()), t);
    // Equal branches collapse regardless of the condition.
    let cond = ctx.not(ctx.term_false());
    assert_eq!(ctx.lazy_if(cond, t.clone(), t.clone()), t);
}

#[test]
fn is_complement_detects_syntactic_negation() {
    let mut ctx = SpecContext::new();
    let even = ctx.add_mapping(
        "even",
        vec![SortExpr::Basic(ctx.bool_sort())],
        SortExpr::Basic(ctx.bool_sort()),
    );
    let b = Variable::new(ctx.intern("b"), SortExpr::Basic(ctx.bool_sort()));
    let call = Term::app(even, vec![Term::var(b)]);
    let negated = ctx.not(call.clone());

    assert!(ctx.is_complement(&call, &negated));
    assert!(ctx.is_complement(&negated, &call));
    assert!(!ctx.is_complement(&call, &call));
}

#[test]
fn fresh_name_avoids_declared_symbols() {
    let mut ctx = SpecContext::new();
    let list = ctx.add_sort("List");
    ctx.add_constructor(list, "nil", vec![]);
    ctx.add_mapping("recognise-nil", vec![SortExpr::Basic(list)], SortExpr::Basic(ctx.bool_sort()));

    let fresh = ctx.fresh_name("recognise-nil");
    assert_eq!(ctx.resolve(fresh), "recognise-nil1");
}

#[test]
fn equations_group_by_head_in_declaration_order() {
    let mut ctx = SpecContext::new();
    let bool_sort = SortExpr::Basic(ctx.bool_sort());
    let id = ctx.add_mapping("id", vec![bool_sort.clone()], bool_sort.clone());

    let mk = |ctx: &SpecContext, rhs: Term| {
        Equation::new(vec![], ctx.term_true(), id, vec![ctx.term_true()], rhs)
    };
    let e0 = mk(&ctx, ctx.term_true());
    let e1 = mk(&ctx, ctx.term_false());
    ctx.add_equation(e0);
    ctx.add_equation(e1);

    let groups = ctx.equations_by_function();
    assert_eq!(groups.get(&id), Some(&vec![0, 1]));
}

#[test]
fn term_sort_of_function_valued_symbol() {
    let mut ctx = SpecContext::new();
    let nat = ctx.add_sort("Nat");
    let f = ctx.add_mapping("f", vec![SortExpr::Basic(nat)], SortExpr::Basic(nat));

    // Applied: the codomain.
    let zero_like = Term::app(f, vec![Term::var(Variable::new(ctx.intern("n"), SortExpr::Basic(nat)))]);
    assert_eq!(ctx.term_sort(&zero_like), SortExpr::Basic(nat));

    // Unapplied: the function sort.
    let as_value = Term::app(f, vec![]);
    assert_eq!(
        ctx.term_sort(&as_value),
        SortExpr::function(vec![SortExpr::Basic(nat)], SortExpr::Basic(nat))
    );
}
