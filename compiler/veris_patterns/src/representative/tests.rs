use pretty_assertions::assert_eq;
use veris_ir::{SortExpr, SpecContext, Term};

use super::*;

/// `List` over booleans: `nil`, `cons(Bool, List)`.
fn list_context() -> (SpecContext, SortExpr) {
    let mut ctx = SpecContext::new();
    let list = ctx.add_sort("List");
    let bool_sort = SortExpr::Basic(ctx.bool_sort());
    ctx.add_constructor(list, "nil", Vec::new());
    ctx.add_constructor(list, "cons", vec![bool_sort, SortExpr::Basic(list)]);
    (ctx, SortExpr::Basic(list))
}

#[test]
fn nullary_constructor_wins_in_declaration_order() {
    let (ctx, list) = list_context();
    let mut gen = RepresentativeGenerator::new();
    let SortExpr::Basic(id) = &list else {
        unreachable!()
    };
    let nil = ctx.sort(*id).constructors[0];
    assert_eq!(gen.representative(&ctx, &list), Some(Term::ctor(nil, Vec::new())));
}

#[test]
fn bool_representative_is_true() {
    let ctx = SpecContext::new();
    let mut gen = RepresentativeGenerator::new();
    let bool_sort = SortExpr::Basic(ctx.bool_sort());
    assert_eq!(gen.representative(&ctx, &bool_sort), Some(ctx.term_true()));
}

#[test]
fn constant_mapping_backs_an_unconstructed_sort() {
    let mut ctx = SpecContext::new();
    let opaque = ctx.add_sort("Opaque");
    let zero = ctx.add_mapping("zero", Vec::new(), SortExpr::Basic(opaque));
    let mut gen = RepresentativeGenerator::new();
    assert_eq!(
        gen.representative(&ctx, &SortExpr::Basic(opaque)),
        Some(Term::app(zero, Vec::new()))
    );
}

#[test]
fn nested_constructor_when_no_constant_exists() {
    let mut ctx = SpecContext::new();
    let wrapped = ctx.add_sort("Wrapped");
    let wrap = ctx.add_constructor(wrapped, "wrap", vec![SortExpr::Basic(ctx.bool_sort())]);
    let mut gen = RepresentativeGenerator::new();
    assert_eq!(
        gen.representative(&ctx, &SortExpr::Basic(wrapped)),
        Some(Term::ctor(wrap, vec![ctx.term_true()]))
    );
}

#[test]
fn strictly_recursive_sort_has_no_representative() {
    let mut ctx = SpecContext::new();
    let stream = ctx.add_sort("Stream");
    ctx.add_constructor(stream, "scons", vec![SortExpr::Basic(stream)]);
    let mut gen = RepresentativeGenerator::new();
    let sort = SortExpr::Basic(stream);
    assert_eq!(gen.representative(&ctx, &sort), None);
    // The failure is memoized, never retried.
    assert_eq!(gen.representative(&ctx, &sort), None);
}

#[test]
fn function_sort_witness_found_by_signature() {
    let (mut ctx, list) = list_context();
    let is_nil = ctx.add_mapping(
        "is_nil",
        vec![list.clone()],
        SortExpr::Basic(ctx.bool_sort()),
    );
    let mut gen = RepresentativeGenerator::new();
    let sort = SortExpr::function(vec![list], SortExpr::Basic(ctx.bool_sort()));
    assert_eq!(
        gen.representative(&ctx, &sort),
        Some(Term::app(is_nil, Vec::new()))
    );
}

#[test]
fn display_sort_renders_function_shapes() {
    let (ctx, list) = list_context();
    let sort = SortExpr::function(
        vec![list, SortExpr::Basic(ctx.bool_sort())],
        SortExpr::Basic(ctx.bool_sort()),
    );
    assert_eq!(display_sort(&ctx, &sort), "(List, Bool) -> Bool");
}
