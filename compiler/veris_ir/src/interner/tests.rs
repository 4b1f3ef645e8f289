use pretty_assertions::assert_eq;

use super::*;

#[test]
fn intern_round_trip() {
    let interner = NameInterner::new();
    let a = interner.intern("cons");
    let b = interner.intern("nil");
    assert_ne!(a, b);
    assert_eq!(interner.resolve(a), "cons");
    assert_eq!(interner.resolve(b), "nil");
}

#[test]
fn intern_is_idempotent() {
    let interner = NameInterner::new();
    assert_eq!(interner.intern("head"), interner.intern("head"));
}

#[test]
fn empty_string_is_name_empty() {
    let interner = NameInterner::new();
    assert_eq!(interner.intern(""), Name::EMPTY);
}

#[test]
fn fresh_skips_used_names() {
    let interner = NameInterner::new();
    let mut gen = FreshNameGenerator::new();
    gen.add_identifier(interner.intern("v"));
    gen.add_identifier(interner.intern("v1"));

    let fresh = gen.fresh(&interner, "v");
    assert_eq!(interner.resolve(fresh), "v2");
}

#[test]
fn fresh_returns_base_when_unused() {
    let interner = NameInterner::new();
    let mut gen = FreshNameGenerator::new();
    let fresh = gen.fresh(&interner, "v");
    assert_eq!(interner.resolve(fresh), "v");
    // The returned name is itself marked used.
    let next = gen.fresh(&interner, "v");
    assert_eq!(interner.resolve(next), "v1");
}
