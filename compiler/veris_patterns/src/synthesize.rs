//! Recognizer/projection discovery and synthesis.
//!
//! A solver without native pattern matching needs, for every constructor, a
//! boolean *recognizer* and one *projection* per field. Many specifications
//! already define functions that behave exactly like these (an `is_nil`, a
//! `head`); this module discovers such functions by classifying their rewrite
//! rules, and manufactures fresh symbols for whatever remains.
//!
//! # Classification
//!
//! A candidate is any function with a single domain sort that has
//! constructors, excluding the built-in boolean sort (booleans are native to
//! the target, so boolean-domain functions always compile as definitions).
//!
//! **Recognizer**: every equation is unconditional, matches one linear
//! constructor pattern, and rewrites to exactly `true` or `false`; across the
//! group every constructor of the domain sort is assigned exactly one
//! polarity, with exactly one constructor assigned `true`.
//!
//! **Projection**: a single unconditional equation matching one linear
//! constructor pattern whose right-hand side is one of the pattern variables;
//! the variable's position is the field index.
//!
//! # Postcondition
//!
//! After [`complete_tables`], every constructor has a recognizer and every
//! field of every constructor has a projection — the invariant the pattern
//! compiler relies on.

use rustc_hash::{FxHashMap, FxHashSet};
use veris_ir::{Equation, FunId, SortExpr, SortId, SpecContext, Term, Variable};

use crate::errors::{PatternError, PatternResult};

/// Recognizer and projection assignments per constructor.
#[derive(Default, Debug)]
pub struct SortTables {
    /// Constructor → its canonical recognizer.
    recognizers: FxHashMap<FunId, FunId>,
    /// Constructor → per-field canonical projection.
    projections: FxHashMap<FunId, Vec<Option<FunId>>>,
    /// Symbols manufactured by [`complete_tables`], in synthesis order.
    /// These have no rewrite rules of their own; the emitter declares them
    /// as primitives or compiles them from [`defining_equations`].
    pub synthesized: Vec<FunId>,
}

impl SortTables {
    pub fn recognizer(&self, constructor: FunId) -> Option<FunId> {
        self.recognizers.get(&constructor).copied()
    }

    pub fn projection(&self, constructor: FunId, field: usize) -> Option<FunId> {
        self.projections
            .get(&constructor)?
            .get(field)
            .copied()
            .flatten()
    }

    /// The constructor recognized by `function`, if `function` is a
    /// canonical recognizer.
    pub fn recognized_constructor(&self, function: FunId) -> Option<FunId> {
        self.recognizers
            .iter()
            .find(|(_, &r)| r == function)
            .map(|(&c, _)| c)
    }

    /// The `(constructor, field)` projected by `function`, if `function` is
    /// a canonical projection.
    pub fn projected_field(&self, function: FunId) -> Option<(FunId, usize)> {
        self.projections.iter().find_map(|(&c, fields)| {
            fields
                .iter()
                .position(|&p| p == Some(function))
                .map(|j| (c, j))
        })
    }

    /// Every function assigned as a canonical recognizer or projection.
    pub fn assigned_functions(&self) -> FxHashSet<FunId> {
        let mut out: FxHashSet<FunId> = self.recognizers.values().copied().collect();
        out.extend(self.projections.values().flatten().copied().flatten());
        out
    }
}

/// A constructor application over pairwise-distinct variables.
fn linear_constructor_pattern(term: &Term) -> Option<(FunId, Vec<&Variable>)> {
    let Term::Ctor { ctor, args } = term else {
        return None;
    };
    let mut seen = FxHashSet::default();
    let mut vars = Vec::with_capacity(args.len());
    for arg in args {
        let Term::Var(v) = arg else {
            return None;
        };
        if !seen.insert(v) {
            return None;
        }
        vars.push(v);
    }
    Some((*ctor, vars))
}

/// Scan every equation group and classify recognizer- and projection-shaped
/// functions. Functions are visited in declaration order, so the first
/// matching function becomes the canonical one.
pub fn discover_tables(
    ctx: &SpecContext,
    groups: &FxHashMap<FunId, Vec<usize>>,
) -> SortTables {
    let mut tables = SortTables::default();

    for function in ctx.fun_ids() {
        let Some(group) = groups.get(&function) else {
            continue;
        };
        let symbol = ctx.function(function);
        let [SortExpr::Basic(domain)] = symbol.domain.as_slice() else {
            continue;
        };
        let domain = *domain;
        if !ctx.sort(domain).is_constructed() {
            continue;
        }
        // Booleans are native to the target; a boolean-domain function like
        // negation must compile, not be absorbed as a recognizer of
        // `true`/`false`.
        if domain == ctx.bool_sort() {
            continue;
        }

        if symbol.codomain == SortExpr::Basic(ctx.bool_sort()) {
            if let Some(constructor) = classify_recognizer(ctx, domain, group) {
                tables.recognizers.entry(constructor).or_insert_with(|| {
                    tracing::debug!(
                        recognizer = ctx.function_name(function),
                        constructor = ctx.function_name(constructor),
                        "discovered recognizer"
                    );
                    function
                });
            }
        }

        if let Some((constructor, field)) = classify_projection(ctx, domain, group) {
            let arity = ctx.function(constructor).arity();
            let fields = tables
                .projections
                .entry(constructor)
                .or_insert_with(|| vec![None; arity]);
            if fields[field].is_none() {
                tracing::debug!(
                    projection = ctx.function_name(function),
                    constructor = ctx.function_name(constructor),
                    field,
                    "discovered projection"
                );
                fields[field] = Some(function);
            }
        }
    }

    tables
}

/// The constructor this group recognizes, if the group is recognizer-shaped.
fn classify_recognizer(ctx: &SpecContext, domain: SortId, group: &[usize]) -> Option<FunId> {
    let mut positive = FxHashSet::default();
    let mut negative = FxHashSet::default();

    for &index in group {
        let eq = &ctx.equations()[index];
        if !ctx.is_true(&eq.condition) || eq.lhs_args.len() != 1 {
            return None;
        }
        let (constructor, _) = linear_constructor_pattern(&eq.lhs_args[0])?;
        if ctx.function(constructor).codomain != SortExpr::Basic(domain) {
            return None;
        }
        let assigned = if ctx.is_true(&eq.rhs) {
            &mut positive
        } else if ctx.is_false(&eq.rhs) {
            &mut negative
        } else {
            return None;
        };
        assigned.insert(constructor);
        // The same constructor with both polarities disqualifies the group.
        if positive.contains(&constructor) && negative.contains(&constructor) {
            return None;
        }
    }

    let total = ctx.sort(domain).constructors.len();
    if positive.len() == 1 && positive.len() + negative.len() == total {
        positive.into_iter().next()
    } else {
        None
    }
}

/// The `(constructor, field)` this group projects, if projection-shaped.
fn classify_projection(
    ctx: &SpecContext,
    domain: SortId,
    group: &[usize],
) -> Option<(FunId, usize)> {
    let [index] = group else {
        return None;
    };
    let eq = &ctx.equations()[*index];
    if !ctx.is_true(&eq.condition) || eq.lhs_args.len() != 1 {
        return None;
    }
    let Term::Var(rhs_var) = &eq.rhs else {
        return None;
    };
    let (constructor, vars) = linear_constructor_pattern(&eq.lhs_args[0])?;
    if ctx.function(constructor).codomain != SortExpr::Basic(domain) {
        return None;
    }
    let field = vars.iter().position(|v| *v == rhs_var)?;
    Some((constructor, field))
}

/// Manufacture fresh recognizer/projection symbols for every gap left by
/// discovery. With `manufacture` disabled, any gap is an error instead.
pub fn complete_tables(
    ctx: &mut SpecContext,
    tables: &mut SortTables,
    manufacture: bool,
) -> PatternResult<()> {
    let constructed: Vec<(SortId, Vec<FunId>)> = ctx
        .sort_ids()
        .filter(|&s| ctx.sort(s).is_constructed())
        .map(|s| (s, ctx.sort(s).constructors.clone()))
        .collect();

    for (sort, constructors) in constructed {
        for constructor in constructors {
            let ctor_name = ctx.function_name(constructor);

            if tables.recognizer(constructor).is_none() {
                if !manufacture {
                    return Err(PatternError::UnclassifiableConstructorFunction {
                        constructor: ctor_name.to_owned(),
                    });
                }
                let name = ctx.fresh_name(&format!("recognise-{ctor_name}"));
                let recognizer = ctx.add_recognizer(name, sort);
                tracing::debug!(
                    recognizer = ctx.resolve(name),
                    constructor = ctor_name,
                    "synthesized recognizer"
                );
                tables.recognizers.insert(constructor, recognizer);
                tables.synthesized.push(recognizer);
            }

            let fields = ctx.function(constructor).domain.clone();
            for (index, field_sort) in fields.into_iter().enumerate() {
                if tables.projection(constructor, index).is_some() {
                    continue;
                }
                if !manufacture {
                    return Err(PatternError::UnclassifiableConstructorFunction {
                        constructor: ctor_name.to_owned(),
                    });
                }
                let name = ctx.fresh_name(&format!("{ctor_name}-field-{index}"));
                let projection = ctx.add_projection(name, sort, field_sort);
                tracing::debug!(
                    projection = ctx.resolve(name),
                    constructor = ctor_name,
                    field = index,
                    "synthesized projection"
                );
                let arity = ctx.function(constructor).arity();
                let entry = tables
                    .projections
                    .entry(constructor)
                    .or_insert_with(|| vec![None; arity]);
                entry[index] = Some(projection);
                tables.synthesized.push(projection);
            }
        }
    }

    Ok(())
}

/// The trivial defining equations for a synthesized symbol: the positive
/// case per constructor for a recognizer, the matching-constructor case for
/// a projection.
///
/// This is the extension point for targets without native datatype support:
/// the returned equations are linear constructor-pattern equations, so they
/// can be fed straight back through the pattern compiler.
pub fn defining_equations(
    ctx: &SpecContext,
    tables: &SortTables,
    symbol: FunId,
) -> Vec<Equation> {
    if let Some(recognized) = tables.recognized_constructor(symbol) {
        let SortExpr::Basic(domain) = ctx.function(symbol).domain[0].clone() else {
            return Vec::new();
        };
        return ctx
            .sort(domain)
            .constructors
            .clone()
            .into_iter()
            .map(|constructor| {
                let vars = field_variables(ctx, constructor);
                let args = vars.iter().cloned().map(Term::var).collect();
                let rhs = if constructor == recognized {
                    ctx.term_true()
                } else {
                    ctx.term_false()
                };
                Equation::new(
                    vars,
                    ctx.term_true(),
                    symbol,
                    vec![Term::ctor(constructor, args)],
                    rhs,
                )
            })
            .collect();
    }

    if let Some((constructor, field)) = tables.projected_field(symbol) {
        let vars = field_variables(ctx, constructor);
        let args = vars.iter().cloned().map(Term::var).collect();
        let rhs = Term::var(vars[field].clone());
        return vec![Equation::new(
            vars,
            ctx.term_true(),
            symbol,
            vec![Term::ctor(constructor, args)],
            rhs,
        )];
    }

    Vec::new()
}

/// One distinct variable per constructor field.
fn field_variables(ctx: &SpecContext, constructor: FunId) -> Vec<Variable> {
    ctx.function(constructor)
        .domain
        .iter()
        .enumerate()
        .map(|(i, sort)| Variable::new(ctx.intern(&format!("x{i}")), sort.clone()))
        .collect()
}
