//! Pattern-match unfolding.
//!
//! Converts the rewrite rules of one function symbol into a single decision
//! expression built from recognizer tests, projection reads, and
//! conditionals — no pattern matching remains. For example:
//!
//! ```text
//!   sign_of_list_sum([]) = false;
//!   is_even(n) -> sign_of_list_sum(n |> l) = sign_of_list_sum(l);
//!   !is_even(n) -> sign_of_list_sum(n |> l) = !sign_of_list_sum(l);
//! ```
//!
//! becomes
//!
//! ```text
//!   sign_of_list_sum(l) = if(is_empty(l), false,
//!                            if(is_even(head(l)), sign_of_list_sum(tail(l)),
//!                               !sign_of_list_sum(tail(l))))
//! ```
//!
//! # Algorithm
//!
//! 1. **Seed**: one [`Rule`] per equation, mapping each formal parameter to
//!    the equation's raw argument pattern
//! 2. **Classify**: score every access path as FULL, PARTIAL, or INCOMPLETE
//!    by scanning all rules' patterns there; pick the first path (in
//!    declaration order) achieving the best class — a heuristic tie-break,
//!    not a globally optimal tree
//! 3. **Split**: bucket the rules per constructor of the chosen path's sort,
//!    replacing the consumed pattern with per-field projection criteria;
//!    recurse, then fold the branches into recognizer-guarded conditionals
//! 4. **Fold**: with nothing left to split, chain the rule conditions into
//!    nested conditionals; an incomplete chain falls back to a
//!    representative of the codomain
//!
//! Termination: each split consumes one access path and introduces only the
//! finitely many field paths of one constructor strictly deeper than it.

use rustc_hash::{FxHashMap, FxHashSet};
use veris_ir::{Equation, FreshNameGenerator, FunId, SortExpr, SpecContext, Term, Variable};

use crate::errors::{PatternError, PatternResult};
use crate::representative::{display_sort, RepresentativeGenerator};
use crate::rule::Rule;
use crate::synthesize::SortTables;

/// A function's single replacement definition.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Definition {
    pub function: FunId,
    pub parameters: Vec<Variable>,
    /// The decision expression: conditionals, recognizer/projection
    /// applications, and original right-hand-side fragments only.
    pub body: Term,
}

/// Whether an equation is eligible for pattern-match unfolding: every
/// left-hand-side argument subterm is a constructor application or a
/// variable, and all variables across all arguments are pairwise distinct.
pub fn is_pattern_matching_equation(equation: &Equation) -> bool {
    let mut seen = FxHashSet::default();
    equation
        .lhs_args
        .iter()
        .all(|arg| is_linear_pattern(arg, &mut seen))
}

/// [`is_pattern_matching_equation`] as a checked precondition.
pub fn ensure_pattern_matching_equation(
    ctx: &SpecContext,
    equation: &Equation,
) -> PatternResult<()> {
    if is_pattern_matching_equation(equation) {
        Ok(())
    } else {
        Err(PatternError::NonPatternEquation {
            function: ctx.function_name(equation.function).to_owned(),
        })
    }
}

fn is_linear_pattern(term: &Term, seen: &mut FxHashSet<Variable>) -> bool {
    match term {
        Term::Var(v) => seen.insert(v.clone()),
        Term::Ctor { args, .. } => args.iter().all(|a| is_linear_pattern(a, seen)),
        Term::App { .. } | Term::If { .. } => false,
    }
}

/// Compile the equations of `function` into a [`Definition`].
///
/// Precondition: every equation is a pattern-matching equation for
/// `function` (checked by the caller, not re-validated here), and the
/// recognizer/projection tables are complete for every constructor involved.
#[tracing::instrument(level = "debug", skip_all, fields(function = ctx.function_name(function)))]
pub fn unfold_function(
    ctx: &SpecContext,
    tables: &SortTables,
    representatives: &mut RepresentativeGenerator,
    function: FunId,
    equations: &[&Equation],
) -> PatternResult<Definition> {
    debug_assert!(equations.iter().all(|eq| eq.function == function));
    debug_assert!(equations.iter().all(|eq| is_pattern_matching_equation(eq)));

    let symbol = ctx.function(function);
    let codomain = symbol.codomain.clone();

    // Fresh formal parameters, shared by every seeded rule.
    let mut names = FreshNameGenerator::new();
    let parameters: Vec<Variable> = symbol
        .domain
        .iter()
        .map(|sort| Variable::new(names.fresh(ctx.interner(), "p"), sort.clone()))
        .collect();

    let rules: Vec<Rule> = equations
        .iter()
        .map(|eq| Rule {
            match_criteria: parameters
                .iter()
                .zip(&eq.lhs_args)
                .map(|(p, arg)| (Term::var(p.clone()), arg.clone()))
                .collect(),
            condition: eq.condition.clone(),
            rhs: eq.rhs.clone(),
            variables: eq.variables.clone(),
        })
        .collect();

    let body = reduce(ctx, tables, representatives, rules, &codomain)?;
    Ok(Definition {
        function,
        parameters,
        body,
    })
}

/// How well an access path supports splitting, worst to best.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
enum MatchClass {
    /// Only constructor patterns, but some constructor of the sort is
    /// missing: the definition must be completed artificially.
    Incomplete,
    /// A mix of variable and constructor patterns: splitting duplicates the
    /// variable rules into every bucket.
    Partial,
    /// Every rule has a constructor pattern and the whole sort is covered.
    Full,
}

/// Reduce a rule set sharing one access-path domain to a decision
/// expression.
fn reduce(
    ctx: &SpecContext,
    tables: &SortTables,
    representatives: &mut RepresentativeGenerator,
    rules: Vec<Rule>,
    codomain: &SortExpr,
) -> PatternResult<Term> {
    if rules.is_empty() {
        return fallback(ctx, representatives, codomain);
    }

    // Classify every access path; first path at the best class wins.
    let mut best: Option<(usize, MatchClass)> = None;
    for (index, (path, _)) in rules[0].match_criteria.iter().enumerate() {
        let mut variable_seen = false;
        let mut constructors_seen = FxHashSet::default();
        for rule in &rules {
            match rule.pattern_at(path) {
                Some(Term::Var(_)) => variable_seen = true,
                Some(Term::Ctor { ctor, .. }) => {
                    constructors_seen.insert(*ctor);
                }
                // Precondition: patterns are variables or constructor
                // applications, and the path domain is shared.
                _ => unreachable!("malformed match criteria at access path"),
            }
        }
        if constructors_seen.is_empty() {
            continue;
        }

        let total = match ctx.term_sort(path) {
            SortExpr::Basic(id) => ctx.sort(id).constructors.len(),
            SortExpr::Function { .. } => {
                unreachable!("constructor pattern on a function-sorted path")
            }
        };
        let class = if variable_seen {
            MatchClass::Partial
        } else if constructors_seen.len() < total {
            MatchClass::Incomplete
        } else {
            MatchClass::Full
        };

        if best.map_or(true, |(_, current)| class > current) {
            best = Some((index, class));
            if class == MatchClass::Full {
                break;
            }
        }
    }

    let Some((index, class)) = best else {
        // Nothing to split: all patterns are bare variables.
        return fold_condition_chain(ctx, representatives, &rules, codomain);
    };
    let split_path = rules[0].match_criteria[index].0.clone();
    split(
        ctx,
        tables,
        representatives,
        &rules,
        &split_path,
        class,
        codomain,
    )
}

fn fallback(
    ctx: &SpecContext,
    representatives: &mut RepresentativeGenerator,
    codomain: &SortExpr,
) -> PatternResult<Term> {
    representatives
        .representative(ctx, codomain)
        .ok_or_else(|| PatternError::UnrepresentableSort {
            sort: display_sort(ctx, codomain),
        })
}

/// Split the rule set on one access path: one bucket per constructor of the
/// path's sort, then recognizer-guarded conditionals over the buckets.
fn split(
    ctx: &SpecContext,
    tables: &SortTables,
    representatives: &mut RepresentativeGenerator,
    rules: &[Rule],
    split_path: &Term,
    class: MatchClass,
    codomain: &SortExpr,
) -> PatternResult<Term> {
    let SortExpr::Basic(sort) = ctx.term_sort(split_path) else {
        unreachable!("split path must have a declared sort")
    };
    tracing::debug!(
        path = %ctx.display_term(split_path),
        sort = ctx.sort_name(sort),
        ?class,
        "splitting on access path"
    );

    let constructors = ctx.sort(sort).constructors.clone();
    let mut position: FxHashMap<FunId, usize> = FxHashMap::default();
    for (i, &c) in constructors.iter().enumerate() {
        position.insert(c, i);
    }
    let mut buckets: Vec<Vec<Rule>> = vec![Vec::new(); constructors.len()];

    for rule in rules {
        match rule.pattern_at(split_path) {
            Some(Term::Ctor { ctor, args }) => {
                // Strip the constructor; introduce one projection criterion
                // per constructor argument.
                let ctor = *ctor;
                let args = args.clone();
                let mut criteria = rule.criteria_without(split_path);
                for (field, pattern) in args.into_iter().enumerate() {
                    criteria.push((projection_read(ctx, tables, ctor, field, split_path), pattern));
                }
                buckets[position[&ctor]].push(Rule {
                    match_criteria: criteria,
                    condition: rule.condition.clone(),
                    rhs: rule.rhs.clone(),
                    variables: rule.variables.clone(),
                });
            }
            Some(Term::Var(v)) => {
                // A variable pattern that must nonetheless be matched
                // against every constructor: copy the rule into each bucket,
                // substituting the scrutinee for the vanishing variable.
                let v = v.clone();
                let condition = rule.condition.substitute_var(&v, split_path);
                let rhs = rule.rhs.substitute_var(&v, split_path);
                for (slot, &constructor) in constructors.iter().enumerate() {
                    let mut names = FreshNameGenerator::new();
                    for existing in &rule.variables {
                        names.add_identifier(existing.name);
                    }
                    let mut criteria = rule.criteria_without(split_path);
                    let mut variables: Vec<Variable> = rule
                        .variables
                        .iter()
                        .filter(|existing| **existing != v)
                        .cloned()
                        .collect();
                    for (field, field_sort) in
                        ctx.function(constructor).domain.iter().enumerate()
                    {
                        let fresh = Variable::new(
                            names.fresh(ctx.interner(), "v"),
                            field_sort.clone(),
                        );
                        criteria.push((
                            projection_read(ctx, tables, constructor, field, split_path),
                            Term::var(fresh.clone()),
                        ));
                        variables.push(fresh);
                    }
                    buckets[slot].push(Rule {
                        match_criteria: criteria,
                        condition: condition.clone(),
                        rhs: rhs.clone(),
                        variables,
                    });
                }
            }
            // Rules matching a different constructor were never put in this
            // bucket; a missing entry would mean the shared-domain invariant
            // broke.
            _ => unreachable!("malformed match criteria at split path"),
        }
    }

    // Compile each bucket, then fold: the last constructor's branch is the
    // innermost default, every earlier one gets a recognizer guard.
    let mut branches = Vec::with_capacity(buckets.len());
    for bucket in buckets {
        branches.push(reduce(ctx, tables, representatives, bucket, codomain)?);
    }
    let mut result = branches
        .pop()
        .unwrap_or_else(|| unreachable!("constructed sorts have at least one constructor"));
    for (&constructor, branch) in constructors.iter().zip(branches).rev() {
        let recognizer = tables.recognizer(constructor).unwrap_or_else(|| {
            panic!(
                "constructor `{}` missing from recognizer tables",
                ctx.function_name(constructor)
            )
        });
        let guard = Term::app(recognizer, vec![split_path.clone()]);
        result = ctx.lazy_if(guard, branch, result);
    }
    Ok(result)
}

/// `projection(c, field)(path)` as an access path.
fn projection_read(
    ctx: &SpecContext,
    tables: &SortTables,
    constructor: FunId,
    field: usize,
    path: &Term,
) -> Term {
    let projection = tables.projection(constructor, field).unwrap_or_else(|| {
        panic!(
            "constructor `{}` missing from projection tables",
            ctx.function_name(constructor)
        )
    });
    Term::app(projection, vec![path.clone()])
}

/// Fold rules whose patterns are all bare variables into a conditional
/// chain `if(cond₁, rhs₁, if(cond₂, rhs₂, …, base))`.
///
/// The base case is the final rule's right-hand side when its condition is
/// the literal `true`; a pair of syntactically complementary trailing
/// conditions also proves totality. Anything else falls back to a
/// representative of the codomain.
fn fold_condition_chain(
    ctx: &SpecContext,
    representatives: &mut RepresentativeGenerator,
    rules: &[Rule],
    codomain: &SortExpr,
) -> PatternResult<Term> {
    // Substitute each rule's own pattern bindings into its condition/rhs.
    let resolved: Vec<(Term, Term)> = rules
        .iter()
        .map(|rule| {
            let mut bindings = FxHashMap::default();
            for (path, pattern) in &rule.match_criteria {
                match pattern {
                    Term::Var(v) => {
                        bindings.insert(v.clone(), path.clone());
                    }
                    _ => unreachable!("unsplittable rules bind only variables"),
                }
            }
            (
                rule.condition.substitute(&bindings),
                rule.rhs.substitute(&bindings),
            )
        })
        .collect();

    let n = resolved.len();
    let (mut result, chained) = match resolved.as_slice() {
        [.., (last_condition, last_rhs)] if ctx.is_true(last_condition) => {
            (last_rhs.clone(), &resolved[..n - 1])
        }
        [.., (second_condition, second_rhs), (last_condition, last_rhs)]
            if ctx.is_complement(second_condition, last_condition) =>
        {
            // Jointly total: `c` and `not(c)` cover everything, so no
            // representative is needed.
            (
                ctx.lazy_if(second_condition.clone(), second_rhs.clone(), last_rhs.clone()),
                &resolved[..n - 2],
            )
        }
        _ => (
            fallback(ctx, representatives, codomain)?,
            resolved.as_slice(),
        ),
    };

    for (condition, rhs) in chained.iter().rev() {
        result = ctx.lazy_if(condition.clone(), rhs.clone(), result);
    }
    Ok(result)
}
