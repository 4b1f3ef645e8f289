//! The batch translation pipeline.
//!
//! One synchronous pass over a populated [`SpecContext`]:
//!
//! 1. group equations by head symbol
//! 2. discover recognizer/projection-shaped functions, then manufacture
//!    symbols for every remaining gap
//! 3. unfold each eligible mapping into a pattern-free decision expression;
//!    mappings with ineligible (or no) equations pass through verbatim
//! 4. schedule sorts, then functions, so every declaration follows its
//!    dependencies
//!
//! Any error aborts the run with no partial output.

use rustc_hash::FxHashMap;
use veris_ir::{Equation, FunId, FunctionKind, SortId, SpecContext, Term};
use veris_patterns::{
    complete_tables, discover_tables, is_pattern_matching_equation, unfold_function,
    RepresentativeGenerator, SortTables,
};
use veris_schedule::topological_order;

use crate::deps;
use crate::errors::{TranslateError, TranslateResult};
use crate::output::{ConstructorDecl, FunctionBody, FunctionDecl, SortDecl, Translation};

/// Translate every declaration in `ctx` into scheduled, pattern-free form.
///
/// `ctx` is mutable only for the synthesis phase, which may declare fresh
/// recognizer/projection symbols; compilation itself reads it immutably.
#[tracing::instrument(level = "debug", skip_all)]
pub fn translate(ctx: &mut SpecContext) -> TranslateResult<Translation> {
    let groups = ctx.equations_by_function();
    let mut tables = discover_tables(ctx, &groups);
    complete_tables(ctx, &mut tables, true)?;
    let ctx = &*ctx;

    let assigned = tables.assigned_functions();
    let mut representatives = RepresentativeGenerator::new();

    let mut decls = Vec::new();
    for function in ctx.fun_ids() {
        if ctx.function(function).kind != FunctionKind::Mapping {
            continue;
        }
        // Canonical recognizers/projections are emitted with their sort,
        // not as standalone definitions.
        if assigned.contains(&function) {
            continue;
        }
        let equations: Vec<&Equation> = groups
            .get(&function)
            .map(|indices| indices.iter().map(|&i| &ctx.equations()[i]).collect())
            .unwrap_or_default();
        decls.push(compile_function(
            ctx,
            &tables,
            &mut representatives,
            function,
            &equations,
        )?);
    }

    let sorts = schedule_sorts(ctx, &tables)?;
    let functions = schedule_functions(ctx, decls)?;

    Ok(Translation {
        sorts,
        functions,
        synthesized: tables.synthesized.clone(),
    })
}

fn compile_function(
    ctx: &SpecContext,
    tables: &SortTables,
    representatives: &mut RepresentativeGenerator,
    function: FunId,
    equations: &[&Equation],
) -> TranslateResult<FunctionDecl> {
    let eligible =
        !equations.is_empty() && equations.iter().all(|eq| is_pattern_matching_equation(eq));

    let body = if eligible {
        let definition = unfold_function(ctx, tables, representatives, function, equations)?;
        FunctionBody::Compiled(definition)
    } else {
        tracing::debug!(
            function = ctx.function_name(function),
            equations = equations.len(),
            "passing function through without unfolding"
        );
        FunctionBody::Passthrough(equations.iter().map(|&eq| eq.clone()).collect())
    };

    let terms: Vec<&Term> = match &body {
        FunctionBody::Compiled(definition) => vec![&definition.body],
        FunctionBody::Passthrough(equations) => equations
            .iter()
            .flat_map(|eq| {
                [&eq.condition, &eq.rhs]
                    .into_iter()
                    .chain(eq.lhs_args.iter())
            })
            .collect(),
    };
    let (sort_dependencies, function_dependencies) =
        deps::function_decl_deps(ctx, function, &terms);

    Ok(FunctionDecl {
        function,
        body,
        sort_dependencies,
        function_dependencies,
    })
}

fn schedule_sorts(ctx: &SpecContext, tables: &SortTables) -> TranslateResult<Vec<SortDecl>> {
    let nodes: Vec<_> = ctx
        .sort_ids()
        .map(|sort| (sort, deps::sort_deps_of_sort(ctx, sort)))
        .collect();
    let order = topological_order(nodes).map_err(|cycle| TranslateError::DependencyCycle {
        nodes: cycle
            .remaining
            .iter()
            .map(|&s| ctx.sort_name(s).to_owned())
            .collect(),
    })?;

    Ok(order
        .into_iter()
        .map(|sort| SortDecl {
            constructors: constructor_decls(ctx, tables, sort),
            dependencies: deps::sort_deps_of_sort(ctx, sort),
            sort,
        })
        .collect())
}

fn constructor_decls(ctx: &SpecContext, tables: &SortTables, sort: SortId) -> Vec<ConstructorDecl> {
    ctx.sort(sort)
        .constructors
        .iter()
        .map(|&constructor| ConstructorDecl {
            constructor,
            recognizer: tables.recognizer(constructor).unwrap_or_else(|| {
                panic!(
                    "constructor `{}` missing from recognizer tables",
                    ctx.function_name(constructor)
                )
            }),
            projections: (0..ctx.function(constructor).arity())
                .map(|field| {
                    tables.projection(constructor, field).unwrap_or_else(|| {
                        panic!(
                            "constructor `{}` missing from projection tables",
                            ctx.function_name(constructor)
                        )
                    })
                })
                .collect(),
        })
        .collect()
}

fn schedule_functions(
    ctx: &SpecContext,
    decls: Vec<FunctionDecl>,
) -> TranslateResult<Vec<FunctionDecl>> {
    let nodes: Vec<_> = decls
        .iter()
        .map(|decl| (decl.function, decl.function_dependencies.clone()))
        .collect();
    let order = topological_order(nodes).map_err(|cycle| TranslateError::DependencyCycle {
        nodes: cycle
            .remaining
            .iter()
            .map(|&f| ctx.function_name(f).to_owned())
            .collect(),
    })?;

    let mut by_function: FxHashMap<FunId, FunctionDecl> = decls
        .into_iter()
        .map(|decl| (decl.function, decl))
        .collect();
    Ok(order
        .into_iter()
        .map(|function| {
            by_function
                .remove(&function)
                .unwrap_or_else(|| panic!("scheduler returned an unknown function"))
        })
        .collect())
}
