//! Representative terms.
//!
//! A representative is an arbitrary closed witness of a sort, used as the
//! fallback branch when a compiled definition does not cover every case.
//! The search is memoized per sort — including failures, which are never
//! retried — and prefers whatever it finds first in declaration order.
//! This is a documented "simplest found, not simplest possible" policy:
//! the result depends only on declaration order, never on term size.

use rustc_hash::FxHashMap;
use veris_ir::{FunctionKind, SortExpr, SpecContext, Term};

/// Maximum constructor nesting the search will attempt.
pub const DEFAULT_SEARCH_DEPTH: usize = 3;

/// Memoized representative-term search.
#[derive(Default)]
pub struct RepresentativeGenerator {
    cache: FxHashMap<SortExpr, Option<Term>>,
}

impl RepresentativeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a closed witness term of `sort`, or `None` if the search fails.
    pub fn representative(&mut self, ctx: &SpecContext, sort: &SortExpr) -> Option<Term> {
        self.find(ctx, sort, DEFAULT_SEARCH_DEPTH)
    }

    fn find(&mut self, ctx: &SpecContext, sort: &SortExpr, depth: usize) -> Option<Term> {
        if let Some(cached) = self.cache.get(sort) {
            return cached.clone();
        }
        let result = self.search(ctx, sort, depth);
        if result.is_none() {
            tracing::debug!(sort = %display_sort(ctx, sort), "no representative found");
        }
        self.cache.insert(sort.clone(), result.clone());
        result
    }

    fn search(&mut self, ctx: &SpecContext, sort: &SortExpr, depth: usize) -> Option<Term> {
        // Function sorts: witnesses are found by signature search among the
        // declared symbols, never built structurally.
        if let SortExpr::Function { domain, codomain } = sort {
            return ctx.fun_ids().find_map(|f| {
                let symbol = ctx.function(f);
                (symbol.domain == *domain && symbol.codomain == **codomain)
                    .then(|| Term::app(f, Vec::new()))
            });
        }
        let SortExpr::Basic(id) = sort else {
            return None;
        };

        // (1) A nullary constructor, in declaration order.
        for &c in &ctx.sort(*id).constructors {
            if ctx.function(c).is_constant() {
                return Some(Term::ctor(c, Vec::new()));
            }
        }

        // (2) A constant ordinary mapping of this codomain.
        for f in ctx.fun_ids() {
            let symbol = ctx.function(f);
            if symbol.kind == FunctionKind::Mapping
                && symbol.is_constant()
                && symbol.codomain == *sort
            {
                return Some(Term::app(f, Vec::new()));
            }
        }

        if depth == 0 {
            return None;
        }

        // (3) A non-constant constructor whose fields all have
        // representatives one level down.
        let constructors = ctx.sort(*id).constructors.clone();
        for c in constructors {
            if let Some(args) = self.argument_witnesses(ctx, &ctx.function(c).domain.clone(), depth)
            {
                return Some(Term::ctor(c, args));
            }
        }

        // (4) The same attempt over ordinary mappings with this codomain.
        for f in ctx.fun_ids() {
            let symbol = ctx.function(f);
            if symbol.kind != FunctionKind::Mapping || symbol.codomain != *sort {
                continue;
            }
            let domain = symbol.domain.clone();
            if let Some(args) = self.argument_witnesses(ctx, &domain, depth) {
                return Some(Term::app(f, args));
            }
        }

        None
    }

    /// Representatives for every sort in `domain` at `depth - 1`, or `None`
    /// as soon as one field fails.
    fn argument_witnesses(
        &mut self,
        ctx: &SpecContext,
        domain: &[SortExpr],
        depth: usize,
    ) -> Option<Vec<Term>> {
        if domain.is_empty() {
            return None; // Constants were already tried.
        }
        let mut args = Vec::with_capacity(domain.len());
        for field in domain {
            args.push(self.find(ctx, field, depth - 1)?);
        }
        Some(args)
    }
}

pub(crate) fn display_sort(ctx: &SpecContext, sort: &SortExpr) -> String {
    match sort {
        SortExpr::Basic(id) => ctx.sort_name(*id).to_owned(),
        SortExpr::Function { domain, codomain } => {
            let rendered: Vec<String> = domain.iter().map(|d| display_sort(ctx, d)).collect();
            format!("({}) -> {}", rendered.join(", "), display_sort(ctx, codomain))
        }
    }
}

#[cfg(test)]
mod tests;
