//! Closed-term evaluation over translated output.
//!
//! Models the target solver's primitives: recognizers, projections, and
//! `not` are interpreted natively; compiled definitions are evaluated by
//! parameter substitution. Used by the soundness-by-enumeration tests.

#![allow(clippy::unwrap_used)]

use rustc_hash::FxHashMap;
use veris_ir::{FunId, SpecContext, Term};
use veris_patterns::Definition;

use crate::output::{FunctionBody, Translation};

pub struct Evaluator<'a> {
    ctx: &'a SpecContext,
    /// Recognizer symbol → the constructor it tests for.
    recognizers: FxHashMap<FunId, FunId>,
    /// Projection symbol → `(constructor, field index)`.
    projections: FxHashMap<FunId, (FunId, usize)>,
    definitions: FxHashMap<FunId, &'a Definition>,
}

impl<'a> Evaluator<'a> {
    pub fn new(ctx: &'a SpecContext) -> Self {
        Evaluator {
            ctx,
            recognizers: FxHashMap::default(),
            projections: FxHashMap::default(),
            definitions: FxHashMap::default(),
        }
    }

    pub fn from_translation(ctx: &'a SpecContext, translation: &'a Translation) -> Self {
        let mut eval = Evaluator::new(ctx);
        for sort in &translation.sorts {
            for decl in &sort.constructors {
                eval.recognizers.insert(decl.recognizer, decl.constructor);
                for (field, &projection) in decl.projections.iter().enumerate() {
                    eval.projections.insert(projection, (decl.constructor, field));
                }
            }
        }
        for decl in &translation.functions {
            if let FunctionBody::Compiled(definition) = &decl.body {
                eval.definitions.insert(decl.function, definition);
            }
        }
        eval
    }

    pub fn apply(&self, function: FunId, args: Vec<Term>) -> Term {
        self.eval(&Term::app(function, args))
    }

    /// Evaluate a closed term to constructor normal form.
    pub fn eval(&self, term: &Term) -> Term {
        match term {
            Term::Var(v) => panic!("open term: {}", self.ctx.resolve(v.name)),
            Term::Ctor { ctor, args } => {
                Term::ctor(*ctor, args.iter().map(|a| self.eval(a)).collect())
            }
            Term::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let condition = self.eval(condition);
                if self.ctx.is_true(&condition) {
                    self.eval(then_branch)
                } else {
                    assert!(self.ctx.is_false(&condition), "non-boolean condition");
                    self.eval(else_branch)
                }
            }
            Term::App { function, args } => {
                let values: Vec<Term> = args.iter().map(|a| self.eval(a)).collect();
                self.apply_symbol(*function, values)
            }
        }
    }

    fn apply_symbol(&self, function: FunId, values: Vec<Term>) -> Term {
        if function == self.ctx.not_fun() {
            return if self.ctx.is_true(&values[0]) {
                self.ctx.term_false()
            } else {
                self.ctx.term_true()
            };
        }
        if let Some(&recognized) = self.recognizers.get(&function) {
            let Term::Ctor { ctor, .. } = &values[0] else {
                panic!("recognizer applied to a non-constructor value");
            };
            return if *ctor == recognized {
                self.ctx.term_true()
            } else {
                self.ctx.term_false()
            };
        }
        if let Some(&(constructor, field)) = self.projections.get(&function) {
            let Term::Ctor { ctor, args } = &values[0] else {
                panic!("projection applied to a non-constructor value");
            };
            assert_eq!(*ctor, constructor, "projection applied off-constructor");
            return args[field].clone();
        }
        if let Some(definition) = self.definitions.get(&function) {
            let bindings = definition
                .parameters
                .iter()
                .cloned()
                .zip(values)
                .collect::<FxHashMap<_, _>>();
            return self.eval(&definition.body.substitute(&bindings));
        }
        panic!(
            "uninterpreted function `{}` in test term",
            self.ctx.function_name(function)
        )
    }
}
