//! Partially pattern-matched rewrite rules.

use veris_ir::{Term, Variable};

/// One partially pattern-matched rewrite rule.
///
/// `match_criteria` is an ordered list of pairs `(path, pattern)` where
/// `path` is an *access path* — a formal parameter of the function being
/// compiled, or a projection applied to another access path — and `pattern`
/// is a constructor application over distinct variables, or a bare variable.
///
/// The rule `{ (A, B), (C, D) }, condition = E, rhs = R` reads: "if the term
/// at `A` matches pattern `B` and the term at `C` matches pattern `D`, and
/// `E` holds after substituting the matched variables, then the definition's
/// value is `R` (under the same substitution)."
///
/// One unfolding step deconstructs a pattern: a criterion
/// `v1 -> cons(n, l)` becomes `head(v1) -> n, tail(v1) -> l`.
///
/// All rules processed together share the same access-path domain, in the
/// same order; the order is what makes the split tie-break deterministic.
#[derive(Clone, Debug)]
pub struct Rule {
    pub match_criteria: Vec<(Term, Term)>,
    pub condition: Term,
    pub rhs: Term,
    pub variables: Vec<Variable>,
}

impl Rule {
    /// The pattern stored at an access path.
    pub fn pattern_at(&self, path: &Term) -> Option<&Term> {
        self.match_criteria
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, pattern)| pattern)
    }

    /// The criteria list without the entry at `path`, order preserved.
    pub(crate) fn criteria_without(&self, path: &Term) -> Vec<(Term, Term)> {
        self.match_criteria
            .iter()
            .filter(|(p, _)| p != path)
            .cloned()
            .collect()
    }
}
