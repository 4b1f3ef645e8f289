//! Translation-level errors.

use thiserror::Error;
use veris_patterns::PatternError;

pub type TranslateResult<T> = Result<T, TranslateError>;

/// Any failure aborts the whole run; no partial output is produced.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TranslateError {
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// Mutually dependent declarations that no emission order can satisfy.
    #[error("cyclic dependencies among {nodes:?}")]
    DependencyCycle { nodes: Vec<String> },
}
