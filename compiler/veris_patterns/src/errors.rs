//! Error types for pattern unfolding.
//!
//! All variants are fatal for the enclosing translation run: they indicate
//! defects in the input specification, not transient failures, so nothing is
//! retried and no partial output is produced.

use thiserror::Error;

pub type PatternResult<T> = Result<T, PatternError>;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum PatternError {
    /// The representative search exhausted its options for a sort that was
    /// needed as a totality fallback.
    #[error("no representative term could be constructed for sort `{sort}`")]
    UnrepresentableSort { sort: String },

    /// A constructor ended up without a recognizer or a field projection and
    /// symbol manufacturing was disabled.
    #[error("no recognizer/projection available for constructor `{constructor}`")]
    UnclassifiableConstructorFunction { constructor: String },

    /// An equation violates the linear-constructor-pattern precondition.
    /// Filtering such equations is the caller's responsibility; the compiler
    /// itself does not re-validate.
    #[error("equation for `{function}` is not a linear constructor-pattern equation")]
    NonPatternEquation { function: String },
}
