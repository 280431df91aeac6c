//! Error types for grammar evaluation.

use thiserror::Error;

use lsys_grammar::GrammarError;

/// Result type for evaluation operations.
pub type Result<T> = std::result::Result<T, EvalError>;

/// Errors that can occur while evaluating a grammar.
#[derive(Debug, Error)]
pub enum EvalError {
    /// The grammar failed to parse or validate; evaluation never started.
    #[error("grammar error: {0}")]
    Grammar(#[from] GrammarError),

    /// Selection was asked for a rule name no rule declares.
    ///
    /// Fatal to the evaluation: the result is discarded rather than
    /// silently substituting another rule.
    #[error("no rule named '{name}' to select from")]
    UnknownRule {
        /// The unresolvable rule name.
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_rule_names_the_culprit() {
        let err = EvalError::UnknownRule {
            name: "ghost".into(),
        };
        assert!(err.to_string().contains("ghost"));
    }
}
