use thiserror::Error;

/// Why a piece of text could not be turned into an [`Expression`](super::Expression).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The input does not match the grammar.
    #[error("Parse error: {0}")]
    Syntax(String),

    #[error("Invalid number '{literal}': {reason}")]
    InvalidNumber { literal: String, reason: String },

    /// No builtin with this name takes the given number of arguments.
    #[error("Function '{name}({signature})' does not exist.")]
    UnresolvedFunction { name: String, signature: String },

    #[error("Math constant '{0}' does not exist.")]
    UnresolvedConstant(String),
}

impl ParseError {
    pub(crate) fn unresolved_function(name: &str, arity: usize) -> Self {
        ParseError::UnresolvedFunction {
            name: name.to_string(),
            signature: vec!["f64"; arity].join(","),
        }
    }

    pub fn is_syntax(&self) -> bool {
        matches!(
            self,
            ParseError::Syntax(_) | ParseError::InvalidNumber { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_function_message_lists_argument_types() {
        let err = ParseError::unresolved_function("NotAFunction", 2);
        assert_eq!(
            err.to_string(),
            "Function 'NotAFunction(f64,f64)' does not exist."
        );
        assert!(!err.is_syntax());
    }

    #[test]
    fn test_unresolved_constant_message() {
        let err = ParseError::UnresolvedConstant("NOTACONSTANT".to_string());
        assert_eq!(err.to_string(), "Math constant 'NOTACONSTANT' does not exist.");
    }
}
