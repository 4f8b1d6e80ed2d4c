use thiserror::Error;

/// Reasons an expression body cannot be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    #[error("unexpected character '{0}' at byte {1}")]
    UnexpectedChar(char, usize),

    #[error("unterminated string literal starting at byte {0}")]
    UnterminatedString(usize),

    #[error("unterminated comment starting at byte {0}")]
    UnterminatedComment(usize),

    #[error("unterminated interpolation hole starting at byte {0}")]
    UnterminatedHole(usize),

    #[error("unexpected {found} at byte {pos}")]
    UnexpectedToken { found: String, pos: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("body is empty")]
    EmptyBody,

    #[error("body is not a lambda expression")]
    NotALambda,

    #[error("lambda takes {0} parameters, expected exactly one")]
    ParameterCount(usize),

    #[error("body refers to an outer '{0}' that the parameter rename would capture")]
    Capture(String),
}
