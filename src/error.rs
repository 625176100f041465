use crate::parse::SyntaxError;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DiceError {
    #[error("cannot roll an empty expression")]
    Empty,
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("expression rolls more than {limit} dice")]
    DiceCount { limit: usize },
}

impl DiceError {
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax(_))
    }
}
