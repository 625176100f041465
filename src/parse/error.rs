use crate::common::Operator;
use std::fmt;
use thiserror::Error;

/// How much input is shown on either side of the position where parsing failed.
const SNIPPET_RADIUS: usize = 20;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind}{}", .snippet.fmt_snippet())]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub snippet: Option<String>,
}

impl SyntaxError {
    pub(crate) fn new(kind: SyntaxErrorKind) -> Self {
        Self {
            kind,
            snippet: None,
        }
    }

    /// Attaches the text surrounding byte offset `at` of `source`.
    pub(crate) fn at(kind: SyntaxErrorKind, source: &str, at: usize) -> Self {
        Self {
            kind,
            snippet: Some(window(source, at)),
        }
    }

    pub(crate) fn in_token(kind: SyntaxErrorKind, token: &str) -> Self {
        Self {
            kind,
            snippet: Some(token.to_owned()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxErrorKind {
    InvalidCharacter(char),
    RepeatedDecimalPoint,
    UnexpectedWhitespace,
    UnexpectedOperator(Operator),
    ParenthesisMismatch,
    MisplacedComma,
    ArgumentCount {
        operator: Operator,
        expected: usize,
        found: usize,
    },
    InsufficientOperators,
    MissingOperand,
    MalformedDice,
    InvalidDiceCount,
    InvalidDiceSize,
    UnrecognizedInput,
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCharacter(c) => write!(f, "invalid character {:?}", c),
            Self::RepeatedDecimalPoint => write!(f, "number has more than one decimal point"),
            Self::UnexpectedWhitespace => write!(f, "whitespace separates two values"),
            Self::UnexpectedOperator(op) => write!(f, "operator '{}' is missing an operand", op),
            Self::ParenthesisMismatch => write!(f, "parenthesis mismatch"),
            Self::MisplacedComma => write!(f, "misplaced comma"),
            Self::ArgumentCount {
                operator,
                expected,
                found,
            } => write!(
                f,
                "incorrect amount of arguments for '{}': expected {}, found {}",
                operator, expected, found
            ),
            Self::InsufficientOperators => write!(f, "insufficient operators"),
            Self::MissingOperand => write!(f, "expression has no value"),
            Self::MalformedDice => write!(f, "malformed dice; expected [count]d<size>"),
            Self::InvalidDiceCount => write!(f, "dice count must be a positive integer"),
            Self::InvalidDiceSize => write!(f, "dice size must be a positive integer"),
            Self::UnrecognizedInput => write!(f, "unrecognized input"),
        }
    }
}

trait FormatSnippet {
    fn fmt_snippet(&self) -> String;
}

impl FormatSnippet for Option<String> {
    fn fmt_snippet(&self) -> String {
        match self {
            Some(s) => format!(" near {:?}", s),
            None => String::new(),
        }
    }
}

fn window(source: &str, at: usize) -> String {
    let at = source[..at.min(source.len())].chars().count();
    let start = at.saturating_sub(SNIPPET_RADIUS);
    source
        .chars()
        .skip(start)
        .take(at - start + SNIPPET_RADIUS)
        .collect()
}
