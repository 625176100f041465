//! Parsing and rolling of dice notation such as `4d20`, `2d6+3` or `(d8 + 2) * 3`.
//!
//! ```
//! use dice_expression::{DiceParser, Evaluate};
//!
//! let parser = DiceParser::with_maximum_dice_count(100);
//! let expr = parser.parse("2d6 + 3").unwrap();
//! let result = expr.roll();
//! assert_eq!(result.dice_rolled().len(), 2);
//! assert!((5..=15).contains(&result.value().as_int()));
//! ```

mod common;
mod error;
mod expr;
pub mod parse;
pub mod roll;

pub use common::{Float, Int, NonZeroUInt, Num, Operator, OperatorInfo, UInt, OPERATORS};
pub use error::DiceError;
pub use expr::{Binary, CountedDice, Die, Evaluate, Expression, Numeric};
pub use parse::{DiceParser, SyntaxError, SyntaxErrorKind, Token};
pub use roll::{DieRoll, Number, RollResult, Roller};

pub(crate) type DefaultRng = rand::rngs::ThreadRng;

/// Parses `s` with no limit on the number of dice.
pub fn parse(s: &str) -> Result<Expression, DiceError> {
    DiceParser::new().parse(s)
}
