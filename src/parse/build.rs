use super::error::{SyntaxError, SyntaxErrorKind};
use super::lexer::Token;
use super::primitive::parse_primitive;
use crate::common::Num;
use crate::error::DiceError;
use crate::expr::{Binary, Evaluate, Expression};
use log::debug;

/// Assembles an expression tree from postfix tokens, enforcing an optional limit on the number
/// of dice the expression rolls.
pub(crate) struct Builder {
    max_dice: Option<Num>,
    dice: usize,
    stack: Vec<Expression>,
}

impl Builder {
    pub(crate) fn new(max_dice: Option<Num>) -> Self {
        Self {
            max_dice,
            dice: 0,
            stack: Vec::new(),
        }
    }

    pub(crate) fn build<I>(mut self, postfix: I) -> Result<Expression, DiceError>
    where
        I: IntoIterator<Item = Token>,
    {
        for token in postfix {
            match token {
                Token::Operator(operator) => {
                    let found = self.stack.len();
                    let (Some(right), Some(left)) = (self.stack.pop(), self.stack.pop()) else {
                        return Err(SyntaxError::new(SyntaxErrorKind::ArgumentCount {
                            operator,
                            expected: operator.arity(),
                            found,
                        })
                        .into());
                    };
                    self.stack.push(Binary::new(left, operator, right).into());
                }
                Token::Primitive(text) => {
                    let expr = parse_primitive(&text)?;
                    self.count_dice(expr.dice_count())?;
                    self.stack.push(expr);
                }
                Token::LeftParen | Token::RightParen | Token::Comma => {
                    let text = token.to_string();
                    return Err(SyntaxError::in_token(SyntaxErrorKind::UnrecognizedInput, &text).into());
                }
            }
        }

        if self.stack.len() > 1 {
            return Err(SyntaxError::new(SyntaxErrorKind::InsufficientOperators).into());
        }
        let root = self
            .stack
            .pop()
            .ok_or_else(|| SyntaxError::new(SyntaxErrorKind::MissingOperand))?;
        debug!("built expression {} rolling {} dice", root, self.dice);
        Ok(root)
    }

    fn count_dice(&mut self, n: usize) -> Result<(), DiceError> {
        self.dice = self.dice.saturating_add(n);
        match self.max_dice {
            Some(max) if self.dice > max.get() => Err(DiceError::DiceCount { limit: max.get() }),
            _ => Ok(()),
        }
    }
}
