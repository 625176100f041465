use super::error::{SyntaxError, SyntaxErrorKind};
use super::lexer::Token;
use log::debug;

/// Reorders infix `tokens` into postfix order (shunting-yard).
///
/// Parentheses do not appear in the output. A comma inside parentheses is passed through for
/// the builder to reject, since no construct takes a comma-separated list.
pub fn to_postfix<I>(tokens: I) -> Result<Vec<Token>, SyntaxError>
where
    I: IntoIterator<Item = Token>,
{
    let mut output = Vec::new();
    let mut pending: Vec<Token> = Vec::new();

    for token in tokens {
        match token {
            Token::LeftParen => pending.push(token),
            Token::RightParen => loop {
                match pending.pop() {
                    Some(Token::LeftParen) => break,
                    Some(op) => output.push(op),
                    None => return Err(SyntaxError::new(SyntaxErrorKind::ParenthesisMismatch)),
                }
            },
            Token::Comma => {
                loop {
                    match pending.last() {
                        Some(Token::LeftParen) => break,
                        Some(_) => output.extend(pending.pop()),
                        None => return Err(SyntaxError::new(SyntaxErrorKind::MisplacedComma)),
                    }
                }
                output.push(token);
            }
            Token::Operator(op) => {
                // Equal precedence pops too, so chains evaluate left to right.
                while let Some(&Token::Operator(top)) = pending.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }
                    output.extend(pending.pop());
                }
                pending.push(token);
            }
            Token::Primitive(_) => output.push(token),
        }
    }

    while let Some(token) = pending.pop() {
        if token == Token::LeftParen {
            return Err(SyntaxError::new(SyntaxErrorKind::ParenthesisMismatch));
        }
        output.push(token);
    }

    debug!("postfix order: {:?}", output);
    Ok(output)
}
