use super::error::{SyntaxError, SyntaxErrorKind};
use crate::common::Operator;
use log::debug;
use logos::{Lexer as LogosLexer, Logos};
use logos_iter::{LogosIter, PeekableLexer};
use std::fmt::{self, Write};
use std::ops::Range;

type Lexer<'a> = PeekableLexer<'a, LogosLexer<'a, CharClass>, CharClass>;

fn lexer(s: &str) -> Lexer {
    CharClass::lexer(s).peekable_lexer()
}

/// Runs of raw input characters, classified for the tokenizer.
#[derive(Logos, Debug, Copy, Clone, PartialEq)]
enum CharClass {
    #[regex(r"[0-9]+")]
    Digits,
    #[regex(r"[A-Za-z_]+")]
    Letters,
    #[token(".")]
    Dot,
    #[token(" ")]
    Space,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,

    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token(",")]
    Comma,

    #[error]
    Error,
}

impl CharClass {
    fn is_word(self) -> bool {
        matches!(self, Self::Digits | Self::Letters)
    }
}

/// A unit of a dice expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A numeric literal or a dice primitive, as written.
    Primitive(String),
    Operator(Operator),
    LeftParen,
    RightParen,
    Comma,
}

impl Token {
    /// Whether an operand may start directly after this token.
    fn expects_operand(&self) -> bool {
        matches!(self, Self::Operator(_) | Self::LeftParen | Self::Comma)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(s) => f.write_str(s),
            Self::Operator(op) => fmt::Display::fmt(op, f),
            Self::LeftParen => f.write_char('('),
            Self::RightParen => f.write_char(')'),
            Self::Comma => f.write_char(','),
        }
    }
}

/// Splits `text` into tokens.
///
/// Whitespace runs count as a single space and may only separate a value from a delimiter.
/// A `-` directly followed by a digit where an operand is expected is read as the sign of a
/// number rather than as subtraction.
pub fn tokenize(text: &str) -> Result<Vec<Token>, SyntaxError> {
    let source = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let tokens = Tokenizer::new(&source).run()?;
    debug!("tokenized {:?} into {:?}", text, tokens);
    Ok(tokens)
}

struct Tokenizer<'a> {
    source: &'a str,
    lexer: Lexer<'a>,
    tokens: Vec<Token>,
    buffer: String,
    has_decimal_point: bool,
}

impl<'a> Tokenizer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            lexer: lexer(source),
            tokens: Vec::new(),
            buffer: String::new(),
            has_decimal_point: false,
        }
    }

    fn run(mut self) -> Result<Vec<Token>, SyntaxError> {
        while let Some(class) = self.lexer.next() {
            let span = self.lexer.span();
            match class {
                CharClass::Digits | CharClass::Letters => {
                    self.buffer.push_str(&self.source[span]);
                }
                CharClass::Minus if self.is_sign() => self.buffer.push('-'),
                CharClass::Plus => self.operator(Operator::Add, span)?,
                CharClass::Minus => self.operator(Operator::Sub, span)?,
                CharClass::Star => self.operator(Operator::Mul, span)?,
                CharClass::Slash => self.operator(Operator::Div, span)?,
                CharClass::Dot => {
                    if self.has_decimal_point {
                        return Err(self.error(SyntaxErrorKind::RepeatedDecimalPoint, span));
                    }
                    self.has_decimal_point = true;
                    self.buffer.push('.');
                }
                CharClass::Space => {
                    if !self.buffer.is_empty() && self.peek_is_word() {
                        return Err(self.error(SyntaxErrorKind::UnexpectedWhitespace, span));
                    }
                    self.flush();
                }
                CharClass::LeftParen => self.delimit(Token::LeftParen),
                CharClass::RightParen => self.delimit(Token::RightParen),
                CharClass::Comma => self.delimit(Token::Comma),
                CharClass::Error => {
                    let c = self.source[span.start..].chars().next().unwrap_or_default();
                    return Err(self.error(SyntaxErrorKind::InvalidCharacter(c), span));
                }
            }
        }
        self.flush();
        Ok(self.tokens)
    }

    fn operator(&mut self, op: Operator, span: Range<usize>) -> Result<(), SyntaxError> {
        if self.buffer.is_empty() && self.missing_operand() {
            return Err(self.error(SyntaxErrorKind::UnexpectedOperator(op), span));
        }
        self.delimit(Token::Operator(op));
        Ok(())
    }

    /// No operand has been read since the last operator, opening parenthesis or comma.
    fn missing_operand(&self) -> bool {
        self.tokens.last().map_or(true, Token::expects_operand)
    }

    fn is_sign(&mut self) -> bool {
        self.buffer.is_empty()
            && self.missing_operand()
            && self.lexer.peek() == Some(&CharClass::Digits)
    }

    fn peek_is_word(&mut self) -> bool {
        self.lexer.peek().map_or(false, |class| class.is_word())
    }

    fn flush(&mut self) {
        if !self.buffer.is_empty() {
            self.tokens
                .push(Token::Primitive(std::mem::take(&mut self.buffer)));
        }
        self.has_decimal_point = false;
    }

    fn delimit(&mut self, token: Token) {
        self.flush();
        self.tokens.push(token);
    }

    fn error(&self, kind: SyntaxErrorKind, span: Range<usize>) -> SyntaxError {
        SyntaxError::at(kind, self.source, span.start)
    }
}
