use super::error::{SyntaxError, SyntaxErrorKind};
use crate::common::*;
use crate::expr::{CountedDice, Die, Expression, Numeric};
use crate::roll::Number;

/// Parses a dice primitive (`[count]d<size>`, case-insensitive) or a numeric literal.
pub(crate) fn parse_primitive(token: &str) -> Result<Expression, SyntaxError> {
    let lowered = token.to_lowercase();
    let err = |kind| SyntaxError::in_token(kind, token);

    if lowered.contains('d') {
        let mut parts = lowered.split('d');
        let (Some(count), Some(size), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(err(SyntaxErrorKind::MalformedDice));
        };

        let size = parse_number(size).ok_or_else(|| err(SyntaxErrorKind::MalformedDice))?;
        let count = if count.is_empty() {
            Number::Int(1)
        } else {
            parse_number(count).ok_or_else(|| err(SyntaxErrorKind::MalformedDice))?
        };

        let count = positive_int(count)
            .and_then(|c| usize::try_from(c).ok())
            .and_then(Num::new)
            .ok_or_else(|| err(SyntaxErrorKind::InvalidDiceCount))?;
        let size = positive_int(size)
            .and_then(NonZeroUInt::new)
            .ok_or_else(|| err(SyntaxErrorKind::InvalidDiceSize))?;

        Ok(CountedDice::new(count, Die::new(size)).into())
    } else if let Some(x) = parse_number(&lowered) {
        Ok(Numeric::new(x).into())
    } else {
        Err(err(SyntaxErrorKind::UnrecognizedInput))
    }
}

/// Parses an optionally negative integer or decimal literal.
pub(crate) fn parse_number(s: &str) -> Option<Number> {
    let unsigned = s.strip_prefix('-').unwrap_or(s);
    if unsigned.is_empty() || !unsigned.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }

    if unsigned.contains('.') {
        s.parse::<Float>().ok().map(Number::Float)
    } else {
        s.parse::<Int>()
            .map(Number::Int)
            .or_else(|_| s.parse::<Float>().map(Number::Float))
            .ok()
    }
}

fn positive_int(x: Number) -> Option<UInt> {
    match x {
        Number::Int(x) if x > 0 => UInt::try_from(x).ok(),
        _ => None,
    }
}
