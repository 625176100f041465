mod build;
mod error;
mod lexer;
mod primitive;
mod resolve;

pub use error::{SyntaxError, SyntaxErrorKind};
pub use lexer::{tokenize, Token};
pub use resolve::to_postfix;

use crate::common::{NonEmpty, Num};
use crate::error::DiceError;
use crate::expr::Expression;
use build::Builder;

/// Parses dice expressions, optionally capping how many dice one expression may roll.
///
/// The limit is read once per [`DiceParser::parse`] call.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct DiceParser {
    maximum_dice_count: Option<Num>,
}

impl DiceParser {
    /// A parser with no dice limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// A parser that rejects expressions rolling more than `max` dice. A `max` of 0 means no
    /// limit.
    pub fn with_maximum_dice_count(max: usize) -> Self {
        Self {
            maximum_dice_count: Num::new(max),
        }
    }

    pub fn maximum_dice_count(&self) -> Option<usize> {
        self.maximum_dice_count.map(Num::get)
    }

    /// Sets or clears the dice limit. `None` and `Some(0)` both clear it.
    pub fn set_maximum_dice_count(&mut self, max: Option<usize>) {
        self.maximum_dice_count = max.and_then(Num::new);
    }

    pub fn parse(&self, text: &str) -> Result<Expression, DiceError> {
        let tokens = NonEmpty::try_from_vec(tokenize(text)?).map_err(|_| DiceError::Empty)?;
        let postfix = to_postfix(tokens)?;
        Builder::new(self.maximum_dice_count).build(postfix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Evaluate;
    use crate::roll::{Number, RollResult};
    use crate::test_utils::*;
    use proptest::prelude::*;

    fn parse(s: &str) -> Expression {
        match DiceParser::new().parse(s) {
            Ok(expr) => expr,
            Err(err) => panic!("failed to parse {:?}: {}", s, err),
        }
    }

    fn check(s: &str, expected: impl Into<Number>) {
        let result = parse(s).roll_with(&mut step_roller());
        assert_eq!(result.value(), expected.into(), "rolling {:?}", s);
    }

    fn check_syntax_err(s: &str) {
        match DiceParser::new().parse(s) {
            Err(DiceError::Syntax(_)) => {}
            other => panic!("expected a syntax error for {:?}, got {:?}", s, other),
        }
    }

    fn shape(result: &RollResult) -> Vec<u64> {
        result.dice_rolled().iter().map(|d| d.size).collect()
    }

    #[test]
    fn test_eval_number() {
        check("2", 2i64);
        check("2.5", 2.5f64);
        check("-17", -17i64);
        check("-0.25", -0.25f64);
    }

    #[test]
    fn test_eval_binary() {
        check("2 + 3", 5i64);
        check("2 * (1 - 3)", -4i64);
        check("2+3*4", 14i64);
        check("(2+3)*4", 20i64);
        check("10 - 4 - 3", 3i64);
        check("24 / 4 / 2", 3i64);
        check("7 / 2", 3.5f64);
        check("1--1", 2i64);
    }

    #[test]
    fn test_eval_dice() {
        check("1d20 + 4", 10i64 + 4);
        check("2d4", 2i64 + 3);
        check("8d6", 4i64 + 5 + 6 + 1 + 2 + 3 + 4 + 5);
        check("d20", 10i64);
        check("2D20", 10i64 + 11);
    }

    #[test]
    fn test_eval_division_by_zero() {
        let result = parse("1 / 0").roll();
        assert_eq!(result.value().as_float(), f64::INFINITY);
        let result = parse("(d6 - d6) * 0 / 0").roll();
        assert!(result.value().as_float().is_nan());
    }

    #[test]
    fn test_single_die_distribution() {
        let expr = parse("d20");
        let mut rng = seeded_rng();
        let mut seen = [false; 20];
        for _ in 0..2000 {
            let result = expr.roll_with(&mut rng);
            let value = result.value().as_int();
            assert!((1..=20).contains(&value));
            assert_eq!(result.dice_rolled().len(), 1);
            assert_eq!(result.dice_rolled()[0].size, 20);
            assert_eq!(Number::from(result.dice_rolled()[0].value), result.value());
            seen[value as usize - 1] = true;
        }
        assert!(seen.iter().all(|&x| x));
    }

    #[test]
    fn test_implicit_count() {
        assert_eq!(parse("d12"), parse("1d12"));
        let a = parse("d12").roll_with(&mut step_roller());
        let b = parse("1d12").roll_with(&mut step_roller());
        assert_eq!(a, b);
    }

    #[test]
    fn test_one_sided_die() {
        for _ in 0..50 {
            let result = parse("d1").roll();
            assert_eq!(result.value(), Number::Int(1));
            assert!(result.dice_rolled()[0].is_max);
            assert!(!result.dice_rolled()[0].is_min);
        }
    }

    #[test]
    fn test_counted_dice_bounds() {
        let expr = parse("5d8");
        let mut rng = seeded_rng();
        for _ in 0..500 {
            let result = expr.roll_with(&mut rng);
            let value = result.value().as_int();
            assert!((5..=40).contains(&value));
            assert_eq!(result.dice_rolled().len(), 5);
            let sum: u64 = result.dice_rolled().iter().map(|d| d.value).sum();
            assert_eq!(Number::from(sum), result.value());
        }
    }

    #[test]
    fn test_counted_dice_cluster_around_mean() {
        let expr = parse("2d20");
        let mut rng = seeded_rng();
        let mut counts = [0u32; 41];
        for _ in 0..20_000 {
            counts[expr.roll_with(&mut rng).value().as_int() as usize] += 1;
        }
        assert!(counts[21] > counts[2]);
        assert!(counts[21] > counts[40]);
    }

    #[test]
    fn test_many_one_sided_dice() {
        let result = parse("1000d1").roll();
        assert_eq!(result.value(), Number::Int(1000));
        assert_eq!(result.dice_rolled().len(), 1000);
        assert!(result
            .dice_rolled()
            .iter()
            .all(|d| d.size == 1 && d.value == 1));
    }

    #[test]
    fn test_compound_expression() {
        let expr = parse("32 + -4 * (8d2 + -5) + 7 - 2 * -14");
        let mut rng = seeded_rng();
        for _ in 0..200 {
            let result = expr.roll_with(&mut rng);
            assert_eq!(result.dice_rolled().len(), 8);
            assert!(result.dice_rolled().iter().all(|d| d.size == 2));
            let value = result.value().as_int();
            assert!((23..=55).contains(&value), "{} out of range", value);
        }
    }

    #[test]
    fn test_dice_order() {
        let result = parse("d4 * (2d6 + d8) - d10").roll_with(&mut step_roller());
        assert_eq!(shape(&result), vec![4, 6, 6, 8, 10]);
    }

    #[test]
    fn test_reroll_keeps_shape() {
        let expr = parse("3d6 + d20 * 2 - 2d4");
        let mut rng = seeded_rng();
        let first = expr.roll_with(&mut rng);
        for _ in 0..20 {
            let next = expr.roll_with(&mut rng);
            assert_eq!(shape(&next), shape(&first));
        }
    }

    #[test]
    fn test_empty() {
        assert_eq!(DiceParser::new().parse(""), Err(DiceError::Empty));
        assert_eq!(DiceParser::new().parse("   \t "), Err(DiceError::Empty));
    }

    #[test]
    fn test_rejections() {
        for s in [
            "d", "+", "20d", "34.28.9", "d d20", "4 5", "1++1", "4d20`", "d20)", "(d20", "4d2d0",
            "4dd20", "da20", "ad20", "0d20", "-4d20", "4c20", "()", "d0", "1, 2", "(1,)",
        ] {
            check_syntax_err(s);
        }
    }

    #[test]
    fn test_maximum_dice_count() {
        let mut parser = DiceParser::with_maximum_dice_count(10);
        assert_eq!(parser.maximum_dice_count(), Some(10));
        assert!(parser.parse("4d6 + 6d4").is_ok());
        assert_eq!(
            parser.parse("4d6 + 6d4 + d8"),
            Err(DiceError::DiceCount { limit: 10 })
        );

        parser.set_maximum_dice_count(None);
        assert_eq!(parser.maximum_dice_count(), None);
        assert!(parser.parse("4d6 + 6d4 + d8").is_ok());

        parser.set_maximum_dice_count(Some(3));
        assert!(parser.parse("3d6").is_ok());
        assert_eq!(parser.parse("4d6"), Err(DiceError::DiceCount { limit: 3 }));

        parser.set_maximum_dice_count(Some(0));
        assert!(parser.parse("4d6").is_ok());
    }

    #[test]
    fn test_error_message() {
        let err = DiceParser::new().parse("2 + 4d20`").unwrap_err();
        assert_eq!(
            err.to_string(),
            "syntax error: invalid character '`' near \"2 + 4d20`\""
        );
        let err = DiceParser::with_maximum_dice_count(2).parse("3d6").unwrap_err();
        assert_eq!(err.to_string(), "expression rolls more than 2 dice");
    }

    proptest! {
        #[test]
        fn test_numeric_literal_roundtrip(n in -100_000i64..100_000) {
            let result = parse(&n.to_string()).roll();
            prop_assert_eq!(result.value(), Number::Int(n));
            prop_assert!(result.dice_rolled().is_empty());
        }

        #[test]
        fn test_decimal_literal_roundtrip(whole in -1000i64..1000, frac in 0u32..1000) {
            let s = format!("{}.{:03}", whole, frac);
            let expected: f64 = s.parse().unwrap();
            let result = parse(&s).roll();
            prop_assert_eq!(result.value(), Number::Float(expected));
            prop_assert!(result.dice_rolled().is_empty());
        }

        #[test]
        fn test_counted_dice_range(count in 1usize..50, size in 1u64..100) {
            let result = parse(&format!("{}d{}", count, size)).roll();
            let value = result.value().as_int();
            prop_assert!(value >= count as i64 && value <= (count as u64 * size) as i64);
            prop_assert_eq!(result.dice_rolled().len(), count);
        }
    }
}
