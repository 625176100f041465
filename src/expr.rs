use crate::common::*;
use crate::roll::{DieRoll, Number, RollResult, Roller};
use crate::DefaultRng;
use log::trace;
use std::fmt;

/// Evaluation of a parsed expression tree.
///
/// Trees are immutable; every call samples every die again and returns a fresh result.
#[enum_dispatch::enum_dispatch]
pub trait Evaluate {
    fn roll_with<R: Roller>(&self, roller: &mut R) -> RollResult;

    /// The number of dice a single roll samples.
    fn dice_count(&self) -> usize;

    fn roll(&self) -> RollResult {
        let mut rng: DefaultRng = rand::thread_rng();
        self.roll_with(&mut rng)
    }
}

/// A parsed dice expression.
#[derive(Debug, Clone, PartialEq)]
#[enum_dispatch::enum_dispatch(Evaluate)]
pub enum Expression {
    Numeric(Numeric),
    Die(Die),
    CountedDice(CountedDice),
    Binary(Binary),
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(x) => fmt::Display::fmt(x, f),
            Self::Die(x) => fmt::Display::fmt(x, f),
            Self::CountedDice(x) => fmt::Display::fmt(x, f),
            Self::Binary(x) => fmt::Display::fmt(x, f),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Numeric(Number);

impl Numeric {
    pub fn new(value: impl Into<Number>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> Number {
        self.0
    }
}

impl Evaluate for Numeric {
    fn roll_with<R: Roller>(&self, _roller: &mut R) -> RollResult {
        RollResult::constant(self.0)
    }

    fn dice_count(&self) -> usize {
        0
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Die {
    size: NonZeroUInt,
}

impl Die {
    pub fn new(size: NonZeroUInt) -> Self {
        Self { size }
    }

    pub fn size(&self) -> NonZeroUInt {
        self.size
    }

    fn sample<R: Roller>(&self, roller: &mut R) -> DieRoll {
        let value = roller.roll(self.size);
        trace!("rolled {} on {}", value, self);
        DieRoll::new(self.size, value)
    }
}

impl Evaluate for Die {
    fn roll_with<R: Roller>(&self, roller: &mut R) -> RollResult {
        let die = self.sample(roller);
        RollResult::new(die.value.into(), vec![die])
    }

    fn dice_count(&self) -> usize {
        1
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.size)
    }
}

/// `count` independent rolls of the same die, summed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct CountedDice {
    count: Num,
    die: Die,
}

impl CountedDice {
    pub fn new(count: Num, die: Die) -> Self {
        Self { count, die }
    }

    pub fn count(&self) -> Num {
        self.count
    }

    pub fn die(&self) -> Die {
        self.die
    }
}

impl Evaluate for CountedDice {
    fn roll_with<R: Roller>(&self, roller: &mut R) -> RollResult {
        let dice: Vec<DieRoll> = (0..self.count.get())
            .map(|_| self.die.sample(roller))
            .collect();
        let value = dice.iter().map(|d| Number::from(d.value)).sum();
        RollResult::new(value, dice)
    }

    fn dice_count(&self) -> usize {
        self.count.get()
    }
}

impl fmt::Display for CountedDice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.die)
    }
}

/// A binary arithmetic operation. Owns both operands.
#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    left: Box<Expression>,
    op: Operator,
    right: Box<Expression>,
}

impl Binary {
    pub fn new(left: Expression, op: Operator, right: Expression) -> Self {
        Self {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn left(&self) -> &Expression {
        &self.left
    }

    pub fn op(&self) -> Operator {
        self.op
    }

    pub fn right(&self) -> &Expression {
        &self.right
    }
}

impl Evaluate for Binary {
    fn roll_with<R: Roller>(&self, roller: &mut R) -> RollResult {
        let left = self.left.roll_with(roller);
        let right = self.right.roll_with(roller);
        let value = self.op.apply(left.value(), right.value());

        let mut dice = left.into_dice();
        dice.extend(right.into_dice());
        RollResult::new(value, dice)
    }

    fn dice_count(&self) -> usize {
        self.left.dice_count().saturating_add(self.right.dice_count())
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn operand(e: &Expression, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match e {
                Expression::Binary(_) => write!(f, "({})", e),
                _ => write!(f, "{}", e),
            }
        }

        operand(&self.left, f)?;
        write!(f, " {} ", self.op)?;
        operand(&self.right, f)
    }
}
