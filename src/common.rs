use crate::roll::Number;
use std::fmt::{self, Write};
use std::num::{NonZeroU64, NonZeroUsize};
use std::ops;

pub type Int = i64;
pub type UInt = u64;
pub type NonZeroUInt = NonZeroU64;

pub type Float = f64;

/// The number of dice in a single dice primitive.
pub type Num = NonZeroUsize;

pub type NonEmpty<T> = vec1::Vec1<T>;

/// A binary arithmetic operator.
///
/// The discriminants index into [`OPERATORS`], so the variant order must match the table.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

/// Static description of an [`Operator`]: how it is written, how many operands it takes,
/// how tightly it binds and how it combines its operands.
#[derive(Debug, Copy, Clone)]
pub struct OperatorInfo {
    pub operator: Operator,
    pub symbol: char,
    pub arity: usize,
    /// Higher binds tighter. Operators of equal precedence associate to the left.
    pub precedence: u8,
    pub apply: fn(Number, Number) -> Number,
}

pub static OPERATORS: [OperatorInfo; 4] = [
    OperatorInfo {
        operator: Operator::Add,
        symbol: '+',
        arity: 2,
        precedence: 1,
        apply: <Number as ops::Add>::add,
    },
    OperatorInfo {
        operator: Operator::Sub,
        symbol: '-',
        arity: 2,
        precedence: 1,
        apply: <Number as ops::Sub>::sub,
    },
    OperatorInfo {
        operator: Operator::Mul,
        symbol: '*',
        arity: 2,
        precedence: 2,
        apply: <Number as ops::Mul>::mul,
    },
    OperatorInfo {
        operator: Operator::Div,
        symbol: '/',
        arity: 2,
        precedence: 2,
        apply: <Number as ops::Div>::div,
    },
];

impl Operator {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        OPERATORS
            .iter()
            .find(|info| info.symbol == symbol)
            .map(|info| info.operator)
    }

    pub fn info(self) -> &'static OperatorInfo {
        &OPERATORS[self as usize]
    }

    pub fn symbol(self) -> char {
        self.info().symbol
    }

    pub fn arity(self) -> usize {
        self.info().arity
    }

    pub fn precedence(self) -> u8 {
        self.info().precedence
    }

    pub fn apply(self, lhs: Number, rhs: Number) -> Number {
        (self.info().apply)(lhs, rhs)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.symbol())
    }
}
