use super::num::Number;
use crate::common::{NonZeroUInt, UInt};
use std::fmt;

/// The outcome of a single die.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct DieRoll {
    pub size: UInt,
    pub value: UInt,
    /// The die landed on its highest face.
    pub is_max: bool,
    /// The die landed on 1. Never set for a one-sided die, which only reports `is_max`.
    pub is_min: bool,
}

impl DieRoll {
    pub fn new(size: NonZeroUInt, value: UInt) -> Self {
        let size = size.get();
        Self {
            size,
            value,
            is_max: value == size,
            is_min: value == 1 && size != 1,
        }
    }
}

/// The product of one roll of an expression: its total and every die rolled along the way,
/// in the order the dice appear in the expression.
#[derive(Debug, Clone, PartialEq)]
pub struct RollResult {
    value: Number,
    dice_rolled: Vec<DieRoll>,
}

impl RollResult {
    pub(crate) fn new(value: Number, dice_rolled: Vec<DieRoll>) -> Self {
        Self { value, dice_rolled }
    }

    pub(crate) fn constant(value: Number) -> Self {
        Self::new(value, Vec::new())
    }

    pub(crate) fn into_dice(self) -> Vec<DieRoll> {
        self.dice_rolled
    }

    pub fn value(&self) -> Number {
        self.value
    }

    pub fn dice_rolled(&self) -> &[DieRoll] {
        &self.dice_rolled
    }
}

impl fmt::Display for RollResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)?;
        if !self.dice_rolled.is_empty() {
            let values = self
                .dice_rolled
                .iter()
                .map(|d| d.value.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, " [{}]", values)?;
        }
        Ok(())
    }
}
