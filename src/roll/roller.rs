use crate::common::{NonZeroUInt, UInt};
use rand::Rng;

/// Source of die samples.
///
/// Every [`rand::Rng`] is a `Roller`; tests substitute a deterministic one.
pub trait Roller {
    /// Returns a value in `1..=sides`.
    fn roll(&mut self, sides: NonZeroUInt) -> UInt;
}

impl<R: Rng> Roller for R {
    fn roll(&mut self, sides: NonZeroUInt) -> UInt {
        self.gen_range(1..=sides.get())
    }
}

#[cfg(test)]
pub(crate) use step::StepRoller;
