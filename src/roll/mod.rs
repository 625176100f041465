mod num;
mod result;
mod roller;

pub use num::Number;
pub use result::{DieRoll, RollResult};
pub use roller::Roller;

#[cfg(test)]
pub(crate) use roller::StepRoller;
