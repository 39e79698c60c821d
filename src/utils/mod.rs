pub mod rounding;

pub use rounding::{ceil_to_step, round2};
