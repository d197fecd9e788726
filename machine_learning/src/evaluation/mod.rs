mod evaluator;
mod tolerance;

pub use evaluator::ForwardEvaluator;
pub use tolerance::{Comparison, Tolerance};
