pub mod arch;
pub mod builder;
pub mod error;
pub mod evaluation;

pub use arch::Network;
pub use builder::NetworkBuilder;
pub use error::{MlErr, Result};
pub use evaluation::{Comparison, ForwardEvaluator, Tolerance};
