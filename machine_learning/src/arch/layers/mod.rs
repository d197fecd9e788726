mod dense;
mod layout;

pub use dense::Dense;
pub use layout::WeightLayout;
