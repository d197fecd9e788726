pub mod network;
pub mod verify;

pub use network::{LayerSpec, LayoutSpec, NetworkSpec};
pub use verify::{DatasetSpec, ToleranceSpec, VerifySpec};
