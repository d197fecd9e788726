pub mod activations;
pub mod layers;
mod network;

pub use network::Network;
