mod network;
mod train;

pub use network::{NeuralNetwork, Topology};
