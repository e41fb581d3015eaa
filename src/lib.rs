//! Small fully connected feedforward networks: inference, online
//! backpropagation and evolutionary operators over dense matrices.

pub mod activation;
pub mod config;
pub mod error;
mod evolution;
pub mod f;
pub mod matrix;
pub mod nn;

pub use activation::Activations;
pub use config::{Inheritance, NetworkConfig, ParameterClamp};
pub use error::{ActivationError, ConfigError, MatrixError, NetworkError};
pub use matrix::{Matrix, Operand};
pub use nn::{NeuralNetwork, Topology};

pub type Dataset = (Vec<Vec<f64>>, Vec<Vec<f64>>);
