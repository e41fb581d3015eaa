//! Gradient free operators over network parameters.
//!
//! Both live as inherent methods on [`NeuralNetwork`](crate::NeuralNetwork).
//! Selection and the generational loop belong to the caller.

mod crossover;
mod mutation;
