use std::sync::Arc;

use super::network::NeuralNetwork;
use crate::error::NetworkError;
use crate::matrix::Matrix;

/// Weight delta and bias delta for one layer transition.
type Delta = (Matrix, Matrix);

impl NeuralNetwork {
    /// One online gradient descent step towards `target`.
    ///
    /// Nothing is written unless both sizes match the topology.
    pub fn train(&mut self, input: &[f64], target: &[f64]) -> Result<(), NetworkError> {
        self.check_input(input)?;
        self.check_target(target)?;

        let deltas = self.deltas(input, target)?;
        for (i, (delta_w, delta_b)) in deltas.iter().enumerate() {
            Arc::make_mut(&mut self.weights[i]).add_assign(delta_w)?;
            Arc::make_mut(&mut self.biases[i]).add_assign(delta_b)?;
        }
        self.apply_clamp();

        log::trace!("trained on {:?} -> {:?}", input, target);
        Ok(())
    }

    /// Backpropagation, output layer first. The error handed down to layer
    /// `l - 1` is read from `weights[l - 1]` before any delta is applied, so
    /// every propagation sees the parameters the forward pass used.
    fn deltas(&self, input: &[f64], target: &[f64]) -> Result<Vec<Delta>, NetworkError> {
        let layers = self.feedforward_layers(input)?;
        let activation = self.activation.wake();
        let last = layers.len() - 1;

        let mut error = Matrix::from_slice(target)?.add(&layers[last].scale(-1.))?;
        let mut deltas = Vec::with_capacity(last);

        for l in (1..=last).rev() {
            let mut gradient = layers[l].map(|y| activation.d(y));
            gradient
                .hadamard_assign(&error)?
                .scale_inplace(self.learning_rate);

            let delta_w = gradient.dot(&layers[l - 1].transpose())?;

            if l > 1 {
                error = self.weights[l - 1].transpose().dot(&error)?;
            }
            deltas.push((delta_w, gradient));
        }

        deltas.reverse();
        Ok(deltas)
    }
}
