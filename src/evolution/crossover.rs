use std::sync::Arc;

use rand::{thread_rng, Rng};

use crate::config::Inheritance;
use crate::error::NetworkError;
use crate::matrix::Matrix;
use crate::nn::NeuralNetwork;

impl NeuralNetwork {
    /// Offspring built from whole matrices of either parent.
    ///
    /// Each weight matrix and each bias vector is picked independently, with
    /// even odds, from `self` or `other`. The offspring takes its settings
    /// from `self`.
    pub fn crossover(&self, other: &NeuralNetwork) -> Result<NeuralNetwork, NetworkError> {
        self.crossover_with_rng(other, &mut thread_rng())
    }

    pub fn crossover_with_rng<R: Rng + ?Sized>(
        &self,
        other: &NeuralNetwork,
        rng: &mut R,
    ) -> Result<NeuralNetwork, NetworkError> {
        if self.topology != other.topology {
            log::debug!(
                "crossover refused: {:?} vs {:?}",
                self.topology,
                other.topology
            );
            return Err(NetworkError::ArchitectureMismatch {
                left: self.topology.clone(),
                right: other.topology.clone(),
            });
        }

        let inherit = |m: &Arc<Matrix>| match self.inheritance {
            Inheritance::DeepCopy => Arc::new(m.as_ref().clone()),
            Inheritance::CopyOnWrite => Arc::clone(m),
        };

        let transitions = self.weights.len();
        let mut weights = Vec::with_capacity(transitions);
        let mut biases = Vec::with_capacity(transitions);

        for i in 0..transitions {
            let w = if rng.gen_bool(0.5) {
                &self.weights[i]
            } else {
                &other.weights[i]
            };
            weights.push(inherit(w));

            let b = if rng.gen_bool(0.5) {
                &self.biases[i]
            } else {
                &other.biases[i]
            };
            biases.push(inherit(b));
        }

        Ok(NeuralNetwork {
            topology: self.topology.clone(),
            weights,
            biases,
            activation: self.activation,
            learning_rate: self.learning_rate,
            clamp: self.clamp,
            inheritance: self.inheritance,
        })
    }
}
