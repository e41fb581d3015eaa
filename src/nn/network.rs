use std::sync::Arc;

use rand::{thread_rng, Rng};

use crate::activation::{Activation, Activations};
use crate::config::{self, Inheritance, NetworkConfig, ParameterClamp};
use crate::error::{MatrixError, NetworkError, Operation};
use crate::matrix::Matrix;

/// Neuron count per layer, input first and output last.
pub type Topology = Vec<usize>;

/// Fully connected feedforward network.
///
/// `weights[i]` maps layer `i` onto layer `i + 1` and has shape
/// `(topology[i + 1], topology[i])`; `biases[i]` is the matching
/// `(topology[i + 1], 1)` column. Matrices sit behind `Arc` so that
/// crossover can share them on request; every write goes through
/// `Arc::make_mut`, which detaches shared storage first.
#[derive(Debug, PartialEq)]
pub struct NeuralNetwork {
    pub(crate) topology: Topology,
    pub(crate) weights: Vec<Arc<Matrix>>,
    pub(crate) biases: Vec<Arc<Matrix>>,
    pub(crate) activation: Activations,
    pub(crate) learning_rate: f64,
    pub(crate) clamp: Option<ParameterClamp>,
    pub(crate) inheritance: Inheritance,
}

impl NeuralNetwork {
    pub fn new(topology: Topology) -> Result<NeuralNetwork, NetworkError> {
        NeuralNetwork::with_config_using(topology, NetworkConfig::default(), &mut thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(
        topology: Topology,
        rng: &mut R,
    ) -> Result<NeuralNetwork, NetworkError> {
        NeuralNetwork::with_config_using(topology, NetworkConfig::default(), rng)
    }

    pub fn with_config(
        topology: Topology,
        config: NetworkConfig,
    ) -> Result<NeuralNetwork, NetworkError> {
        NeuralNetwork::with_config_using(topology, config, &mut thread_rng())
    }

    /// Every weight and bias is drawn uniformly from [-1, 1).
    pub fn with_config_using<R: Rng + ?Sized>(
        topology: Topology,
        config: NetworkConfig,
        rng: &mut R,
    ) -> Result<NeuralNetwork, NetworkError> {
        if topology.len() < 2 || topology.contains(&0) {
            log::debug!("rejected topology {:?}", topology);
            return Err(NetworkError::InvalidTopology(topology));
        }
        config.validate()?;

        let transitions = topology.len() - 1;
        let mut weights = Vec::with_capacity(transitions);
        let mut biases = Vec::with_capacity(transitions);

        for pair in topology.windows(2) {
            weights.push(Arc::new(Matrix::random_using(pair[1], pair[0], rng)?));
        }
        for &size in topology.iter().skip(1) {
            biases.push(Arc::new(Matrix::random_using(size, 1, rng)?));
        }

        log::trace!(
            "built network {:?} with {} activation",
            topology,
            config.activation
        );

        Ok(NeuralNetwork {
            topology,
            weights,
            biases,
            activation: config.activation,
            learning_rate: config.learning_rate,
            clamp: config.clamp,
            inheritance: config.inheritance,
        })
    }

    pub(crate) fn check_input(&self, input: &[f64]) -> Result<(), NetworkError> {
        let expected = self.topology[0];
        if input.len() != expected {
            log::debug!(
                "input of {} values does not fit {} input neurons",
                input.len(),
                expected
            );
            return Err(NetworkError::InputSizeMismatch {
                expected,
                actual: input.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn check_target(&self, target: &[f64]) -> Result<(), NetworkError> {
        let expected = self.topology[self.topology.len() - 1];
        if target.len() != expected {
            log::debug!(
                "target of {} values does not fit {} output neurons",
                target.len(),
                expected
            );
            return Err(NetworkError::TargetSizeMismatch {
                expected,
                actual: target.len(),
            });
        }
        Ok(())
    }

    /// `act(weights[i] · x + biases[i])`
    fn forward_layer(
        &self,
        i: usize,
        x: &Matrix,
        activation: &dyn Activation,
    ) -> Result<Matrix, MatrixError> {
        let mut z = self.weights[i].dot(x)?;
        z.add_assign(&self.biases[i])?
            .map_inplace(|v| activation.a(v));
        Ok(z)
    }

    /// Output layer values for one input.
    pub fn feedforward(&self, input: &[f64]) -> Result<Vec<f64>, NetworkError> {
        self.check_input(input)?;

        let activation = self.activation.wake();
        let mut x = Matrix::from_slice(input)?;
        for i in 0..self.weights.len() {
            x = self.forward_layer(i, &x, activation.as_ref())?;
        }

        Ok(x.to_vec()?)
    }

    /// Every layer as a column vector, the input at index 0.
    pub fn feedforward_layers(&self, input: &[f64]) -> Result<Vec<Matrix>, NetworkError> {
        self.check_input(input)?;

        let activation = self.activation.wake();
        let mut layers = Vec::with_capacity(self.topology.len());
        layers.push(Matrix::from_slice(input)?);
        for i in 0..self.weights.len() {
            let next = self.forward_layer(i, &layers[i], activation.as_ref())?;
            layers.push(next);
        }

        Ok(layers)
    }

    /// Independent deep copy.
    pub fn copy(&self) -> NeuralNetwork {
        self.clone()
    }

    pub fn set_activation(&mut self, activation: Activations) -> &mut Self {
        self.activation = activation;
        self
    }

    /// Unknown names log a warning and select sigmoid.
    pub fn set_activation_named(&mut self, name: &str) -> &mut Self {
        self.set_activation(Activations::parse_or_default(name))
    }

    /// Numeric selector (1 sigmoid, 2 relu); unknown codes log a warning and
    /// select sigmoid.
    pub fn set_activation_code(&mut self, code: u8) -> &mut Self {
        self.set_activation(Activations::from_code_or_default(code))
    }

    /// A non-finite rate is refused and the current one kept.
    pub fn set_learning_rate(&mut self, rate: f64) -> Result<&mut Self, NetworkError> {
        if let Err(e) = config::check_learning_rate(rate) {
            log::warn!("{}, keeping {}", e, self.learning_rate);
            return Err(e.into());
        }
        self.learning_rate = rate;
        Ok(self)
    }

    pub fn set_clamp(&mut self, clamp: Option<ParameterClamp>) -> &mut Self {
        self.clamp = clamp;
        self.apply_clamp();
        self
    }

    pub fn set_inheritance(&mut self, inheritance: Inheritance) -> &mut Self {
        self.inheritance = inheritance;
        self
    }

    pub fn set_weights(
        &mut self,
        index: usize,
        weights: Matrix,
    ) -> Result<&mut Self, NetworkError> {
        let slot = self.slot(index)?;
        Self::replace(&mut self.weights[slot], weights)?;
        self.apply_clamp();
        Ok(self)
    }

    pub fn set_biases(
        &mut self,
        index: usize,
        biases: Matrix,
    ) -> Result<&mut Self, NetworkError> {
        let slot = self.slot(index)?;
        Self::replace(&mut self.biases[slot], biases)?;
        self.apply_clamp();
        Ok(self)
    }

    fn slot(&self, index: usize) -> Result<usize, NetworkError> {
        if index >= self.weights.len() {
            return Err(NetworkError::LayerOutOfRange {
                index,
                count: self.weights.len(),
            });
        }
        Ok(index)
    }

    fn replace(current: &mut Arc<Matrix>, next: Matrix) -> Result<(), MatrixError> {
        if current.shape() != next.shape() {
            return Err(MatrixError::ShapeMismatch {
                op: Operation::Assign,
                left: current.shape(),
                right: next.shape(),
            });
        }
        *current = Arc::new(next);
        Ok(())
    }

    pub(crate) fn params_mut(&mut self) -> impl Iterator<Item = &mut Matrix> {
        self.weights
            .iter_mut()
            .chain(self.biases.iter_mut())
            .map(|m| Arc::make_mut(m))
    }

    pub(crate) fn apply_clamp(&mut self) {
        if let Some(clamp) = self.clamp {
            for m in self.params_mut() {
                m.clamp_inplace(clamp);
            }
        }
    }

    pub fn topology(&self) -> &[usize] {
        &self.topology
    }

    pub fn weights(&self) -> impl ExactSizeIterator<Item = &Matrix> {
        self.weights.iter().map(|m| m.as_ref())
    }

    pub fn biases(&self) -> impl ExactSizeIterator<Item = &Matrix> {
        self.biases.iter().map(|m| m.as_ref())
    }

    pub fn weight(&self, index: usize) -> Option<&Matrix> {
        self.weights.get(index).map(|m| m.as_ref())
    }

    pub fn bias(&self, index: usize) -> Option<&Matrix> {
        self.biases.get(index).map(|m| m.as_ref())
    }

    pub fn activation(&self) -> Activations {
        self.activation
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn clamp(&self) -> Option<ParameterClamp> {
        self.clamp
    }

    pub fn inheritance(&self) -> Inheritance {
        self.inheritance
    }

    pub fn layer_count(&self) -> usize {
        self.topology.len()
    }

    /// Total number of weights and biases.
    pub fn parameter_count(&self) -> usize {
        self.weights
            .iter()
            .chain(self.biases.iter())
            .map(|m| m.len())
            .sum()
    }

    /// False once any parameter has gone NaN or infinite.
    pub fn is_valid(&self) -> bool {
        self.weights
            .iter()
            .chain(self.biases.iter())
            .all(|m| m.is_finite())
    }
}

impl Clone for NeuralNetwork {
    fn clone(&self) -> Self {
        let deep = |ms: &Vec<Arc<Matrix>>| {
            ms.iter()
                .map(|m| Arc::new(m.as_ref().clone()))
                .collect::<Vec<Arc<Matrix>>>()
        };

        NeuralNetwork {
            topology: self.topology.clone(),
            weights: deep(&self.weights),
            biases: deep(&self.biases),
            activation: self.activation,
            learning_rate: self.learning_rate,
            clamp: self.clamp,
            inheritance: self.inheritance,
        }
    }
}
