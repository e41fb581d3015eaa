use std::fmt::{self, Debug, Display};
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ActivationError;
use crate::f;

/// A forward function paired with its derivative.
///
/// `d` is expressed in terms of the activated output: it receives `a(x)`,
/// never `x`. Any new kind has to follow the same convention or the
/// gradients computed during training will be wrong.
pub trait Activation {
    fn a(&self, x: f64) -> f64;
    fn d(&self, y: f64) -> f64;
}

impl Debug for dyn Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActivationFn")
    }
}

pub struct Sigmoid;

impl Sigmoid {
    pub fn new() -> Rc<Sigmoid> {
        Rc::new(Sigmoid)
    }
}

impl Activation for Sigmoid {
    fn a(&self, x: f64) -> f64 {
        f::sigmoid(x)
    }

    fn d(&self, y: f64) -> f64 {
        f::sigmoid_derivative(y)
    }
}

pub struct Relu;

impl Relu {
    pub fn new() -> Rc<Relu> {
        Rc::new(Relu)
    }
}

impl Activation for Relu {
    fn a(&self, x: f64) -> f64 {
        f::relu(x)
    }

    fn d(&self, y: f64) -> f64 {
        f::relu_derivative(y)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activations {
    #[default]
    Sigmoid,
    Relu,
}

impl Activations {
    pub fn wake(&self) -> Rc<dyn Activation> {
        match self {
            Activations::Sigmoid => Sigmoid::new(),
            Activations::Relu => Relu::new(),
        }
    }

    /// Numeric selectors: 1 is sigmoid, 2 is relu.
    pub fn from_code(code: u8) -> Result<Activations, ActivationError> {
        match code {
            1 => Ok(Activations::Sigmoid),
            2 => Ok(Activations::Relu),
            _ => Err(ActivationError::InvalidActivationKind(code.to_string())),
        }
    }

    /// Like [`FromStr`], but an unknown name falls back to sigmoid.
    pub fn parse_or_default(name: &str) -> Activations {
        name.parse().unwrap_or_else(|e: ActivationError| {
            log::warn!("{}, falling back to sigmoid", e);
            Activations::Sigmoid
        })
    }

    /// Like [`Activations::from_code`], but an unknown code falls back to sigmoid.
    pub fn from_code_or_default(code: u8) -> Activations {
        Activations::from_code(code).unwrap_or_else(|e| {
            log::warn!("{}, falling back to sigmoid", e);
            Activations::Sigmoid
        })
    }
}

impl FromStr for Activations {
    type Err = ActivationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sigmoid" => Ok(Activations::Sigmoid),
            "relu" => Ok(Activations::Relu),
            _ => Err(ActivationError::InvalidActivationKind(s.to_string())),
        }
    }
}

impl Display for Activations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activations::Sigmoid => write!(f, "sigmoid"),
            Activations::Relu => write!(f, "relu"),
        }
    }
}
