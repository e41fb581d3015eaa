use std::fmt::{self, Display};

use thiserror::Error;

pub type Shape = (usize, usize);

/// Binary matrix operations that can reject their operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Hadamard,
    Dot,
    Assign,
}

impl Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Add => "add",
            Operation::Hadamard => "multiply elementwise",
            Operation::Dot => "take the matrix product of",
            Operation::Assign => "assign",
        };
        write!(f, "{}", name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("cannot {op} matrices of shape {left:?} and {right:?}")]
    ShapeMismatch {
        op: Operation,
        left: Shape,
        right: Shape,
    },
    #[error("expected a column vector, got shape {shape:?}")]
    NotColumnVector { shape: Shape },
    #[error("row {row} has {len} entries, expected {expected}")]
    RaggedRows {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("a matrix needs at least one row and one column")]
    Empty,
    #[error("index ({row}, {col}) is outside a matrix of shape {shape:?}")]
    OutOfBounds { row: usize, col: usize, shape: Shape },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActivationError {
    #[error("unknown activation kind `{0}`")]
    InvalidActivationKind(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    #[error("topology needs at least two layers of non-zero size, got {0:?}")]
    InvalidTopology(Vec<usize>),
    #[error("input has {actual} values but the input layer has {expected} neurons")]
    InputSizeMismatch { expected: usize, actual: usize },
    #[error("target has {actual} values but the output layer has {expected} neurons")]
    TargetSizeMismatch { expected: usize, actual: usize },
    #[error("architecture mismatch: {left:?} vs {right:?}")]
    ArchitectureMismatch { left: Vec<usize>, right: Vec<usize> },
    #[error("layer transition {index} out of range, network has {count}")]
    LayerOutOfRange { index: usize, count: usize },
    #[error(transparent)]
    Matrix(#[from] MatrixError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("malformed network config: {0}")]
    Json(String),
    #[error("learning rate must be finite, got {0}")]
    InvalidLearningRate(f64),
    #[error("invalid clamp range: min {min}, max {max}")]
    InvalidClamp { min: f64, max: f64 },
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_mismatch_names_the_operation() {
        let err = MatrixError::ShapeMismatch {
            op: Operation::Dot,
            left: (2, 3),
            right: (2, 3),
        };
        assert_eq!(
            err.to_string(),
            "cannot take the matrix product of matrices of shape (2, 3) and (2, 3)"
        );
    }

    #[test]
    fn matrix_errors_lift_into_network_errors() {
        let err: NetworkError = MatrixError::Empty.into();
        assert_eq!(err, NetworkError::Matrix(MatrixError::Empty));
        assert_eq!(err.to_string(), MatrixError::Empty.to_string());
    }

    #[test]
    fn config_errors_lift_into_network_errors() {
        let err: NetworkError = ConfigError::InvalidLearningRate(f64::INFINITY).into();
        assert_eq!(
            err,
            NetworkError::Config(ConfigError::InvalidLearningRate(f64::INFINITY))
        );
        assert_eq!(err.to_string(), "learning rate must be finite, got inf");
    }
}
