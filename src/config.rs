//! Network level configuration.
//!
//! Everything here has a default, so a config can be built in code with
//! struct update syntax or read from a partial JSON document.

use serde::{Deserialize, Serialize};

use crate::activation::Activations;
use crate::error::ConfigError;

pub const DEFAULT_LEARNING_RATE: f64 = 0.2;

/// Inclusive bounds applied to every parameter after `train` and `mutate`.
///
/// Only obtainable through [`ParameterClamp::new`] or deserialization, both
/// of which reject NaN bounds and `min > max`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(try_from = "ClampBounds", into = "ClampBounds")]
pub struct ParameterClamp {
    min: f64,
    max: f64,
}

#[derive(Serialize, Deserialize)]
struct ClampBounds {
    min: f64,
    max: f64,
}

impl ParameterClamp {
    pub fn new(min: f64, max: f64) -> Result<ParameterClamp, ConfigError> {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(ConfigError::InvalidClamp { min, max });
        }
        Ok(ParameterClamp { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

impl TryFrom<ClampBounds> for ParameterClamp {
    type Error = ConfigError;

    fn try_from(bounds: ClampBounds) -> Result<Self, Self::Error> {
        ParameterClamp::new(bounds.min, bounds.max)
    }
}

impl From<ParameterClamp> for ClampBounds {
    fn from(clamp: ParameterClamp) -> Self {
        ClampBounds {
            min: clamp.min,
            max: clamp.max,
        }
    }
}

/// How crossover offspring hold the matrices inherited from their parents.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Inheritance {
    /// Every inherited matrix is copied into fresh storage.
    #[default]
    DeepCopy,
    /// Offspring share parent storage until either side writes to it.
    CopyOnWrite,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct NetworkConfig {
    pub learning_rate: f64,
    pub activation: Activations,
    pub clamp: Option<ParameterClamp>,
    pub inheritance: Inheritance,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            learning_rate: DEFAULT_LEARNING_RATE,
            activation: Activations::Sigmoid,
            clamp: None,
            inheritance: Inheritance::DeepCopy,
        }
    }
}

impl NetworkConfig {
    pub fn from_json(json: &str) -> Result<NetworkConfig, ConfigError> {
        let config: NetworkConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_learning_rate(self.learning_rate)
    }
}

pub(crate) fn check_learning_rate(rate: f64) -> Result<(), ConfigError> {
    if !rate.is_finite() {
        return Err(ConfigError::InvalidLearningRate(rate));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_plain_network() {
        let config = NetworkConfig::default();
        assert_eq!(config.learning_rate, 0.2);
        assert_eq!(config.activation, Activations::Sigmoid);
        assert_eq!(config.clamp, None);
        assert_eq!(config.inheritance, Inheritance::DeepCopy);
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config = NetworkConfig::from_json(r#"{ "activation": "Relu" }"#).unwrap();
        assert_eq!(config.activation, Activations::Relu);
        assert_eq!(config.learning_rate, DEFAULT_LEARNING_RATE);

        let config = NetworkConfig::from_json(
            r#"{ "learning_rate": 0.05, "clamp": { "min": -4.0, "max": 4.0 }, "inheritance": "CopyOnWrite" }"#,
        )
        .unwrap();
        assert_eq!(config.learning_rate, 0.05);
        assert_eq!(config.clamp, Some(ParameterClamp::new(-4., 4.).unwrap()));
        assert_eq!(config.inheritance, Inheritance::CopyOnWrite);
    }

    #[test]
    fn rejects_inverted_clamp() {
        let err = NetworkConfig::from_json(r#"{ "clamp": { "min": 1.0, "max": -1.0 } }"#)
            .unwrap_err();
        assert!(
            matches!(err, ConfigError::Json(ref msg) if msg.contains("invalid clamp range")),
            "{}",
            err
        );
        assert_eq!(
            ParameterClamp::new(2., 1.),
            Err(ConfigError::InvalidClamp { min: 2., max: 1. })
        );
        assert!(ParameterClamp::new(f64::NAN, 1.).is_err());
        assert!(ParameterClamp::new(0., f64::NAN).is_err());
    }

    #[test]
    fn clamp_survives_a_json_round_trip() {
        let clamp = ParameterClamp::new(-0.5, 2.).unwrap();
        let json = serde_json::to_string(&clamp).unwrap();
        assert_eq!(json, r#"{"min":-0.5,"max":2.0}"#);
        assert_eq!(serde_json::from_str::<ParameterClamp>(&json).unwrap(), clamp);
        assert!(serde_json::from_str::<ParameterClamp>(r#"{"min":3.0,"max":2.0}"#).is_err());
    }

    #[test]
    fn rejects_non_finite_learning_rate() {
        let config = NetworkConfig {
            learning_rate: f64::NAN,
            ..NetworkConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLearningRate(r)) if r.is_nan()
        ));
        assert!(NetworkConfig::from_json(r#"{ "learning_rate": 1e400 }"#).is_err());
    }

    #[test]
    fn rejects_unknown_activation() {
        let err = NetworkConfig::from_json(r#"{ "activation": "Tanh" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
