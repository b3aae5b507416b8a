//! Learning hyperparameters.

use serde::{Deserialize, Serialize};

/// Q-learning hyperparameters.
///
/// Values are typically in `[0, 1]` but are not clamped. They may change
/// between episodes, never during one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Hyperparameters {
    /// Step size α of the value update.
    pub learning_rate: f64,
    /// Discount γ applied to the next state's best value.
    pub discount_factor: f64,
    /// Exploration rate ε of the epsilon-greedy policy.
    pub epsilon: f64,
}

impl Hyperparameters {
    /// Creates hyperparameters from explicit values.
    pub fn new(learning_rate: f64, discount_factor: f64, epsilon: f64) -> Self {
        Self {
            learning_rate,
            discount_factor,
            epsilon,
        }
    }

    /// Sets the learning rate.
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Sets the discount factor.
    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    /// Sets the exploration rate.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Self::new(0.1, 0.95, 0.3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let hp = Hyperparameters::default();
        assert!((hp.learning_rate - 0.1).abs() < 1e-12);
        assert!((hp.discount_factor - 0.95).abs() < 1e-12);
        assert!((hp.epsilon - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_builder_does_not_clamp() {
        let hp = Hyperparameters::default()
            .with_learning_rate(1.5)
            .with_discount_factor(0.5)
            .with_epsilon(-0.2);
        assert!((hp.learning_rate - 1.5).abs() < 1e-12);
        assert!((hp.discount_factor - 0.5).abs() < 1e-12);
        assert!((hp.epsilon + 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let hp: Hyperparameters = serde_json::from_str(r#"{ "epsilon": 0.05 }"#).unwrap();
        assert!((hp.epsilon - 0.05).abs() < 1e-12);
        assert!((hp.learning_rate - 0.1).abs() < 1e-12);
    }
}
