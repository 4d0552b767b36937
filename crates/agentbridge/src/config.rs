//! Adapter configuration.

use crate::adapter::DEFAULT_BEHAVIOR_NAME;
use serde::{Deserialize, Serialize};

/// Configuration for [`GymAdapter`](crate::adapter::GymAdapter)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Name of the single behavior the adapter exposes
    pub behavior_name: String,
    /// Seed for the first reset; later resets are unseeded
    pub seed: Option<u64>,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            behavior_name: DEFAULT_BEHAVIOR_NAME.to_string(),
            seed: None,
        }
    }
}

impl AdapterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the behavior name
    pub fn with_behavior_name(mut self, name: impl Into<String>) -> Self {
        self.behavior_name = name.into();
        self
    }

    /// Set the seed used by the first reset
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AdapterConfig::default();
        assert_eq!(config.behavior_name, "gym_behavior_name");
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_builder() {
        let config = AdapterConfig::new().with_behavior_name("pendulum").with_seed(9);
        assert_eq!(config.behavior_name, "pendulum");
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_serde_fills_missing_fields() {
        let config: AdapterConfig = serde_json::from_str(r#"{"seed": 3}"#).unwrap();
        assert_eq!(config.behavior_name, "gym_behavior_name");
        assert_eq!(config.seed, Some(3));

        let json = serde_json::to_string(&config).unwrap();
        let restored: AdapterConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, config);
    }
}
