//! Server Settings

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Runtime settings, from built-in defaults overridden by `EXAM_API_*`
/// environment variables (e.g. `EXAM_API_MODEL_DIR=/srv/models`).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Socket address the server binds to.
    pub bind_addr: String,
    /// Directory containing `encoder.json` and `model.json`.
    pub model_dir: String,
    /// Predict route rate limit: seconds per replenished request.
    pub rate_limit_per_second: u64,
    /// Predict route rate limit: burst size.
    pub rate_limit_burst: u32,
}

impl Settings {
    /// Load settings from defaults and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("bind_addr", "0.0.0.0:8080")?
            .set_default("model_dir", "models")?
            .set_default("rate_limit_per_second", 1)?
            .set_default("rate_limit_burst", 20)?
            .add_source(Environment::with_prefix("EXAM_API"))
            .build()?
            .try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            model_dir: "models".to_string(),
            rate_limit_per_second: 1,
            rate_limit_burst: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::load().unwrap();
        assert_eq!(settings.bind_addr, "0.0.0.0:8080");
        assert_eq!(settings.model_dir, "models");
        assert_eq!(settings.rate_limit_burst, 20);
    }
}
