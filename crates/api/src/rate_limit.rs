//! Predict Route Rate Limiting
//!
//! Per-client-IP rate limiting via tower_governor (GCRA). Requires the
//! service to be started with `into_make_service_with_connect_info::<SocketAddr>()`
//! so the peer IP is available.

use crate::settings::Settings;
use governor::middleware::StateInformationMiddleware;
use std::sync::Arc;
use tower_governor::governor::{GovernorConfig, GovernorConfigBuilder};
use tower_governor::key_extractor::PeerIpKeyExtractor;

/// Governor config with X-RateLimit-* response headers enabled.
pub type PredictGovernorConfig = GovernorConfig<PeerIpKeyExtractor, StateInformationMiddleware>;

/// Build the governor config for the predict route from settings.
pub fn predict_governor(settings: &Settings) -> Arc<PredictGovernorConfig> {
    Arc::new(
        GovernorConfigBuilder::default()
            .per_second(settings.rate_limit_per_second.max(1))
            .burst_size(settings.rate_limit_burst.max(1))
            .use_headers()
            .finish()
            .expect("non-zero rate limit settings"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_governor_config_from_settings() {
        let governor = predict_governor(&Settings::default());
        assert!(Arc::strong_count(&governor) > 0);
    }

    #[test]
    fn test_zero_settings_do_not_panic() {
        let settings = Settings {
            rate_limit_per_second: 0,
            rate_limit_burst: 0,
            ..Settings::default()
        };
        predict_governor(&settings);
    }
}
