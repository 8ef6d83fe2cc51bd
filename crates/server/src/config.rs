use std::env;

use trainer_core::ThresholdConfig;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Thresholds applied when a request does not carry its own
    pub default_thresholds: ThresholdConfig,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable numbers fall back to defaults;
    /// a zero `DEFAULT_TOP_N` is rejected.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = ThresholdConfig::default();

        let top_n = get("DEFAULT_TOP_N")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.top_n);
        let score_difference_threshold = get("DEFAULT_SCORE_DIFFERENCE_THRESHOLD")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.score_difference_threshold);

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: get("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            default_thresholds: ThresholdConfig::new(top_n, score_difference_threshold)?,
        })
    }
}
