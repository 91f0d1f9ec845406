//! Configuration validation
//!
//! Misconfigured identifiers or caps surface here, at load time, rather than
//! as codec errors mid-session.

use crate::config::types::Config;
use crate::ident::IdentCodec;
use crate::ConfigError;
use url::Url;

/// Validates a parsed configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    // Base URL must parse and be joinable
    Url::parse(&config.source.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", config.source.base_url, e)))?;

    if config.source.id_width == 0 || config.source.id_width > 19 {
        return Err(ConfigError::Validation(format!(
            "id-width must be between 1 and 19, got {}",
            config.source.id_width
        )));
    }

    // Seed and floor identifiers must decode under the configured format
    let codec = IdentCodec::new(config.source.id_prefix, config.source.id_width);
    codec
        .decode(&config.source.start_id)
        .map_err(|_| ConfigError::InvalidIdentifier(config.source.start_id.clone()))?;

    if let Some(floor) = &config.source.floor_id {
        let floor_ord = codec
            .decode(floor)
            .map_err(|_| ConfigError::InvalidIdentifier(floor.clone()))?;
        let start_ord = codec.decode(&config.source.start_id).unwrap_or(0);
        if floor_ord > start_ord {
            return Err(ConfigError::Validation(format!(
                "floor-id {} is above start-id {}",
                floor, config.source.start_id
            )));
        }
    }

    if config.crawler.sweep_max_probes == 0 {
        return Err(ConfigError::Validation(
            "sweep-max-probes must be greater than 0".to_string(),
        ));
    }

    if config.crawler.sweep_miss_limit == 0 || config.crawler.frontier_miss_limit == 0 {
        return Err(ConfigError::Validation(
            "miss limits must be greater than 0".to_string(),
        ));
    }

    if config.crawler.frontier_max_probes == 0 {
        return Err(ConfigError::Validation(
            "frontier-max-probes must be greater than 0".to_string(),
        ));
    }

    if config.source.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "request-timeout-secs must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        toml::from_str(
            r#"
[source]
base-url = "https://news.example.com/article/"
start-id = "A00000136232"

[crawler]

[storage]
database-path = "./test.db"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let mut config = valid_config();
        config.source.base_url = "not a url".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_rejects_undecodable_start_id() {
        let mut config = valid_config();
        config.source.start_id = "Z123".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn test_rejects_floor_above_start() {
        let mut config = valid_config();
        config.source.floor_id = Some("A00000999999".to_string());
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_zero_caps() {
        let mut config = valid_config();
        config.crawler.sweep_max_probes = 0;
        assert!(validate(&config).is_err());

        let mut config = valid_config();
        config.crawler.sweep_miss_limit = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_oversized_width() {
        let mut config = valid_config();
        config.source.id_width = 20;
        assert!(validate(&config).is_err());
    }
}
