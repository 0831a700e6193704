use std::env;

use crate::ipam::BaseNetwork;
use crate::models::Tier;

/// Config holds the runner's settings
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to a JSON design request; the built-in demo request when unset
    pub request_path: Option<String>,
    /// Output path; stdout when unset
    pub output_path: Option<String>,
    pub seed: Option<u64>,
    pub base_octet: Option<u8>,
    pub dmz_octet: Option<u8>,
    pub pretty: bool,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn load() -> Self {
        Self {
            request_path: get_optional_env("DESIGN_REQUEST"),
            output_path: get_optional_env("DESIGN_OUTPUT"),
            seed: get_optional_env("DESIGN_SEED").and_then(|s| s.parse().ok()),
            base_octet: get_optional_env("DESIGN_BASE_OCTET").and_then(|s| s.parse().ok()),
            dmz_octet: get_optional_env("DESIGN_DMZ_OCTET").and_then(|s| s.parse().ok()),
            pretty: parse_bool(&get_env("DESIGN_PRETTY", "true")),
        }
    }

    /// Base network for this run. An explicit octet wins over the seed;
    /// with neither set the prefix is drawn at random for the tier.
    pub fn base_network(&self, tier: Tier) -> BaseNetwork {
        let drawn = match self.seed {
            Some(seed) => BaseNetwork::from_seed(seed, tier),
            None if self.base_octet.is_some() || self.dmz_octet.is_some() => BaseNetwork::default(),
            None => BaseNetwork::random(tier),
        };
        BaseNetwork::new(
            self.base_octet.unwrap_or(drawn.octet),
            self.dmz_octet.unwrap_or(drawn.dmz_octet),
        )
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn get_optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bool(value: &str) -> bool {
    !matches!(value.trim().to_ascii_lowercase().as_str(), "false" | "0" | "no" | "off")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            request_path: None,
            output_path: None,
            seed: None,
            base_octet: None,
            dmz_octet: None,
            pretty: true,
        }
    }

    #[test]
    fn test_explicit_octets_win() {
        let cfg = Config {
            seed: Some(5),
            base_octet: Some(77),
            dmz_octet: Some(3),
            ..config()
        };
        assert_eq!(cfg.base_network(Tier::Enterprise), BaseNetwork::new(77, 3));
    }

    #[test]
    fn test_seed_is_reproducible() {
        let cfg = Config { seed: Some(42), ..config() };
        assert_eq!(cfg.base_network(Tier::Enterprise), cfg.base_network(Tier::Enterprise));
        assert_eq!(cfg.base_network(Tier::Enterprise), BaseNetwork::from_seed(42, Tier::Enterprise));
    }

    #[test]
    fn test_partial_override_without_seed() {
        let cfg = Config {
            base_octet: Some(9),
            ..config()
        };
        assert_eq!(cfg.base_network(Tier::Enterprise), BaseNetwork::new(9, 0));
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true"));
        assert!(parse_bool("1"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool(" OFF "));
    }
}
