//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[data]
prices = data/prices.csv

[strategy]
lookback_short = 30
lookback_long = 90
top_k = 2

[metrics]
periods_per_year = 252
risk_free_rate = 0.02
"#;

    #[test]
    fn reads_values_by_section() {
        let config = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            config.get_string("data", "prices"),
            Some("data/prices.csv".to_string())
        );
        assert_eq!(config.get_int("strategy", "lookback_short", 0), 30);
        assert_eq!(config.get_int("strategy", "lookback_long", 0), 90);
        assert!((config.get_double("metrics", "risk_free_rate", 0.0) - 0.02).abs() < 1e-12);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(config.get_string("strategy", "nope"), None);
        assert_eq!(config.get_int("strategy", "nope", 7), 7);
        assert!((config.get_double("metrics", "target_return", 0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn unparseable_values_fall_back_to_defaults() {
        let config = FileConfigAdapter::from_string("[strategy]\ntop_k = two\n").unwrap();
        assert_eq!(config.get_int("strategy", "top_k", 2), 2);
    }
}
