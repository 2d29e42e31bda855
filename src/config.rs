//! Runtime configuration read from the environment, with defaults for every knob.

use std::env;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const DEFAULT_BASE_URL: &str = "https://bdl.stat.gov.pl/api/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Average price of 1 m² of dwellings.
pub const DEFAULT_VARIABLE_ID: u32 = 633_692;

pub const FIRST_YEAR: i32 = 2010;
pub const LAST_YEAR: i32 = 2023;
pub const DEFAULT_RANKING_YEAR: &str = "2023";
pub const DEFAULT_REGION: &str = "Mazowieckie";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: String,
    pub base_url: String,
    pub timeout: Duration,
    pub client_id: Option<String>,
    pub variable_id: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            client_id: None,
            variable_id: DEFAULT_VARIABLE_ID,
        }
    }
}

impl Config {
    /// Reads `DASHBOARD_BIND`, `BDL_BASE_URL`, `BDL_TIMEOUT_SECS`, `BDL_CLIENT_ID`
    /// and `BDL_VARIABLE_ID`. Unset or empty variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Config::default();

        if let Some(bind) = get("DASHBOARD_BIND") {
            config.bind_addr = bind.trim().to_string();
        }
        if let Some(base) = get("BDL_BASE_URL") {
            config.base_url = base.trim().trim_end_matches('/').to_string();
        }
        if let Some(raw) = get("BDL_TIMEOUT_SECS") {
            let secs = parse_positive("BDL_TIMEOUT_SECS", &raw)?;
            config.timeout = Duration::from_secs(secs);
        }
        config.client_id = get("BDL_CLIENT_ID").map(|v| v.trim().to_string());
        if let Some(raw) = get("BDL_VARIABLE_ID") {
            let id = parse_positive("BDL_VARIABLE_ID", &raw)?;
            config.variable_id = u32::try_from(id).map_err(|_| ConfigError::InvalidValue {
                name: "BDL_VARIABLE_ID",
                value: raw.clone(),
                reason: "out of range".to_string(),
            })?;
        }

        Ok(config)
    }
}

fn parse_positive(name: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::InvalidValue {
            name,
            value: raw.to_string(),
            reason: "must be greater than zero".to_string(),
        }),
        Ok(value) => Ok(value),
        Err(err) => Err(ConfigError::InvalidValue {
            name,
            value: raw.to_string(),
            reason: err.to_string(),
        }),
    }
}

/// Years offered in the page selectors, as strings.
pub fn selectable_years() -> Vec<String> {
    year_range(FIRST_YEAR, LAST_YEAR)
}

/// Inclusive range of years rendered as strings; empty when `from > to`.
pub fn year_range(from: i32, to: i32) -> Vec<String> {
    (from..=to).map(|year| year.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.variable_id, 633_692);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn overrides_are_applied_and_trailing_slash_trimmed() {
        let config = Config::from_lookup(lookup_from(&[
            ("DASHBOARD_BIND", "0.0.0.0:8080"),
            ("BDL_BASE_URL", "http://localhost:9000/api/"),
            ("BDL_TIMEOUT_SECS", "3"),
            ("BDL_CLIENT_ID", "abc"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.base_url, "http://localhost:9000/api");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.client_id.as_deref(), Some("abc"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("BDL_TIMEOUT_SECS", "0")])).unwrap_err();
        assert!(err.to_string().contains("BDL_TIMEOUT_SECS"));
    }

    #[test]
    fn year_range_is_inclusive_and_empty_when_reversed() {
        assert_eq!(year_range(2021, 2023), vec!["2021", "2022", "2023"]);
        assert!(year_range(2020, 2015).is_empty());
        assert_eq!(selectable_years().len(), 14);
    }
}
