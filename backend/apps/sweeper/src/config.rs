//! Sweeper configuration
//!
//! Read from the process environment once at startup.

use std::time::Duration;

use anyhow::{Context, bail};

/// Runtime settings for the session sweeper
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    pub database_url: String,
    pub max_connections: u32,
    /// How long to wait for a pooled connection
    pub acquire_timeout: Duration,
    /// Pause between sweeps (300 seconds)
    pub interval: Duration,
    /// Sweep once and exit
    pub once: bool,
}

impl SweeperConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// `DATABASE_URL` is required; everything else has a default
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url =
            lookup("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

        let interval = Duration::from_secs(parse_or(&lookup, "SWEEP_INTERVAL_SECS", 300)?);
        if interval.is_zero() {
            bail!("SWEEP_INTERVAL_SECS must be positive");
        }

        Ok(Self {
            database_url,
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 2)?,
            acquire_timeout: Duration::from_secs(parse_or(&lookup, "DATABASE_ACQUIRE_TIMEOUT_SECS", 5)?),
            interval,
            once: matches!(lookup("SWEEP_ONCE").as_deref(), Some("1" | "true")),
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} is not a valid number: {raw:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SweeperConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://db")])).unwrap();
        assert_eq!(config.database_url, "postgres://db");
        assert_eq!(config.max_connections, 2);
        assert_eq!(config.interval, Duration::from_secs(300));
        assert!(!config.once);
    }

    #[test]
    fn test_overrides() {
        let config = SweeperConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db"),
            ("SWEEP_INTERVAL_SECS", "60"),
            ("SWEEP_ONCE", "true"),
        ]))
        .unwrap();
        assert_eq!(config.interval, Duration::from_secs(60));
        assert!(config.once);
    }

    #[test]
    fn test_missing_url_fails() {
        assert!(SweeperConfig::from_lookup(lookup(&[])).is_err());
    }

    #[test]
    fn test_bad_interval_fails() {
        let base = [("DATABASE_URL", "postgres://db")];
        for value in ["0", "soon"] {
            let mut pairs = base.to_vec();
            pairs.push(("SWEEP_INTERVAL_SECS", value));
            assert!(SweeperConfig::from_lookup(lookup(&pairs)).is_err());
        }
    }
}
