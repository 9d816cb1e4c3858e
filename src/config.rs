use std::env;

const DEFAULT_DATABASE_URL: &str = "app.db";
const DEFAULT_ADDRESS: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Runtime settings of the pricing server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// SQLite database file (`DATABASE_URL`).
    pub database_url: String,
    /// Address to bind (`ADDRESS`).
    pub address: String,
    /// Port to bind (`PORT`).
    pub port: u16,
    /// Maximum cached price lookups, `0` disables the cache (`PRICE_CACHE_CAPACITY`).
    pub cache_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            address: DEFAULT_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Missing or unparsable values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT").map(|value| value.trim().parse::<u16>()) {
            Some(Ok(port)) => port,
            Some(Err(err)) => {
                log::warn!("Ignoring invalid PORT: {err}");
                defaults.port
            }
            None => defaults.port,
        };

        let cache_capacity = match lookup("PRICE_CACHE_CAPACITY")
            .map(|value| value.trim().parse::<usize>())
        {
            Some(Ok(capacity)) => capacity,
            Some(Err(err)) => {
                log::warn!("Ignoring invalid PRICE_CACHE_CAPACITY: {err}");
                defaults.cache_capacity
            }
            None => defaults.cache_capacity,
        };

        Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            address: lookup("ADDRESS").unwrap_or(defaults.address),
            port,
            cache_capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = ServerConfig::from_lookup(lookup_from(&[]));

        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_url, "app.db");
    }

    #[test]
    fn values_are_read_from_lookup() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "prices.db"),
            ("ADDRESS", "0.0.0.0"),
            ("PORT", "9000"),
            ("PRICE_CACHE_CAPACITY", "0"),
        ]));

        assert_eq!(config.database_url, "prices.db");
        assert_eq!(config.address, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.cache_capacity, 0);
    }

    #[test]
    fn invalid_numbers_fall_back_to_defaults() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("PORT", "eighty"),
            ("PRICE_CACHE_CAPACITY", "-1"),
        ]));

        assert_eq!(config.port, 8080);
        assert_eq!(config.cache_capacity, 1024);
    }
}
