//! API server configuration.

use std::env;

use tracing::warn;

/// Storefront origins allowed to call the API from a browser.
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "https://elviorajewelry.lovestoblog.com",
    "http://localhost",
    "http://localhost:8080",
    "http://127.0.0.1",
    "http://127.0.0.1:8080",
];

/// Default listener address; the server binary overrides it from its CLI args.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Default JSON body ceiling: 1 MiB.
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Configuration for the HTTP surface.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "0.0.0.0:3000").
    pub bind_addr: String,
    /// CORS allow-list. Credentials are never allowed.
    pub allowed_origins: Vec<String>,
    /// Maximum accepted request body size.
    pub body_limit: usize,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable           | Default                         |
    /// |--------------------|---------------------------------|
    /// | `CORS_ORIGINS`     | [`DEFAULT_ALLOWED_ORIGINS`]     |
    /// | `BODY_LIMIT_BYTES` | `1048576`                       |
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let allowed_origins = lookup("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|o| o.trim().trim_end_matches('/').to_string())
                    .filter(|o| !o.is_empty())
                    .filter(|o| {
                        let wildcard = o == "*";
                        if wildcard {
                            warn!("ignoring wildcard CORS origin");
                        }
                        !wildcard
                    })
                    .collect::<Vec<_>>()
            })
            .filter(|list| !list.is_empty())
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect());

        let body_limit = match lookup("BODY_LIMIT_BYTES") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(value = %raw, "invalid BODY_LIMIT_BYTES, using default");
                DEFAULT_BODY_LIMIT_BYTES
            }),
            None => DEFAULT_BODY_LIMIT_BYTES,
        };

        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            allowed_origins,
            body_limit,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_storefront_and_local_dev() {
        let config = ApiConfig::default();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.body_limit, DEFAULT_BODY_LIMIT_BYTES);
        assert!(
            config
                .allowed_origins
                .contains(&"https://elviorajewelry.lovestoblog.com".to_string())
        );
        assert!(config.allowed_origins.contains(&"http://localhost:8080".to_string()));
    }

    #[test]
    fn host_and_port_are_left_to_the_binary() {
        let config = ApiConfig::from_lookup(|name| match name {
            "HOST" => Some("127.0.0.1".into()),
            "PORT" => Some("8088".into()),
            _ => None,
        });
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
    }

    #[test]
    fn wildcard_origin_falls_back_to_defaults() {
        let config = ApiConfig::from_lookup(|name| (name == "CORS_ORIGINS").then(|| "*".into()));
        assert_eq!(
            config.allowed_origins,
            DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn wildcard_is_dropped_from_mixed_list() {
        let config = ApiConfig::from_lookup(|name| {
            (name == "CORS_ORIGINS").then(|| "https://shop.example, *".into())
        });
        assert_eq!(config.allowed_origins, vec!["https://shop.example"]);
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let config = ApiConfig::from_lookup(|name| match name {
            "CORS_ORIGINS" => Some(" https://shop.example/ , http://localhost:5173,,".into()),
            _ => None,
        });
        assert_eq!(
            config.allowed_origins,
            vec!["https://shop.example", "http://localhost:5173"]
        );
    }

    #[test]
    fn invalid_body_limit_falls_back() {
        let config = ApiConfig::from_lookup(|name| match name {
            "BODY_LIMIT_BYTES" => Some("1mb".into()),
            _ => None,
        });
        assert_eq!(config.body_limit, DEFAULT_BODY_LIMIT_BYTES);
    }
}
