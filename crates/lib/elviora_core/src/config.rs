//! Relay configuration resolved from environment variables.

use std::env;
use std::time::Duration;

use tracing::warn;
use url::Url;

/// Default completion endpoint (OpenRouter chat completions).
pub const DEFAULT_COMPLETION_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "deepseek/deepseek-r1-0528:free";

/// Default storefront product endpoint.
pub const DEFAULT_PRODUCTS_URL: &str =
    "https://elviorajewelry.lovestoblog.com/actions/get_products.php?limit=200&offset=0";

/// Default product cache TTL: 5 minutes.
pub const DEFAULT_PRODUCTS_CACHE_MS: u64 = 300_000;

/// Default product fetch timeout: 10 seconds.
pub const DEFAULT_PRODUCTS_TIMEOUT_MS: u64 = 10_000;

/// Default completion call timeout: 60 seconds.
pub const DEFAULT_COMPLETION_TIMEOUT_MS: u64 = 60_000;

/// Settings for the outbound completion call.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    /// Bearer token for the provider. `None` disables chat.
    pub api_key: Option<String>,
    /// Model identifier sent in every payload.
    pub model: String,
    /// Chat completions endpoint.
    pub url: Url,
    /// Optional `HTTP-Referer` attribution header.
    pub referer: Option<String>,
    /// Optional `X-Title` attribution header.
    pub title: Option<String>,
    pub timeout: Duration,
}

/// Settings for the product source and its cache.
#[derive(Debug, Clone)]
pub struct ProductsConfig {
    pub url: Url,
    pub cache_ttl: Duration,
    pub timeout: Duration,
}

/// Configuration for the relay core.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub completion: CompletionConfig,
    pub products: ProductsConfig,
}

impl RelayConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                | Default                                 |
    /// |-------------------------|-----------------------------------------|
    /// | `OPENROUTER_API_KEY`    | unset (chat returns `NO_API_KEY`)       |
    /// | `OPENROUTER_MODEL`      | [`DEFAULT_MODEL`]                       |
    /// | `OPENROUTER_API_URL`    | [`DEFAULT_COMPLETION_URL`]              |
    /// | `OPENROUTER_REFERER`    | unset                                   |
    /// | `OPENROUTER_TITLE`      | unset                                   |
    /// | `OPENROUTER_TIMEOUT_MS` | `60000`                                 |
    /// | `PRODUCTS_URL`          | [`DEFAULT_PRODUCTS_URL`]                |
    /// | `PRODUCTS_CACHE_MS`     | `300000`                                |
    /// | `PRODUCTS_TIMEOUT_MS`   | `10000`                                 |
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`RelayConfig::from_env`] but reads through `lookup`, so tests
    /// never have to touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            completion: CompletionConfig {
                api_key: non_empty("OPENROUTER_API_KEY"),
                model: non_empty("OPENROUTER_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
                url: url_or_default(
                    "OPENROUTER_API_URL",
                    non_empty("OPENROUTER_API_URL"),
                    DEFAULT_COMPLETION_URL,
                ),
                referer: non_empty("OPENROUTER_REFERER"),
                title: non_empty("OPENROUTER_TITLE"),
                timeout: millis_or_default(
                    "OPENROUTER_TIMEOUT_MS",
                    non_empty("OPENROUTER_TIMEOUT_MS"),
                    DEFAULT_COMPLETION_TIMEOUT_MS,
                ),
            },
            products: ProductsConfig {
                url: url_or_default(
                    "PRODUCTS_URL",
                    non_empty("PRODUCTS_URL"),
                    DEFAULT_PRODUCTS_URL,
                ),
                cache_ttl: millis_or_default(
                    "PRODUCTS_CACHE_MS",
                    non_empty("PRODUCTS_CACHE_MS"),
                    DEFAULT_PRODUCTS_CACHE_MS,
                ),
                timeout: millis_or_default(
                    "PRODUCTS_TIMEOUT_MS",
                    non_empty("PRODUCTS_TIMEOUT_MS"),
                    DEFAULT_PRODUCTS_TIMEOUT_MS,
                ),
            },
        }
    }
}

fn millis_or_default(name: &str, raw: Option<String>, default_ms: u64) -> Duration {
    let ms = match raw {
        Some(v) => v.parse::<u64>().unwrap_or_else(|_| {
            warn!(variable = name, value = %v, default_ms, "invalid millisecond value, using default");
            default_ms
        }),
        None => default_ms,
    };
    Duration::from_millis(ms)
}

fn url_or_default(name: &str, raw: Option<String>, default: &str) -> Url {
    let fallback = || Url::parse(default).expect("built-in default URL is valid");
    match raw {
        Some(v) => Url::parse(&v).unwrap_or_else(|e| {
            warn!(variable = name, value = %v, error = %e, "invalid URL, using default");
            fallback()
        }),
        None => fallback(),
    }
}
