use std::time::Duration;

/// Where the region carbon-intensity CSV comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionSource {
    /// Local file path.
    File(String),
    /// `http://` or `https://` URL fetched with reqwest.
    Url(String),
}

impl RegionSource {
    /// Classify a configured location by its scheme.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Url(location.to_string())
        } else {
            Self::File(location.to_string())
        }
    }
}

impl std::fmt::Display for RegionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "file {path}"),
            Self::Url(url) => write!(f, "url {url}"),
        }
    }
}

/// Settings for the startup region table load.
#[derive(Debug, Clone)]
pub struct RegionLoadConfig {
    pub source: RegionSource,
    /// Total attempts before giving up (at least 1).
    pub attempts: u32,
    /// Base delay; attempt `n` waits `n * retry_delay` before retrying.
    pub retry_delay: Duration,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub regions: RegionLoadConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                             | Default                                  |
    /// |-------------------------------------|------------------------------------------|
    /// | `HOST`                              | `0.0.0.0`                                |
    /// | `PORT`                              | `5000`                                   |
    /// | `CORS_ORIGINS`                      | `http://localhost:3000`                  |
    /// | `REQUEST_TIMEOUT_SECS`              | `30`                                     |
    /// | `CARBON_INTENSITY_SOURCE`           | `data/carbon-intensity-electricity.csv`  |
    /// | `CARBON_INTENSITY_LOAD_ATTEMPTS`    | `3`                                      |
    /// | `CARBON_INTENSITY_RETRY_DELAY_SECS` | `2`                                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let source = std::env::var("CARBON_INTENSITY_SOURCE")
            .unwrap_or_else(|_| "data/carbon-intensity-electricity.csv".into());

        let attempts: u32 = std::env::var("CARBON_INTENSITY_LOAD_ATTEMPTS")
            .unwrap_or_else(|_| "3".into())
            .parse()
            .expect("CARBON_INTENSITY_LOAD_ATTEMPTS must be a valid u32");

        let retry_delay_secs: u64 = std::env::var("CARBON_INTENSITY_RETRY_DELAY_SECS")
            .unwrap_or_else(|_| "2".into())
            .parse()
            .expect("CARBON_INTENSITY_RETRY_DELAY_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            regions: RegionLoadConfig {
                source: RegionSource::parse(&source),
                attempts: attempts.max(1),
                retry_delay: Duration::from_secs(retry_delay_secs),
            },
        }
    }
}
