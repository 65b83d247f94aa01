use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime configuration shared by the server and the CLI.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Origin of the retail site, e.g. `https://www.flipkart.com`.
    pub site_base_url: String,
    pub user_agent: String,
    pub search_timeout_secs: u64,
    pub product_timeout_secs: u64,
    /// Timeout for the first review page; later pages use `pagination_timeout_secs`.
    pub review_timeout_secs: u64,
    pub pagination_timeout_secs: u64,
    pub charts_dir: PathBuf,
    /// Number of per-run chart directories kept on disk; `0` keeps every run.
    pub chart_retention: usize,
}

impl AppConfig {
    #[must_use]
    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }

    #[must_use]
    pub fn product_timeout(&self) -> Duration {
        Duration::from_secs(self.product_timeout_secs)
    }

    #[must_use]
    pub fn review_timeout(&self) -> Duration {
        Duration::from_secs(self.review_timeout_secs)
    }

    #[must_use]
    pub fn pagination_timeout(&self) -> Duration {
        Duration::from_secs(self.pagination_timeout_secs)
    }
}
