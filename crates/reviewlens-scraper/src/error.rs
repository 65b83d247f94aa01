use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("could not connect to {url}")]
    Connection { url: String },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("search results are not in the Mobiles category (found {found:?})")]
    InvalidCategory { found: Option<String> },

    #[error("no product found in search results")]
    NoProductFound,
}

impl ScraperError {
    /// Classifies a `reqwest` failure into timeout, connection, or generic
    /// request errors so callers can report each differently.
    #[must_use]
    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ScraperError::Timeout {
                url: url.to_owned(),
            }
        } else if err.is_connect() {
            ScraperError::Connection {
                url: url.to_owned(),
            }
        } else {
            ScraperError::Request {
                url: url.to_owned(),
                source: err,
            }
        }
    }

    /// `true` for failures of the network layer, as opposed to content checks.
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            ScraperError::Timeout { .. }
                | ScraperError::Connection { .. }
                | ScraperError::Request { .. }
                | ScraperError::UnexpectedStatus { .. }
        )
    }
}
