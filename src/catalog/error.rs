//! Error types for the Zotero catalog client.

use thiserror::Error;

/// Errors that can occur talking to the Zotero Web API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Network-level error (DNS resolution, connection refused, TLS, timeout).
    #[error("network error calling {url}: {source}")]
    Network {
        /// The request URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// HTTP error response (4xx client errors, 5xx server errors).
    ///
    /// A 412 on update means the item changed since it was fetched
    /// (version precondition failed); the walker treats it like any other
    /// per-item failure.
    #[error("HTTP {status} from catalog at {url}")]
    HttpStatus {
        /// The request URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The response body did not decode as the expected JSON shape.
    #[error("unexpected catalog response from {url}: {source}")]
    Decode {
        /// The request URL whose response failed to decode.
        url: String,
        /// The underlying decode error.
        #[source]
        source: reqwest::Error,
    },

    /// HTTP client construction failed.
    #[error("catalog HTTP client construction failed: {source}")]
    ClientBuild {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },
}

impl CatalogError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a decode error from a reqwest error.
    pub fn decode(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Decode {
            url: url.into(),
            source,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_display() {
        let error = CatalogError::http_status("https://api.zotero.org/groups/1/items/top", 403);
        let msg = error.to_string();
        assert!(msg.contains("403"), "expected status in: {msg}");
        assert!(msg.contains("items/top"), "expected URL in: {msg}");
    }
}
