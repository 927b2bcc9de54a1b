//! `reqwest`-backed [`Fetch`] implementation.

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::{Fetch, ScrapeConfig, ScrapeError};

/// Fetches HTML pages over HTTP with a single shared client.
#[derive(Debug, Clone)]
pub struct HtmlFetcher {
    client: reqwest::Client,
}

impl HtmlFetcher {
    /// Builds a fetcher whose client applies the configured timeout and
    /// default headers to every request.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::InvalidHeader`] if a configured header name or
    /// value is malformed, or [`ScrapeError::Client`] if the client cannot be
    /// built.
    pub fn new(config: &ScrapeConfig) -> Result<Self, ScrapeError> {
        let mut header_map = HeaderMap::new();
        for (key, value) in &config.headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| ScrapeError::InvalidHeader(format!("name '{key}': {e}")))?;
            let val = HeaderValue::from_str(value)
                .map_err(|e| ScrapeError::InvalidHeader(format!("value '{value}': {e}")))?;
            header_map.insert(name, val);
        }

        let client = reqwest::Client::builder()
            .default_headers(header_map)
            .timeout(config.timeout)
            .build()
            .map_err(ScrapeError::Client)?;

        Ok(Self { client })
    }
}

impl Fetch for HtmlFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let fetch_error = |source| ScrapeError::Fetch {
            url: url.to_owned(),
            source,
        };

        log::debug!("GET {url}");
        let response = self.client.get(url).send().await.map_err(fetch_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ScrapeError::NotFound {
                url: url.to_owned(),
            });
        }
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(fetch_error)
    }
}
