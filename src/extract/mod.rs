//! Webpage and PDF excerpt extraction.
//!
//! The extractor turns an item's URL or PDF attachment into a word-capped
//! plain-text excerpt for the suggestion prompt, governed by the processing
//! policy flags. Extraction failures are logged and reduce to an absent
//! excerpt; they never propagate to the caller. The word cap bounds prompt
//! size and model cost.

mod error;
mod html;
mod pdf;

pub use error::ExtractError;

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::options::ProcessingOptions;
use crate::user_agent;

/// Maximum whitespace-separated words kept in any excerpt.
pub const EXCERPT_WORD_CAP: usize = 2000;
/// Maximum PDF pages contributing to an excerpt.
const PDF_PAGE_CAP: usize = 5;
/// Webpage fetch timeout. Content sites are slow and unbounded; excerpts
/// are optional, so give up quickly.
const WEBPAGE_TIMEOUT_SECS: u64 = 10;

/// Truncates `text` to its first `cap` whitespace-separated words,
/// preserving original order.
#[must_use]
pub fn truncate_words(text: &str, cap: usize) -> String {
    text.split_whitespace().take(cap).collect::<Vec<_>>().join(" ")
}

/// Fetches and reduces item content per the processing policy.
pub struct ContentExtractor {
    client: Client,
    options: ProcessingOptions,
}

impl ContentExtractor {
    /// Creates an extractor holding a copy of the policy flags and a
    /// browser-UA HTTP client with a short timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::ClientBuild`] if HTTP client construction fails.
    pub fn new(options: &ProcessingOptions) -> Result<Self, ExtractError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(WEBPAGE_TIMEOUT_SECS))
            .user_agent(user_agent::BROWSER_USER_AGENT)
            .gzip(true)
            .build()
            .map_err(|source| ExtractError::ClientBuild { source })?;

        Ok(Self {
            client,
            options: options.clone(),
        })
    }

    /// Fetches the item's webpage and reduces it to a word-capped excerpt.
    ///
    /// Runs only when the policy allows it for this item (`url_always`, or
    /// `url_fallback` with no PDF present); otherwise returns `None` without
    /// any network call. Fetch or parse failures are logged and yield `None`.
    pub async fn webpage_excerpt(&self, url: &str, has_pdf: bool) -> Option<String> {
        if !self.options.should_fetch_url(has_pdf) {
            return None;
        }

        match self.fetch_webpage_text(url).await {
            Ok(text) if !text.is_empty() => Some(text),
            Ok(_) => {
                debug!(url = %url, "Webpage yielded no content text");
                None
            }
            Err(error) => {
                warn!(url = %url, error = %error, "Webpage extraction failed");
                None
            }
        }
    }

    /// Downloads the item's PDF attachment and reduces it to a word-capped
    /// excerpt of at most the first five pages.
    ///
    /// A no-op returning `None` unless PDF parsing is enabled. Download or
    /// parse failures are logged and yield `None`.
    pub async fn pdf_excerpt(&self, pdf_url: &str) -> Option<String> {
        if !self.options.parse_pdf {
            return None;
        }

        match self.fetch_pdf_text(pdf_url).await {
            Ok(text) if !text.is_empty() => Some(text),
            Ok(_) => {
                debug!(url = %pdf_url, "PDF yielded no text");
                None
            }
            Err(error) => {
                warn!(url = %pdf_url, error = %error, "PDF extraction failed");
                None
            }
        }
    }

    async fn fetch_webpage_text(&self, url: &str) -> Result<String, ExtractError> {
        let parsed = Url::parse(url).map_err(|_| ExtractError::invalid_url(url))?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| ExtractError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::http_status(url, status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ExtractError::body(url, e))?;

        let text = html::extract_main_text(&body);
        Ok(truncate_words(&text, EXCERPT_WORD_CAP))
    }

    async fn fetch_pdf_text(&self, pdf_url: &str) -> Result<String, ExtractError> {
        let parsed = Url::parse(pdf_url).map_err(|_| ExtractError::invalid_url(pdf_url))?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| ExtractError::network(pdf_url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::http_status(pdf_url, status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ExtractError::body(pdf_url, e))?;

        let text = pdf::text_from_pdf_bytes(&bytes, PDF_PAGE_CAP)?;
        Ok(truncate_words(&text, EXCERPT_WORD_CAP))
    }
}

impl std::fmt::Debug for ContentExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentExtractor")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
