//! Zotero Web API client.
//!
//! Thin typed wrapper over the four catalog operations this tool consumes:
//! list top-level items, fetch an item's children, fetch one item, update
//! one item. Item data is modeled with the fields the tagger reads plus a
//! flattened map of everything else, so write-backs round-trip fields this
//! tool does not know about.

mod error;

pub use error::CatalogError;

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::Config;
use crate::user_agent;

/// Default Zotero Web API base URL.
const DEFAULT_BASE_URL: &str = "https://api.zotero.org";
/// Zotero Web API version header value.
const API_VERSION: &str = "3";
const CONNECT_TIMEOUT_SECS: u64 = 10;
const READ_TIMEOUT_SECS: u64 = 30;

// ==================== Zotero API Types ====================

/// One tag entry on an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// The tag string (case-sensitive).
    pub tag: String,
    /// Zotero tag type: 0 manual, 1 automatic. Absent on manual tags.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<i64>,
}

impl Tag {
    /// Creates a manual tag entry.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            kind: None,
        }
    }
}

/// The `data` block of a Zotero item.
///
/// Only fields the tagger reads are modeled; everything else the API sent
/// is preserved in `extra` and serialized back verbatim on update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemData {
    /// Item key, repeated inside the data block.
    #[serde(default)]
    pub key: String,
    /// Zotero item type label (`journalArticle`, `webpage`, `attachment`, ...).
    #[serde(rename = "itemType", default)]
    pub item_type: String,
    /// Item title. Empty when absent.
    #[serde(default)]
    pub title: String,
    /// Abstract text. Empty when absent.
    #[serde(rename = "abstractNote", default)]
    pub abstract_note: String,
    /// Item URL. Empty when absent.
    #[serde(default)]
    pub url: String,
    /// MIME content type; present on attachment items.
    #[serde(rename = "contentType", default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Tags attached to the item, in catalog order.
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Every other field of the data block, round-tripped untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One Zotero item as returned by the Web API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Stable item identifier.
    pub key: String,
    /// Item version for optimistic-concurrency on update.
    #[serde(default)]
    pub version: u64,
    /// The item's data block.
    pub data: ItemData,
    /// Envelope fields (library, links, meta) round-tripped untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ==================== ZoteroClient ====================

/// Client for the Zotero Web API, scoped to one library.
pub struct ZoteroClient {
    client: Client,
    base_url: String,
    library_prefix: String,
    api_key: String,
}

impl ZoteroClient {
    /// Creates a client for the library named by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ClientBuild`] if HTTP client construction fails.
    pub fn new(config: &Config) -> Result<Self, CatalogError> {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ClientBuild`] if HTTP client construction fails.
    pub fn with_base_url(
        config: &Config,
        base_url: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(READ_TIMEOUT_SECS))
            .user_agent(user_agent::default_api_user_agent())
            .gzip(true)
            .build()
            .map_err(|source| CatalogError::ClientBuild { source })?;

        // Zotero addresses group libraries as /groups/{id} and personal
        // libraries as /users/{id}.
        let segment = if config.library_type == "user" {
            "users"
        } else {
            "groups"
        };

        Ok(Self {
            client,
            base_url: base_url.into(),
            library_prefix: format!("{segment}/{}", config.library_id),
            api_key: config.zotero_api_key.clone(),
        })
    }

    fn library_url(&self, suffix: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.library_prefix, suffix)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, CatalogError> {
        let response = self
            .client
            .get(url)
            .header("Zotero-API-Key", &self.api_key)
            .header("Zotero-API-Version", API_VERSION)
            .send()
            .await
            .map_err(|e| CatalogError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::http_status(url, status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CatalogError::decode(url, e))
    }

    /// Lists top-level items of the library, in catalog order.
    ///
    /// `limit` caps the number of items returned; `None` uses the server
    /// default page size.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on network, HTTP, or decode failure.
    pub async fn top_items(&self, limit: Option<u32>) -> Result<Vec<Item>, CatalogError> {
        let mut url = self.library_url("items/top");
        if let Some(limit) = limit {
            url.push_str(&format!("?limit={limit}"));
        }
        debug!(url = %url, "Listing top-level items");
        self.get_json(&url).await
    }

    /// Fetches the child items (attachments, notes) of one item.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on network, HTTP, or decode failure.
    pub async fn children(&self, item_key: &str) -> Result<Vec<Item>, CatalogError> {
        let url = self.library_url(&format!("items/{item_key}/children"));
        debug!(url = %url, "Fetching item children");
        self.get_json(&url).await
    }

    /// Fetches one item by its key.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on network, HTTP, or decode failure.
    pub async fn item(&self, item_key: &str) -> Result<Item, CatalogError> {
        let url = self.library_url(&format!("items/{item_key}"));
        debug!(url = %url, "Fetching item");
        self.get_json(&url).await
    }

    /// Writes one item back to the catalog.
    ///
    /// Sends the item's data block with an `If-Unmodified-Since-Version`
    /// precondition so a concurrent edit surfaces as HTTP 412 instead of a
    /// silent overwrite.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on network or HTTP failure, including 412
    /// when the item changed since it was fetched.
    pub async fn update_item(&self, item: &Item) -> Result<(), CatalogError> {
        let url = self.library_url(&format!("items/{}", item.key));
        debug!(url = %url, version = item.version, "Updating item");

        let response = self
            .client
            .put(&url)
            .header("Zotero-API-Key", &self.api_key)
            .header("Zotero-API-Version", API_VERSION)
            .header("If-Unmodified-Since-Version", item.version.to_string())
            .json(&item.data)
            .send()
            .await
            .map_err(|e| CatalogError::network(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::http_status(&url, status.as_u16()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for ZoteroClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZoteroClient")
            .field("base_url", &self.base_url)
            .field("library_prefix", &self.library_prefix)
            .finish_non_exhaustive()
    }
}
