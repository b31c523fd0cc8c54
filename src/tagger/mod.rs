//! Per-item suggestion pipeline and library walker.
//!
//! The [`Tagger`] owns the catalog client, the language-model client, the
//! content extractor, and the tag vocabulary for one run. Items flow one at
//! a time: metadata, optional content extraction, suggestion, update, fixed
//! delay, next item. Per-item failures are logged and never abort the walk.

mod metadata;
mod prompt;

pub use metadata::ItemMetadata;

use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::catalog::{CatalogError, Item, Tag, ZoteroClient};
use crate::extract::{ContentExtractor, ExtractError};
use crate::llm::AnthropicClient;
use crate::options::ProcessingOptions;
use crate::vocab::TagVocabulary;

/// Fixed delay between items: simple fixed-rate throttling toward both the
/// catalog and the model API, not adaptive.
const DEFAULT_ITEM_DELAY: Duration = Duration::from_secs(1);

/// Totals for one library walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Items that went through the suggestion step.
    pub processed: usize,
    /// Items whose tag list was successfully updated.
    pub tagged: usize,
    /// Items skipped for having no title.
    pub skipped: usize,
    /// Items whose update failed (suggestion-step failures show up as
    /// "no tags suggested" and are not counted here).
    pub failed: usize,
}

/// Orchestrator for one tagging run.
pub struct Tagger {
    catalog: ZoteroClient,
    llm: AnthropicClient,
    extractor: ContentExtractor,
    vocab: TagVocabulary,
    item_delay: Duration,
}

impl Tagger {
    /// Creates a tagger from its collaborators.
    ///
    /// The vocabulary is owned here and passed through the whole run; it is
    /// the only state shared across items.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError`] if the extractor's HTTP client cannot be built.
    pub fn new(
        catalog: ZoteroClient,
        llm: AnthropicClient,
        vocab: TagVocabulary,
        options: &ProcessingOptions,
    ) -> Result<Self, ExtractError> {
        Ok(Self {
            catalog,
            llm,
            extractor: ContentExtractor::new(options)?,
            vocab,
            item_delay: DEFAULT_ITEM_DELAY,
        })
    }

    /// Overrides the fixed inter-item delay (tests set zero).
    #[must_use]
    pub fn with_item_delay(mut self, delay: Duration) -> Self {
        self.item_delay = delay;
        self
    }

    /// Read access to the run's vocabulary.
    #[must_use]
    pub fn vocabulary(&self) -> &TagVocabulary {
        &self.vocab
    }

    /// Builds normalized metadata for one item, fetching its children to
    /// find a PDF attachment. Child-fetch failures are logged and leave the
    /// attachment absent.
    pub async fn item_metadata(&self, item: &Item) -> ItemMetadata {
        let children = match self.catalog.children(&item.key).await {
            Ok(children) => children,
            Err(e) => {
                error!(key = %item.key, error = %e, "Error fetching attachments");
                Vec::new()
            }
        };
        ItemMetadata::from_item(item, &children)
    }

    /// Requests tag suggestions for one item.
    ///
    /// Assembles whichever of title, abstract, webpage excerpt, and PDF
    /// excerpt are available, calls the model, and parses the response into
    /// candidate tags. All candidates are unconditionally absorbed into the
    /// vocabulary and the vocabulary is persisted before returning, even if
    /// the caller's item update later fails. Model failures are logged and
    /// return an empty list, which callers treat as "no suggestion".
    pub async fn suggest_tags(&mut self, meta: &ItemMetadata) -> Vec<String> {
        let mut parts = Vec::new();
        if !meta.title.is_empty() {
            parts.push(format!("Title: {}", meta.title));
        }
        if !meta.abstract_note.is_empty() {
            parts.push(format!("Abstract: {}", meta.abstract_note));
        }

        let has_pdf = meta.has_pdf();
        if !meta.url.is_empty() {
            if let Some(excerpt) = self.extractor.webpage_excerpt(&meta.url, has_pdf).await {
                parts.push(format!("Webpage content: {excerpt}"));
            }
        }
        if let Some(pdf_url) = &meta.pdf_attachment {
            if let Some(excerpt) = self.extractor.pdf_excerpt(pdf_url).await {
                parts.push(format!("PDF content: {excerpt}"));
            }
        }

        let user_prompt = prompt::build_prompt(&parts, &self.vocab.sorted());

        match self.llm.complete(prompt::SYSTEM_PROMPT, &user_prompt).await {
            Ok(response) => {
                let tags = prompt::parse_tags(&response);
                let added = self.vocab.absorb(&tags);
                debug!(suggested = tags.len(), added, "Model returned tag candidates");
                if let Err(e) = self.vocab.save() {
                    error!(error = %e, "Failed to persist tag vocabulary");
                }
                tags
            }
            Err(e) => {
                error!(key = %meta.key, error = %e, "Error getting tag suggestions");
                Vec::new()
            }
        }
    }

    /// Merges suggested tags into an item's tag list and writes it back.
    ///
    /// Appends every suggested tag not already present by case-sensitive
    /// string equality; existing tags are never removed or reordered.
    /// Re-applying the same list is a no-op on the tag set.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the re-fetch or write-back fails.
    pub async fn update_item_tags(
        &self,
        item_key: &str,
        new_tags: &[String],
    ) -> Result<(), CatalogError> {
        let mut item = self.catalog.item(item_key).await?;

        for tag in new_tags {
            if !item.data.tags.iter().any(|existing| &existing.tag == tag) {
                item.data.tags.push(Tag::new(tag.clone()));
            }
        }

        self.catalog.update_item(&item).await
    }

    /// Walks the library's top-level items and tags each one.
    ///
    /// Items are processed in catalog order, optionally capped at `limit`.
    /// Untitled items are skipped with a warning; every other per-item
    /// failure is logged and the walk continues. A fixed delay separates
    /// consecutive processed items.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] only when the initial item listing fails;
    /// nothing after that point aborts the walk.
    pub async fn run(&mut self, limit: Option<u32>) -> Result<RunStats, CatalogError> {
        let items = self.catalog.top_items(limit).await?;
        let total = items.len();
        info!(total, "Starting library walk");

        let mut stats = RunStats::default();
        for (index, item) in items.iter().enumerate() {
            let meta = self.item_metadata(item).await;
            info!(
                item = index + 1,
                total,
                key = %meta.key,
                item_type = %meta.item_type,
                title = %meta.title,
                "Processing item"
            );

            if meta.title.is_empty() {
                warn!(key = %meta.key, "Skipping item with no title");
                stats.skipped += 1;
                continue;
            }

            stats.processed += 1;
            let suggested = self.suggest_tags(&meta).await;

            if suggested.is_empty() {
                warn!(key = %meta.key, "No tags were suggested");
            } else {
                info!(
                    key = %meta.key,
                    suggested = ?suggested,
                    existing = ?meta.existing_tags,
                    "Applying suggested tags"
                );
                match self.update_item_tags(&meta.key, &suggested).await {
                    Ok(()) => {
                        info!(key = %meta.key, "Tags updated successfully");
                        stats.tagged += 1;
                    }
                    Err(e) => {
                        error!(key = %meta.key, error = %e, "Error updating item");
                        stats.failed += 1;
                    }
                }
            }

            tokio::time::sleep(self.item_delay).await;
        }

        info!(
            processed = stats.processed,
            tagged = stats.tagged,
            skipped = stats.skipped,
            failed = stats.failed,
            "Library walk complete"
        );
        Ok(stats)
    }
}

impl std::fmt::Debug for Tagger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tagger")
            .field("vocab_size", &self.vocab.len())
            .field("item_delay", &self.item_delay)
            .finish_non_exhaustive()
    }
}
