//! Normalized per-item metadata.
//!
//! One [`ItemMetadata`] is built fresh per item from the item itself plus
//! its child attachments, consumed by the suggestion step, and discarded.

use crate::catalog::Item;

/// MIME type identifying PDF attachments.
const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Read-only normalized view of one catalog item.
#[derive(Debug, Clone)]
pub struct ItemMetadata {
    /// Item title; empty when absent.
    pub title: String,
    /// Abstract text; empty when absent.
    pub abstract_note: String,
    /// Stable item identifier.
    pub key: String,
    /// Item-type label from the catalog.
    pub item_type: String,
    /// Existing tag strings, in catalog order.
    pub existing_tags: Vec<String>,
    /// Item URL; empty when absent.
    pub url: String,
    /// URL of the first PDF attachment, when one exists.
    pub pdf_attachment: Option<String>,
}

impl ItemMetadata {
    /// Builds metadata from an item and its child items.
    ///
    /// The first child attachment with a PDF content type and a URL
    /// supplies `pdf_attachment`.
    #[must_use]
    pub fn from_item(item: &Item, children: &[Item]) -> Self {
        let pdf_attachment = children
            .iter()
            .find(|child| {
                child.data.content_type.as_deref() == Some(PDF_CONTENT_TYPE)
                    && !child.data.url.is_empty()
            })
            .map(|child| child.data.url.clone());

        Self {
            title: item.data.title.clone(),
            abstract_note: item.data.abstract_note.clone(),
            key: item.key.clone(),
            item_type: item.data.item_type.clone(),
            existing_tags: item.data.tags.iter().map(|t| t.tag.clone()).collect(),
            url: item.data.url.clone(),
            pdf_attachment,
        }
    }

    /// Returns true when the item has a PDF attachment URL.
    #[must_use]
    pub fn has_pdf(&self) -> bool {
        self.pdf_attachment.is_some()
    }
}
