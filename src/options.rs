//! Processing policy flags governing content fetches.
//!
//! The four flags are independent and compose: URL fetching can be forced
//! always, used only as a fallback when an item has no PDF attachment, or
//! skipped entirely; PDF parsing is opt-in; the vocabulary file is optional.

use std::path::PathBuf;

/// Immutable per-run processing policy, owned by the tagger for its whole run.
#[derive(Debug, Clone, Default)]
pub struct ProcessingOptions {
    /// Fetch the item URL only when the item has no PDF attachment.
    pub url_fallback: bool,
    /// Always fetch the item URL, PDF or not.
    pub url_always: bool,
    /// Download and parse PDF attachments.
    pub parse_pdf: bool,
    /// Optional path to the persisted tag vocabulary file.
    pub tags_file: Option<PathBuf>,
}

impl ProcessingOptions {
    /// Returns true when the webpage of an item should be fetched.
    ///
    /// Policy: `url_always` wins unconditionally; otherwise `url_fallback`
    /// applies only to items without a PDF attachment. When neither flag is
    /// set no network call is made at all.
    #[must_use]
    pub fn should_fetch_url(&self, has_pdf: bool) -> bool {
        self.url_always || (self.url_fallback && !has_pdf)
    }
}
