//! Shared User-Agent strings for API and webpage HTTP clients.
//!
//! Single source for the UA formats so API traffic identifies the tool
//! (good citizenship; RFC 9308) while webpage fetches present a browser-like
//! UA, matching what content sites expect from a reader.

/// Project URL for User-Agent identification (good citizenship; RFC 9308).
const PROJECT_UA_URL: &str = "https://github.com/nicksrandall/Zotag";

/// Browser-like User-Agent used for webpage content fetches.
///
/// Content sites frequently serve reduced or blocked pages to unknown
/// agents; a mainstream browser string keeps extraction best-effort useful.
pub(crate) const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Default User-Agent for catalog and language-model API requests.
#[must_use]
pub(crate) fn default_api_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("zotag/{version} (academic-tagging-tool; +{PROJECT_UA_URL})")
}
