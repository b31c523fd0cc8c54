//! PDF excerpt extraction using the `pdf-extract` crate.
//!
//! `pdf-extract` returns all pages as one string; pages are recovered from
//! the form feed characters it inserts between them, with a triple-newline
//! split as the fallback for texts without form feeds.

use super::error::ExtractError;

/// Extracts text from PDF bytes, keeping at most the first `max_pages` pages.
///
/// Page text is trimmed and joined with newlines; empty pages are dropped.
///
/// # Errors
///
/// Returns [`ExtractError::Pdf`] when the bytes do not parse as a PDF or
/// text extraction fails.
pub(crate) fn text_from_pdf_bytes(data: &[u8], max_pages: usize) -> Result<String, ExtractError> {
    let text = pdf_extract::extract_text_from_mem(data).map_err(|e| ExtractError::pdf(e.to_string()))?;

    // Form feeds (\x0C) are the page separators pdf-extract inserts.
    let pages: Vec<&str> = if text.contains('\x0C') {
        text.split('\x0C').collect()
    } else {
        text.split("\n\n\n").collect()
    };

    let excerpt = pages
        .iter()
        .take(max_pages)
        .map(|page| page.trim())
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    Ok(excerpt)
}
