//! Prompt construction and response parsing for tag suggestion.
//!
//! Two prompt variants share the same constraints (3-5 tags, no generic
//! ML/CS tags, Capital Case With Spaces, reuse the existing vocabulary
//! where a concept matches); the title-only variant additionally instructs
//! conservative tagging, since a title alone is thin evidence.

/// Fixed system instruction for every suggestion call.
pub(crate) const SYSTEM_PROMPT: &str = "You are a helpful academic librarian who creates \
    consistent, descriptive tags for academic papers, reports, and blog posts.";

/// Builds the user prompt from the available content parts and the current
/// vocabulary (rendered sorted, for consistency guidance).
///
/// The title-only variant is used when the title is the sole available
/// content part; any second part switches to the multi-field variant.
pub(crate) fn build_prompt(parts: &[String], vocabulary: &[&str]) -> String {
    let vocabulary_list = format!("{vocabulary:?}");
    let title_only = parts.len() == 1 && parts[0].starts_with("Title:");

    if title_only {
        format!(
            "Please suggest 3-5 relevant tags for this document based only on its title.\n\
             Apply suitable tags from this existing set: {vocabulary_list}\n\
             Create new tags if one of the central concepts from the paper is not among the \
             existing tags. The document is already from an AI/ML collection, so refrain from \
             setting generic tags like 'Machine Learning' or 'Computer Science'.\n\
             Tags should be in Capital Case with spaces as separators \
             (e.g., LLM Jailbreaking, Protein Design, ...)\n\
             Be conservative with tag suggestions when working with title only.\n\
             \n\
             {}\n\
             \n\
             Please respond with ONLY the tags, one per line, nothing else.",
            parts[0]
        )
    } else {
        format!(
            "Please analyze this document and suggest 3-5 relevant tags.\n\
             Apply suitable tags from this existing set: {vocabulary_list}\n\
             Create new tags if one of the central concepts from the paper is not among the \
             existing tags. The document is already from an AI/ML collection, so refrain from \
             setting generic tags like 'Machine Learning' or 'Computer Science'.\n\
             Tags should be in Capital Case with spaces as separators \
             (e.g., LLM Jailbreaking, Protein Design, ...)\n\
             \n\
             {}\n\
             \n\
             Please respond with ONLY the tags, one per line, nothing else.",
            parts.join("\n")
        )
    }
}

/// Parses a model response into candidate tags: one per line, trimmed,
/// empty lines dropped, order preserved. 3-5 tags are expected but not
/// enforced.
pub(crate) fn parse_tags(response: &str) -> Vec<String> {
    response
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect()
}
