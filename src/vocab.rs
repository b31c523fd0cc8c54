//! Persistent tag vocabulary store.
//!
//! The vocabulary is a case-sensitive set of tag strings that grows
//! monotonically within a run; tags are added, never pruned. When a backing
//! file is configured the set is saved after every change, one tag per line,
//! sorted, so the file on disk is always a superset of every tag suggested
//! so far. Last writer wins; concurrent runs are not coordinated.

use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

/// Errors raised by vocabulary file I/O.
#[derive(Debug, Error)]
pub enum VocabError {
    /// Reading or writing the backing file failed.
    #[error("vocabulary file error at {path}: {source}")]
    Io {
        /// Path of the backing file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl VocabError {
    fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// In-memory tag set with optional file persistence.
///
/// `BTreeSet` keeps iteration sorted, which gives both a deterministic
/// prompt rendering and a sorted file on save.
#[derive(Debug, Default)]
pub struct TagVocabulary {
    tags: BTreeSet<String>,
    path: Option<PathBuf>,
}

impl TagVocabulary {
    /// Creates an empty vocabulary with no backing file.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Loads the vocabulary from `path`, or starts empty when the file does
    /// not exist yet. Blank lines are ignored; surrounding whitespace is
    /// trimmed. The path is remembered for subsequent saves.
    ///
    /// # Errors
    ///
    /// Returns [`VocabError::Io`] when the file exists but cannot be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, VocabError> {
        let path = path.as_ref();
        let tags = if path.exists() {
            let text = std::fs::read_to_string(path).map_err(|e| VocabError::io(path, e))?;
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(ToString::to_string)
                .collect()
        } else {
            BTreeSet::new()
        };

        info!(count = tags.len(), path = %path.display(), "Loaded tag vocabulary");
        Ok(Self {
            tags,
            path: Some(path.to_path_buf()),
        })
    }

    /// Number of distinct tags currently known.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns true when no tags are known yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Case-sensitive membership test.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Sorted view of all known tags.
    #[must_use]
    pub fn sorted(&self) -> Vec<&str> {
        self.tags.iter().map(String::as_str).collect()
    }

    /// Unions non-empty candidate tags into the set.
    ///
    /// Returns how many were actually new. Matching is case-sensitive by
    /// design: "llm" and "LLM" are distinct entries, mirroring how the
    /// catalog itself treats tag strings.
    pub fn absorb<I, S>(&mut self, candidates: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let before = self.tags.len();
        for candidate in candidates {
            let tag = candidate.as_ref().trim();
            if !tag.is_empty() {
                self.tags.insert(tag.to_string());
            }
        }
        self.tags.len() - before
    }

    /// Writes the vocabulary to its backing file, one tag per line, sorted.
    ///
    /// A no-op when no path is configured.
    ///
    /// # Errors
    ///
    /// Returns [`VocabError::Io`] when the file cannot be written.
    pub fn save(&self) -> Result<(), VocabError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let mut file = std::fs::File::create(path).map_err(|e| VocabError::io(path, e))?;
        for tag in &self.tags {
            writeln!(file, "{tag}").map_err(|e| VocabError::io(path, e))?;
        }
        info!(count = self.tags.len(), path = %path.display(), "Saved tag vocabulary");
        Ok(())
    }
}
