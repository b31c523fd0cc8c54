//! Zotag Core Library
//!
//! This library provides the core functionality for the zotag tool, which
//! enriches Zotero library items with descriptive tags suggested by a
//! language model, constrained against a growing controlled vocabulary.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`config`] - Environment-based credential configuration
//! - [`options`] - Processing policy flags (URL/PDF fetch behavior)
//! - [`catalog`] - Zotero Web API client
//! - [`llm`] - Anthropic Messages API client
//! - [`extract`] - Webpage and PDF excerpt extraction
//! - [`vocab`] - Persistent tag vocabulary store
//! - [`tagger`] - Per-item suggestion pipeline and library walker

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod config;
pub mod extract;
pub mod llm;
pub mod options;
pub mod tagger;
mod user_agent;
pub mod vocab;

// Re-export commonly used types
pub use catalog::{CatalogError, Item, ItemData, Tag, ZoteroClient};
pub use config::{Config, ConfigError};
pub use extract::{ContentExtractor, EXCERPT_WORD_CAP, truncate_words};
pub use llm::{AnthropicClient, LlmError};
pub use options::ProcessingOptions;
pub use tagger::{ItemMetadata, RunStats, Tagger};
pub use vocab::{TagVocabulary, VocabError};
