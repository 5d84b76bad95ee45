#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Centralized constants used across parsing, reading, splitting, and export.
pub mod constants;
mod errors;
/// Output-record serialization and JSON-lines export.
pub mod export;
/// Column-level field parsers.
pub mod fields;
/// Streaming sentence reader.
pub mod reader;
/// Sentence records and sentence-level validation.
pub mod sentence;
/// Stratified train/test splitting.
pub mod splitter;
/// Token records and token-level shape validation.
pub mod token;
/// Shared type aliases.
pub mod types;

pub use errors::{
    CobaldError, FieldError, SentenceError, SentenceValidationError, TokenError,
    TokenValidationError,
};
pub use fields::{IdKind, TokenId};
pub use reader::{read_sentences, SentenceReader};
pub use sentence::{Sentence, SentenceMetadata};
pub use splitter::{build_min_coverage, train_test_split, TagCategory};
pub use token::Token;
pub use types::{DepsMap, RelationLabel, Tag};
