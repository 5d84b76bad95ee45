use std::io;

use thiserror::Error;

/// Error type for single-column parsing failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    /// Id was not decimal, range (`a-b`), or null-index (`a.b`) shaped.
    #[error("incorrect token id: {0}")]
    MalformedId(String),
    /// Form column was empty.
    #[error("token form cannot be empty")]
    EmptyForm,
    /// Feats column did not tokenize as `key=value` groups.
    #[error("malformed feats '{field}': {source}")]
    MalformedFeats {
        /// Offending raw column value.
        field: String,
        /// Underlying tokenizer failure.
        #[source]
        source: Box<FieldError>,
    },
    /// Head column was neither absent nor a non-negative decimal integer.
    #[error("non-empty head must be a non-negative integer, not {0}")]
    MalformedHead(String),
    /// Deps column tokenized to an empty mapping.
    #[error("empty deps are not allowed: {0}")]
    EmptyDeps(String),
    /// A deps key was neither a decimal id nor a null index.
    #[error("deps head must be either decimal or null index (x.1), not {0}")]
    MalformedDepsHead(String),
    /// A non-empty joint field lacked its required inner separator.
    #[error("non-empty field '{field}' must contain '{separator}' separator")]
    MissingSeparator {
        /// Offending raw column value.
        field: String,
        /// The inner separator that was required.
        separator: char,
    },
    /// A joint field repeated a key across outer-separated groups.
    #[error("field '{field}' has duplicate key '{key}'")]
    DuplicateKey {
        /// Offending raw column value.
        field: String,
        /// The repeated key.
        key: String,
    },
}

/// Error type for token-level parsing and shape validation failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// A token line did not split into exactly the required column count.
    #[error("token line must have 12 tab-separated fields, found {0}")]
    FieldCountMismatch(usize),
    /// A null token violated its fixed shape.
    #[error("null token shape violation: {0}")]
    NullTokenShape(String),
    /// A range token violated its fixed shape.
    #[error("range token shape violation: {0}")]
    RangeTokenShape(String),
    /// A regular token referenced itself through head or deps.
    #[error("self-loop detected: {0}")]
    SelfLoop(String),
    /// A column failed to parse.
    #[error(transparent)]
    Field(#[from] FieldError),
}

/// A token failure annotated with the offending token id.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("validation failed on token {token_id}: {source}")]
pub struct TokenValidationError {
    /// Id of the failing token, or the raw first field when id parsing itself failed.
    pub token_id: String,
    /// The underlying token failure.
    #[source]
    pub source: TokenError,
}

/// Error type for sentence-level invariant violations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SentenceError {
    /// The sentence block contained no tokens.
    #[error("empty sentence")]
    EmptySentence,
    /// Parallel columns disagreed on token count.
    #[error("inconsistent token counts in sentence: {0}")]
    FieldLengthMismatch(String),
    /// Regular ids did not form a gap-free integer range.
    #[error("ids are not contiguous: {0:?}")]
    NonContiguousIds(Vec<u64>),
    /// A labeled sentence did not have exactly one root.
    #[error("there must be exactly one ROOT in a sentence, but found {0}")]
    RootCountViolation(usize),
    /// A head referenced an id no token carries.
    #[error("heads are inconsistent with sentence ids, excessive heads: {0:?}")]
    HeadReferentialIntegrity(Vec<u64>),
    /// A deps key referenced an id no token carries.
    #[error("deps heads are inconsistent with sentence ids, excessive heads: {0:?}")]
    DepsReferentialIntegrity(Vec<String>),
    /// A stored deps column could not be decoded back into a mapping.
    #[error("deps column is not canonically encoded: {0}")]
    MalformedDepsEncoding(String),
    /// A token inside the block failed to parse.
    #[error(transparent)]
    Token(#[from] TokenValidationError),
}

/// A sentence failure annotated with the block's `sent_id` (or `unknown`).
#[derive(Debug, Error, PartialEq, Eq)]
#[error("validation failed on sentence {sent_id}: {source}")]
pub struct SentenceValidationError {
    /// Sentence id from block metadata, or `unknown` when absent.
    pub sent_id: String,
    /// The underlying sentence failure.
    #[source]
    pub source: SentenceError,
}

/// Top-level error for corpus reading, splitting, and export operations.
#[derive(Debug, Error)]
pub enum CobaldError {
    /// A sentence block failed validation.
    #[error(transparent)]
    Sentence(#[from] SentenceValidationError),
    /// An underlying IO operation failed.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The requested train fraction was outside `(0, 1)`.
    #[error("train_fraction must be strictly between 0.0 and 1.0, got {0}")]
    InvalidFraction(f64),
    /// A serialized deps column could not be decoded during tag extraction.
    #[error("malformed deps encoding: {0}")]
    MalformedDepsEncoding(String),
    /// The caller supplied a configuration the splitter cannot satisfy.
    #[error("configuration error: {0}")]
    Configuration(String),
}
