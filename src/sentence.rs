//! Sentence records and cross-token invariant validation.
//!
//! A sentence is stored as equal-length parallel columns so it can flow
//! straight into flat columnar dataset builders; position `i` across all
//! columns refers to the same token.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::constants::fields::{ROOT_DEPS_KEY, ROOT_HEAD};
use crate::constants::reader::UNKNOWN_SENT_ID;
use crate::errors::{SentenceError, SentenceValidationError};
use crate::export::{decode_deps, encode_deps};
use crate::fields::is_decimal;
use crate::token::Token;

/// Metadata collected from `#` lines preceding a sentence block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SentenceMetadata {
    /// Sentence identifier from `# sent_id = ...`.
    pub sent_id: Option<String>,
    /// Raw sentence text from `# text = ...`.
    pub text: Option<String>,
}

/// A validated sentence: block metadata plus parallel annotation columns.
///
/// Constructed once from a contiguous run of token lines and immutable
/// afterwards. Serializes directly as the flat output record consumed by
/// downstream dataset builders.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    /// Sentence identifier, when the block carried one.
    pub sent_id: Option<String>,
    /// Raw sentence text, when the block carried one.
    pub text: Option<String>,
    /// Token ids in their surface form.
    pub ids: Vec<String>,
    /// Token forms.
    pub words: Vec<String>,
    /// Lemmas.
    pub lemmas: Vec<Option<String>>,
    /// Universal part-of-speech tags.
    pub upos: Vec<Option<String>>,
    /// Language-specific part-of-speech tags.
    pub xpos: Vec<Option<String>>,
    /// Morphological features, verbatim.
    pub feats: Vec<Option<String>>,
    /// Syntactic heads; `0` marks the root.
    pub heads: Vec<Option<u64>>,
    /// Dependency relations.
    pub deprels: Vec<Option<String>>,
    /// Enhanced dependencies, canonically JSON-encoded per token.
    pub deps: Vec<Option<String>>,
    /// Miscellaneous annotations.
    pub miscs: Vec<Option<String>>,
    /// Deep semantic slots.
    pub deepslots: Vec<Option<String>>,
    /// Semantic classes.
    pub semclasses: Vec<Option<String>>,
}

impl Sentence {
    /// Parse a block of token lines plus its metadata into a validated
    /// sentence.
    ///
    /// Tokens are parsed in order and the whole block is rejected on the
    /// first failure, so a malformed token can never yield a partially-valid
    /// sentence. Failures carry the block's `sent_id` (or `unknown`).
    pub fn parse(
        token_lines: &[String],
        metadata: SentenceMetadata,
    ) -> Result<Sentence, SentenceValidationError> {
        let sent_id = metadata
            .sent_id
            .clone()
            .unwrap_or_else(|| UNKNOWN_SENT_ID.to_string());
        Self::parse_inner(token_lines, metadata)
            .map_err(|source| SentenceValidationError { sent_id, source })
    }

    fn parse_inner(
        token_lines: &[String],
        metadata: SentenceMetadata,
    ) -> Result<Sentence, SentenceError> {
        let mut sentence = Sentence {
            sent_id: metadata.sent_id,
            text: metadata.text,
            ..Sentence::default()
        };
        for line in token_lines {
            let token = Token::parse(line)?;
            sentence.push_token(token);
        }
        sentence.validate()?;
        Ok(sentence)
    }

    fn push_token(&mut self, token: Token) {
        self.ids.push(token.id.as_str().to_string());
        self.words.push(token.word);
        self.lemmas.push(token.lemma);
        self.upos.push(token.upos);
        self.xpos.push(token.xpos);
        self.feats.push(token.feats);
        self.heads.push(token.head);
        self.deprels.push(token.deprel);
        self.deps.push(token.deps.as_ref().map(encode_deps));
        self.miscs.push(token.misc);
        self.deepslots.push(token.deepslot);
        self.semclasses.push(token.semclass);
    }

    /// Number of tokens in this sentence.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True when the sentence holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Run every sentence-level invariant check, failing fast in fixed
    /// order: non-empty, column lengths, id contiguity, unique root, head
    /// integrity, deps integrity.
    pub fn validate(&self) -> Result<(), SentenceError> {
        self.check_non_empty()?;
        self.check_column_lengths()?;
        self.check_contiguous_ids()?;
        self.check_unique_root()?;
        self.check_head_integrity()?;
        self.check_deps_integrity()
    }

    fn check_non_empty(&self) -> Result<(), SentenceError> {
        if self.is_empty() {
            return Err(SentenceError::EmptySentence);
        }
        Ok(())
    }

    fn check_column_lengths(&self) -> Result<(), SentenceError> {
        let expected = self.words.len();
        let columns = [
            ("ids", self.ids.len()),
            ("lemmas", self.lemmas.len()),
            ("upos", self.upos.len()),
            ("xpos", self.xpos.len()),
            ("feats", self.feats.len()),
            ("heads", self.heads.len()),
            ("deprels", self.deprels.len()),
            ("deps", self.deps.len()),
            ("miscs", self.miscs.len()),
            ("deepslots", self.deepslots.len()),
            ("semclasses", self.semclasses.len()),
        ];
        for (name, len) in columns {
            if len != expected {
                return Err(SentenceError::FieldLengthMismatch(format!(
                    "words({expected}) vs {name}({len})"
                )));
            }
        }
        Ok(())
    }

    fn regular_int_ids(&self) -> BTreeSet<u64> {
        self.ids
            .iter()
            .filter(|id| is_decimal(id))
            .filter_map(|id| id.parse().ok())
            .collect()
    }

    fn check_contiguous_ids(&self) -> Result<(), SentenceError> {
        let int_ids = self.regular_int_ids();
        let (Some(min), Some(max)) = (int_ids.first(), int_ids.last()) else {
            // Range and null tokens alone cannot anchor a sentence.
            return Err(SentenceError::NonContiguousIds(Vec::new()));
        };
        if int_ids.len() as u64 != max - min + 1 {
            return Err(SentenceError::NonContiguousIds(
                int_ids.into_iter().collect(),
            ));
        }
        Ok(())
    }

    fn check_unique_root(&self) -> Result<(), SentenceError> {
        let has_labels = self.heads.iter().any(Option::is_some);
        let roots = self
            .heads
            .iter()
            .filter(|head| **head == Some(ROOT_HEAD))
            .count();
        if has_labels && roots != 1 {
            return Err(SentenceError::RootCountViolation(roots));
        }
        Ok(())
    }

    fn check_head_integrity(&self) -> Result<(), SentenceError> {
        let int_ids = self.regular_int_ids();
        let excess: BTreeSet<u64> = self
            .heads
            .iter()
            .flatten()
            .copied()
            .filter(|head| *head != ROOT_HEAD && !int_ids.contains(head))
            .collect();
        if !excess.is_empty() {
            return Err(SentenceError::HeadReferentialIntegrity(
                excess.into_iter().collect(),
            ));
        }
        Ok(())
    }

    fn check_deps_integrity(&self) -> Result<(), SentenceError> {
        let id_strings: BTreeSet<&str> = self.ids.iter().map(String::as_str).collect();
        let mut excess = BTreeSet::new();
        for encoded in self.deps.iter().flatten() {
            let deps = decode_deps(encoded)
                .map_err(|err| SentenceError::MalformedDepsEncoding(err.to_string()))?;
            for head in deps.keys() {
                if head != ROOT_DEPS_KEY && !id_strings.contains(head.as_str()) {
                    excess.insert(head.clone());
                }
            }
        }
        if !excess.is_empty() {
            return Err(SentenceError::DepsReferentialIntegrity(
                excess.into_iter().collect(),
            ));
        }
        Ok(())
    }
}
