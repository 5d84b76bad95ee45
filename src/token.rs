//! Token-line parsing and per-shape validation.

use crate::constants::fields::{NULL_FORM, NULL_MISC, NUM_FIELDS, PLACEHOLDER};
use crate::errors::{TokenError, TokenValidationError};
use crate::fields::{
    parse_deps, parse_feats, parse_head, parse_nullable, parse_word, IdKind, TokenId,
};
use crate::types::DepsMap;

/// One parsed and shape-validated annotation row.
///
/// Constructed once from a single input line and never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// Token identifier (regular, range, or null shape).
    pub id: TokenId,
    /// Surface form; the literal `#NULL` for null tokens.
    pub word: String,
    /// Lemma. Only the empty string maps to absent here, so range tokens
    /// can carry (and be checked for) a literal `_`.
    pub lemma: Option<String>,
    /// Universal part-of-speech tag.
    pub upos: Option<String>,
    /// Language-specific part-of-speech tag.
    pub xpos: Option<String>,
    /// Morphological features, validated and kept verbatim.
    pub feats: Option<String>,
    /// Syntactic head; `0` marks the root.
    pub head: Option<u64>,
    /// Dependency relation to the head.
    pub deprel: Option<String>,
    /// Enhanced-dependency mapping from head reference to relation label.
    pub deps: Option<DepsMap>,
    /// Miscellaneous annotations.
    pub misc: Option<String>,
    /// Deep semantic slot.
    pub deepslot: Option<String>,
    /// Semantic class.
    pub semclass: Option<String>,
}

impl Token {
    /// Parse and validate one tab-separated token line.
    ///
    /// Any failure is wrapped with the offending token id (or the raw first
    /// field when id parsing itself failed).
    pub fn parse(line: &str) -> Result<Token, TokenValidationError> {
        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
        let raw_id = fields.first().copied().unwrap_or("").to_string();
        Self::parse_fields(&fields).map_err(|source| TokenValidationError {
            token_id: raw_id,
            source,
        })
    }

    fn parse_fields(fields: &[&str]) -> Result<Token, TokenError> {
        if fields.len() != NUM_FIELDS {
            return Err(TokenError::FieldCountMismatch(fields.len()));
        }
        let token = Token {
            id: TokenId::parse(fields[0])?,
            word: parse_word(fields[1])?,
            lemma: if fields[2].is_empty() {
                None
            } else {
                Some(fields[2].to_string())
            },
            upos: parse_nullable(fields[3]),
            xpos: parse_nullable(fields[4]),
            feats: parse_feats(fields[5])?,
            head: parse_head(fields[6])?,
            deprel: parse_nullable(fields[7]),
            deps: parse_deps(fields[8])?,
            misc: parse_nullable(fields[9]),
            deepslot: parse_nullable(fields[10]),
            semclass: parse_nullable(fields[11]),
        };
        token.validate_shape()?;
        Ok(token)
    }

    fn validate_shape(&self) -> Result<(), TokenError> {
        match self.id.kind() {
            IdKind::Regular(_) => self.validate_regular(),
            IdKind::Range(_, _) => self.validate_range(),
            IdKind::Null(_, _) => self.validate_null(),
        }
    }

    fn validate_regular(&self) -> Result<(), TokenError> {
        if let (Some(id), Some(head)) = (self.id.as_regular(), self.head) {
            if head == id {
                return Err(TokenError::SelfLoop(format!(
                    "head {head} equals token id"
                )));
            }
        }
        if let Some(deps) = &self.deps {
            for head in deps.keys() {
                if head == self.id.as_str() {
                    return Err(TokenError::SelfLoop(format!(
                        "deps head {head} equals token id"
                    )));
                }
            }
        }
        Ok(())
    }

    fn validate_range(&self) -> Result<(), TokenError> {
        if self.lemma.as_deref() != Some(PLACEHOLDER) {
            return Err(TokenError::RangeTokenShape(format!(
                "lemma must be '{PLACEHOLDER}', found {:?}",
                self.lemma
            )));
        }
        let required_absent = [
            ("upos", self.upos.is_none()),
            ("xpos", self.xpos.is_none()),
            ("feats", self.feats.is_none()),
            ("head", self.head.is_none()),
            ("deprel", self.deprel.is_none()),
            ("deps", self.deps.is_none()),
            ("misc", self.misc.is_none()),
            ("deepslot", self.deepslot.is_none()),
            ("semclass", self.semclass.is_none()),
        ];
        for (name, absent) in required_absent {
            if !absent {
                return Err(TokenError::RangeTokenShape(format!(
                    "{name} must be absent"
                )));
            }
        }
        Ok(())
    }

    fn validate_null(&self) -> Result<(), TokenError> {
        if self.word != NULL_FORM {
            return Err(TokenError::NullTokenShape(format!(
                "form must be {NULL_FORM}, not '{}'",
                self.word
            )));
        }
        if self.head.is_some() {
            return Err(TokenError::NullTokenShape("head must be absent".into()));
        }
        if self.deprel.is_some() {
            return Err(TokenError::NullTokenShape("deprel must be absent".into()));
        }
        if self.misc.as_deref() != Some(NULL_MISC) {
            return Err(TokenError::NullTokenShape(format!(
                "misc must be '{NULL_MISC}', not {:?}",
                self.misc
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FieldError;

    fn line(fields: [&str; 12]) -> String {
        fields.join("\t")
    }

    #[test]
    fn regular_token_parses_all_columns() {
        let token = Token::parse(&line([
            "2",
            "cats",
            "cat",
            "NOUN",
            "NN",
            "Number=Plur",
            "1",
            "nsubj",
            "1:nsubj",
            "SpaceAfter=No",
            "Agent",
            "ANIMAL",
        ]))
        .unwrap();
        assert_eq!(token.id.as_regular(), Some(2));
        assert_eq!(token.word, "cats");
        assert_eq!(token.head, Some(1));
        assert_eq!(token.feats.as_deref(), Some("Number=Plur"));
        assert_eq!(
            token.deps.as_ref().and_then(|d| d.get("1")).map(String::as_str),
            Some("nsubj")
        );
        assert_eq!(token.semclass.as_deref(), Some("ANIMAL"));
    }

    #[test]
    fn wrong_field_count_is_rejected() {
        let err = Token::parse("1\tword\tlemma").unwrap_err();
        assert_eq!(err.token_id, "1");
        assert!(matches!(err.source, TokenError::FieldCountMismatch(3)));
    }

    #[test]
    fn malformed_id_reports_raw_first_field() {
        let err = Token::parse(&line([
            "x1", "word", "_", "_", "_", "_", "_", "_", "_", "_", "_", "_",
        ]))
        .unwrap_err();
        assert_eq!(err.token_id, "x1");
        assert!(matches!(
            err.source,
            TokenError::Field(FieldError::MalformedId(_))
        ));
    }

    #[test]
    fn self_loop_in_head_is_rejected() {
        let err = Token::parse(&line([
            "3", "word", "word", "VERB", "_", "_", "3", "conj", "_", "_", "_", "_",
        ]))
        .unwrap_err();
        assert!(matches!(err.source, TokenError::SelfLoop(_)));
    }

    #[test]
    fn self_loop_in_deps_is_rejected() {
        let err = Token::parse(&line([
            "3", "word", "word", "VERB", "_", "_", "1", "conj", "3:conj", "_", "_", "_",
        ]))
        .unwrap_err();
        assert!(matches!(err.source, TokenError::SelfLoop(_)));
    }

    #[test]
    fn range_token_requires_placeholder_lemma_and_absent_fields() {
        let ok = Token::parse(&line([
            "1-2", "don't", "_", "_", "_", "_", "_", "_", "_", "_", "_", "_",
        ]))
        .unwrap();
        assert_eq!(ok.id.kind(), crate::fields::IdKind::Range(1, 2));
        assert_eq!(ok.lemma.as_deref(), Some("_"));

        let err = Token::parse(&line([
            "1-2", "don't", "_", "VERB", "_", "_", "_", "_", "_", "_", "_", "_",
        ]))
        .unwrap_err();
        assert!(matches!(err.source, TokenError::RangeTokenShape(_)));

        let err = Token::parse(&line([
            "1-2", "don't", "", "_", "_", "_", "_", "_", "_", "_", "_", "_",
        ]))
        .unwrap_err();
        assert!(matches!(err.source, TokenError::RangeTokenShape(_)));
    }

    #[test]
    fn null_token_shape_is_enforced() {
        let ok = Token::parse(&line([
            "2.1",
            "#NULL",
            "be",
            "AUX",
            "_",
            "_",
            "_",
            "_",
            "2:conj",
            "ellipsis",
            "_",
            "_",
        ]))
        .unwrap();
        assert_eq!(ok.word, "#NULL");

        let err = Token::parse(&line([
            "2.1", "word", "be", "AUX", "_", "_", "_", "_", "_", "ellipsis", "_", "_",
        ]))
        .unwrap_err();
        assert!(matches!(err.source, TokenError::NullTokenShape(_)));

        let err = Token::parse(&line([
            "2.1", "#NULL", "be", "AUX", "_", "_", "2", "_", "_", "ellipsis", "_", "_",
        ]))
        .unwrap_err();
        assert!(matches!(err.source, TokenError::NullTokenShape(_)));

        let err = Token::parse(&line([
            "2.1", "#NULL", "be", "AUX", "_", "_", "_", "_", "_", "_", "_", "_",
        ]))
        .unwrap_err();
        assert!(matches!(err.source, TokenError::NullTokenShape(_)));
    }
}
