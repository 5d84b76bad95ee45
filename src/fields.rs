//! Pure, stateless parsers for individual token-line columns.
//!
//! Each parser is total: it returns a value or an explicit [`FieldError`],
//! never silently dropping data. The only implicit normalization is the
//! `_`/empty-to-absent mapping that is part of the format's contract.

use std::fmt;

use crate::constants::fields::{DEPS_INNER_SEP, FEATS_INNER_SEP, OUTER_SEP, PLACEHOLDER};
use crate::errors::FieldError;
use crate::types::DepsMap;

/// True when `text` is a non-empty run of ASCII digits.
pub(crate) fn is_decimal(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|byte| byte.is_ascii_digit())
}

/// True when `text` has the null-index shape `a.b` with decimal `a` and `b`.
pub fn is_null_index(text: &str) -> bool {
    matches!(text.split_once('.'), Some((major, minor)) if is_decimal(major) && is_decimal(minor))
}

/// True when `text` has the range shape `a-b` with decimal `a` and `b`.
pub fn is_range_index(text: &str) -> bool {
    matches!(text.split_once('-'), Some((start, end)) if is_decimal(start) && is_decimal(end))
}

/// Shape of a parsed token id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdKind {
    /// Plain decimal id of an ordinary word.
    Regular(u64),
    /// Multi-word span `a-b` (e.g. a contraction).
    Range(u64, u64),
    /// Elided-token index `a.b`.
    Null(u64, u64),
}

/// A token identifier in one of the three shapes the format allows.
///
/// The surface string is kept verbatim so referential-integrity checks can
/// compare exact forms (a deps key `18.01` does not match an id `18.1`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenId {
    raw: String,
    kind: IdKind,
}

impl TokenId {
    /// Parse an id column value, rejecting anything outside the three shapes.
    pub fn parse(field: &str) -> Result<Self, FieldError> {
        let malformed = || FieldError::MalformedId(field.to_string());
        let kind = if is_decimal(field) {
            IdKind::Regular(field.parse().map_err(|_| malformed())?)
        } else if is_range_index(field) {
            let (start, end) = field.split_once('-').ok_or_else(malformed)?;
            IdKind::Range(
                start.parse().map_err(|_| malformed())?,
                end.parse().map_err(|_| malformed())?,
            )
        } else if is_null_index(field) {
            let (major, minor) = field.split_once('.').ok_or_else(malformed)?;
            IdKind::Null(
                major.parse().map_err(|_| malformed())?,
                minor.parse().map_err(|_| malformed())?,
            )
        } else {
            return Err(malformed());
        };
        Ok(Self {
            raw: field.to_string(),
            kind,
        })
    }

    /// The id exactly as it appeared in the input.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed shape of this id.
    pub fn kind(&self) -> IdKind {
        self.kind
    }

    /// The integer value of a regular id, if this id is regular.
    pub fn as_regular(&self) -> Option<u64> {
        match self.kind {
            IdKind::Regular(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Parse the form column; empty forms are rejected.
pub fn parse_word(field: &str) -> Result<String, FieldError> {
    if field.is_empty() {
        return Err(FieldError::EmptyForm);
    }
    Ok(field.to_string())
}

/// Map `""`/`"_"` to absent and pass any other value through verbatim.
pub fn parse_nullable(field: &str) -> Option<String> {
    if field.is_empty() || field == PLACEHOLDER {
        None
    } else {
        Some(field.to_string())
    }
}

/// Tokenize a two-separator field into a mapping.
///
/// Splits on `outer_sep`, then on the first `inner_sep` of each group so
/// values may themselves contain the inner separator (`18.1:advcl:while`).
pub fn parse_joint_field(
    field: &str,
    inner_sep: char,
    outer_sep: char,
) -> Result<DepsMap, FieldError> {
    if !field.contains(inner_sep) {
        return Err(FieldError::MissingSeparator {
            field: field.to_string(),
            separator: inner_sep,
        });
    }
    let mut pairs = DepsMap::new();
    for group in field.split(outer_sep) {
        let (key, value) = group
            .split_once(inner_sep)
            .ok_or_else(|| FieldError::MissingSeparator {
                field: field.to_string(),
                separator: inner_sep,
            })?;
        if pairs.contains_key(key) {
            return Err(FieldError::DuplicateKey {
                field: field.to_string(),
                key: key.to_string(),
            });
        }
        pairs.insert(key.to_string(), value.to_string());
    }
    Ok(pairs)
}

/// Parse the feats column: absent on `""`/`"_"`, otherwise validated and
/// returned verbatim.
pub fn parse_feats(field: &str) -> Result<Option<String>, FieldError> {
    if field.is_empty() || field == PLACEHOLDER {
        return Ok(None);
    }
    parse_joint_field(field, FEATS_INNER_SEP, OUTER_SEP).map_err(|source| {
        FieldError::MalformedFeats {
            field: field.to_string(),
            source: Box::new(source),
        }
    })?;
    Ok(Some(field.to_string()))
}

/// Parse the head column: absent on `""`/`"_"`, otherwise a non-negative
/// decimal integer.
pub fn parse_head(field: &str) -> Result<Option<u64>, FieldError> {
    if field.is_empty() || field == PLACEHOLDER {
        return Ok(None);
    }
    if !is_decimal(field) {
        return Err(FieldError::MalformedHead(field.to_string()));
    }
    field
        .parse()
        .map(Some)
        .map_err(|_| FieldError::MalformedHead(field.to_string()))
}

/// Parse the deps column: absent on `""`/`"_"`, otherwise a non-empty
/// mapping from decimal or null-index head references to relation labels.
pub fn parse_deps(field: &str) -> Result<Option<DepsMap>, FieldError> {
    if field.is_empty() || field == PLACEHOLDER {
        return Ok(None);
    }
    let deps = parse_joint_field(field, DEPS_INNER_SEP, OUTER_SEP)?;
    if deps.is_empty() {
        return Err(FieldError::EmptyDeps(field.to_string()));
    }
    for head in deps.keys() {
        if !is_decimal(head) && !is_null_index(head) {
            return Err(FieldError::MalformedDepsHead(head.to_string()));
        }
    }
    Ok(Some(deps))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_id_accepts_all_three_shapes() {
        assert_eq!(TokenId::parse("7").unwrap().kind(), IdKind::Regular(7));
        assert_eq!(TokenId::parse("3-5").unwrap().kind(), IdKind::Range(3, 5));
        assert_eq!(TokenId::parse("18.1").unwrap().kind(), IdKind::Null(18, 1));
        assert_eq!(TokenId::parse("18.1").unwrap().as_str(), "18.1");
    }

    #[test]
    fn token_id_rejects_other_shapes() {
        for bad in ["", "x", "-1", "1-", "1.2.3", "1,2", "a-b", "3.x"] {
            assert!(
                matches!(TokenId::parse(bad), Err(FieldError::MalformedId(_))),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn parse_word_rejects_empty_forms() {
        assert_eq!(parse_word("cat").unwrap(), "cat");
        assert!(matches!(parse_word(""), Err(FieldError::EmptyForm)));
    }

    #[test]
    fn parse_nullable_maps_placeholders_to_absent() {
        assert_eq!(parse_nullable(""), None);
        assert_eq!(parse_nullable("_"), None);
        assert_eq!(parse_nullable("NOUN"), Some("NOUN".to_string()));
    }

    #[test]
    fn joint_field_splits_on_first_inner_separator_only() {
        let deps = parse_joint_field("26:conj|18.1:advcl:while", ':', '|').unwrap();
        assert_eq!(deps.get("26").map(String::as_str), Some("conj"));
        assert_eq!(deps.get("18.1").map(String::as_str), Some("advcl:while"));
    }

    #[test]
    fn joint_field_rejects_missing_separator_and_duplicate_keys() {
        assert!(matches!(
            parse_joint_field("NumberSing", '=', '|'),
            Err(FieldError::MissingSeparator { separator: '=', .. })
        ));
        assert!(matches!(
            parse_joint_field("a=1|b", '=', '|'),
            Err(FieldError::MissingSeparator { .. })
        ));
        assert!(matches!(
            parse_joint_field("a=1|a=2", '=', '|'),
            Err(FieldError::DuplicateKey { ref key, .. }) if key == "a"
        ));
    }

    #[test]
    fn parse_feats_returns_validated_input_verbatim() {
        assert_eq!(parse_feats("").unwrap(), None);
        assert_eq!(parse_feats("_").unwrap(), None);
        let raw = "Mood=Ind|Number=Sing|Person=3";
        assert_eq!(parse_feats(raw).unwrap().as_deref(), Some(raw));
    }

    #[test]
    fn parse_feats_wraps_tokenizer_failures() {
        assert!(matches!(
            parse_feats("Mood"),
            Err(FieldError::MalformedFeats { .. })
        ));
        assert!(matches!(
            parse_feats("Mood=Ind|Mood=Sub"),
            Err(FieldError::MalformedFeats { .. })
        ));
    }

    #[test]
    fn parse_head_accepts_root_and_rejects_non_decimals() {
        assert_eq!(parse_head("_").unwrap(), None);
        assert_eq!(parse_head("0").unwrap(), Some(0));
        assert_eq!(parse_head("12").unwrap(), Some(12));
        assert!(matches!(parse_head("-1"), Err(FieldError::MalformedHead(_))));
        assert!(matches!(
            parse_head("1.5"),
            Err(FieldError::MalformedHead(_))
        ));
    }

    #[test]
    fn parse_deps_validates_head_shapes() {
        let deps = parse_deps("0:root").unwrap().unwrap();
        assert_eq!(deps.get("0").map(String::as_str), Some("root"));

        assert_eq!(parse_deps("_").unwrap(), None);
        assert!(matches!(
            parse_deps("x:conj"),
            Err(FieldError::MalformedDepsHead(ref head)) if head == "x"
        ));
    }
}
