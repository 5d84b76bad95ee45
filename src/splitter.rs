//! Stratified train/test splitting with per-category tag coverage.
//!
//! The splitter repeatedly extracts a greedy minimum covering subset (an
//! approximate hitting set over rarest tags) and alternates the covers
//! between the train and test pools, so every tag value whose frequency
//! allows it appears on both sides of the partition.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use tracing::info;

use crate::constants::splitter::FRACTION_TOLERANCE;
use crate::errors::CobaldError;
use crate::export::decode_deps;
use crate::sentence::Sentence;
use crate::types::Tag;

/// A stratification axis: one annotation column, or the relation labels of
/// the deps column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagCategory {
    /// Universal part-of-speech tags.
    Upos,
    /// Language-specific part-of-speech tags.
    Xpos,
    /// Morphological feature bundles (verbatim strings).
    Feats,
    /// Dependency relations.
    Deprels,
    /// Enhanced-dependency relation labels (mapping values, not heads).
    Deps,
    /// Miscellaneous annotations.
    Miscs,
    /// Deep semantic slots.
    Deepslots,
    /// Semantic classes.
    Semclasses,
}

impl TagCategory {
    /// Every category, in canonical iteration order.
    pub const ALL: [TagCategory; 8] = [
        TagCategory::Upos,
        TagCategory::Xpos,
        TagCategory::Feats,
        TagCategory::Deprels,
        TagCategory::Deps,
        TagCategory::Miscs,
        TagCategory::Deepslots,
        TagCategory::Semclasses,
    ];

    /// Canonical column name for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            TagCategory::Upos => "upos",
            TagCategory::Xpos => "xpos",
            TagCategory::Feats => "feats",
            TagCategory::Deprels => "deprels",
            TagCategory::Deps => "deps",
            TagCategory::Miscs => "miscs",
            TagCategory::Deepslots => "deepslots",
            TagCategory::Semclasses => "semclasses",
        }
    }

    /// The plain annotation column for this category, or `None` for the
    /// deps category whose tag universe is derived instead of read off.
    fn column<'a>(&self, sentence: &'a Sentence) -> Option<&'a [Option<String>]> {
        match self {
            TagCategory::Upos => Some(&sentence.upos),
            TagCategory::Xpos => Some(&sentence.xpos),
            TagCategory::Feats => Some(&sentence.feats),
            TagCategory::Deprels => Some(&sentence.deprels),
            TagCategory::Deps => None,
            TagCategory::Miscs => Some(&sentence.miscs),
            TagCategory::Deepslots => Some(&sentence.deepslots),
            TagCategory::Semclasses => Some(&sentence.semclasses),
        }
    }
}

impl fmt::Display for TagCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TagCategory {
    type Err = CobaldError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        TagCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == name)
            .ok_or_else(|| {
                CobaldError::Configuration(format!("unknown tag category '{name}'"))
            })
    }
}

/// Distinct tag values a sentence contributes to `category`.
///
/// Absent values are discarded. For the deps category the tags are the
/// relation labels (mapping values) across all tokens.
pub fn sentence_tagset(
    sentence: &Sentence,
    category: TagCategory,
) -> Result<BTreeSet<Tag>, CobaldError> {
    let mut tags = BTreeSet::new();
    match category.column(sentence) {
        Some(column) => tags.extend(column.iter().flatten().cloned()),
        None => {
            for encoded in sentence.deps.iter().flatten() {
                let deps = decode_deps(encoded)
                    .map_err(|err| CobaldError::MalformedDepsEncoding(err.to_string()))?;
                tags.extend(deps.values().cloned());
            }
        }
    }
    Ok(tags)
}

/// Greedy minimum covering pass.
///
/// Returns positions of a subset of `sentences` whose union of tags covers
/// every tag value occurring in any of `categories`. Greedy on the globally
/// rarest remaining tag; ties break by category order then sorted tag
/// order, and the lowest covering position is chosen, so the pass is
/// deterministic across runs and platforms.
pub fn build_min_coverage(
    sentences: &[Sentence],
    categories: &[TagCategory],
) -> Result<BTreeSet<usize>, CobaldError> {
    let mut per_sentence: Vec<Vec<BTreeSet<Tag>>> = Vec::with_capacity(sentences.len());
    for sentence in sentences {
        let mut sets = Vec::with_capacity(categories.len());
        for category in categories {
            sets.push(sentence_tagset(sentence, *category)?);
        }
        per_sentence.push(sets);
    }

    // One reverse index per category: tag -> positions of covering sentences.
    let mut inverse: Vec<BTreeMap<Tag, BTreeSet<usize>>> = vec![BTreeMap::new(); categories.len()];
    for (position, sets) in per_sentence.iter().enumerate() {
        for (slot, tags) in sets.iter().enumerate() {
            for tag in tags {
                inverse[slot]
                    .entry(tag.clone())
                    .or_default()
                    .insert(position);
            }
        }
    }

    let mut cover = BTreeSet::new();
    loop {
        let mut rarest: Option<(usize, Tag, usize)> = None;
        for (slot, index) in inverse.iter().enumerate() {
            for (tag, positions) in index {
                let is_rarer = match &rarest {
                    None => true,
                    Some((_, _, best)) => positions.len() < *best,
                };
                if is_rarer {
                    rarest = Some((slot, tag.clone(), positions.len()));
                }
            }
        }
        let Some((slot, tag, _)) = rarest else {
            break;
        };
        let positions = inverse[slot].remove(&tag).unwrap_or_default();
        let Some(chosen) = positions.first().copied() else {
            continue;
        };
        cover.insert(chosen);
        // The chosen sentence also covers every other tag it carries.
        for index in &mut inverse {
            index.retain(|_, positions| !positions.contains(&chosen));
        }
    }
    Ok(cover)
}

/// Partition `sentences` into (train, test) with stratified tag coverage.
///
/// Alternates minimum covering passes between the two sides until either
/// reaches its target size, then bulk-moves the remainder to the other
/// side. Fails with [`CobaldError::InvalidFraction`] when `train_fraction`
/// is not strictly between 0 and 1, and with a configuration error when the
/// realized fraction cannot land within the tolerance (for example a
/// fraction too extreme relative to the minimum coverage sizes).
pub fn train_test_split(
    sentences: Vec<Sentence>,
    train_fraction: f64,
    categories: &[TagCategory],
) -> Result<(Vec<Sentence>, Vec<Sentence>), CobaldError> {
    if !(train_fraction > 0.0 && train_fraction < 1.0) {
        return Err(CobaldError::InvalidFraction(train_fraction));
    }
    let total = sentences.len();
    if total == 0 {
        return Err(CobaldError::Configuration(
            "cannot split an empty sentence collection".to_string(),
        ));
    }

    let target_train = (train_fraction * total as f64).round() as usize;
    let target_test = total - target_train;

    let mut pool = sentences;
    let mut train = Vec::new();
    let mut test = Vec::new();

    while train.len() < target_train && test.len() < target_test {
        let cover = build_min_coverage(&pool, categories)?;
        if cover.is_empty() {
            // No tags anywhere in the remaining pool; fall through to the
            // bulk move instead of spinning.
            break;
        }
        move_cover(&mut pool, &cover, &mut train);

        let cover = build_min_coverage(&pool, categories)?;
        move_cover(&mut pool, &cover, &mut test);
        info!(
            train = train.len(),
            test = test.len(),
            pool = pool.len(),
            "allocation pass complete"
        );
    }

    // Bulk move of the unallocated remainder: top the train side up to its
    // target, then everything left goes to test. When the loop stopped
    // because one side reached its target this moves the whole pool to the
    // other side.
    if train.len() < target_train {
        let take = (target_train - train.len()).min(pool.len());
        train.extend(pool.drain(..take));
    }
    test.append(&mut pool);

    let realized = train.len() as f64 / total as f64;
    if (realized - train_fraction).abs() > FRACTION_TOLERANCE {
        return Err(CobaldError::Configuration(format!(
            "realized train fraction {realized:.3} is more than {FRACTION_TOLERANCE} away from requested {train_fraction}"
        )));
    }
    Ok((train, test))
}

/// Move the sentences at `cover` positions from `pool` into `out`,
/// preserving relative order on both sides.
fn move_cover(pool: &mut Vec<Sentence>, cover: &BTreeSet<usize>, out: &mut Vec<Sentence>) {
    if cover.is_empty() {
        return;
    }
    let mut kept = Vec::with_capacity(pool.len().saturating_sub(cover.len()));
    for (position, sentence) in pool.drain(..).enumerate() {
        if cover.contains(&position) {
            out.push(sentence);
        } else {
            kept.push(sentence);
        }
    }
    *pool = kept;
}
