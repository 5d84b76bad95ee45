//! Output-record serialization and JSON-lines export.
//!
//! Sentences serialize directly as flat records (scalars plus equal-length
//! columns). The deps column keeps a canonical JSON encoding so every column
//! stays a flat scalar for downstream columnar storage.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::errors::CobaldError;
use crate::sentence::Sentence;
use crate::types::DepsMap;

/// Canonically encode a deps mapping for flat columnar storage.
///
/// Keys keep their first-seen order, so encoding a decoded value reproduces
/// the original string exactly.
pub fn encode_deps(deps: &DepsMap) -> String {
    let mut object = serde_json::Map::new();
    for (head, relation) in deps {
        object.insert(head.clone(), serde_json::Value::String(relation.clone()));
    }
    serde_json::Value::Object(object).to_string()
}

/// Decode a canonically encoded deps mapping.
pub fn decode_deps(encoded: &str) -> Result<DepsMap, serde_json::Error> {
    serde_json::from_str(encoded)
}

/// Write sentences as JSON lines, one output record per line.
pub fn write_jsonl(path: impl AsRef<Path>, sentences: &[Sentence]) -> Result<(), CobaldError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for sentence in sentences {
        serde_json::to_writer(&mut writer, sentence)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}
