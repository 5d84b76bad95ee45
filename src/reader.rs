//! Streaming reader that turns blank-line-delimited blocks into sentences.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use tracing::debug;

use crate::constants::reader::{COMMENT_PREFIX, KEY_SENT_ID, KEY_TEXT, METADATA_SEP};
use crate::errors::CobaldError;
use crate::sentence::{Sentence, SentenceMetadata};

/// Pull-based sentence reader.
///
/// Advances one trimmed line at a time, buffering metadata and token lines
/// until a blank line (or end of input) closes the block, then parses and
/// validates the block as a whole. Memory use is bounded by one block, not
/// the file. The stream is strict and single-pass: the first failed block is
/// yielded as an error and ends the iteration, and the underlying handle is
/// released when the reader is dropped.
pub struct SentenceReader<R: BufRead> {
    lines: Lines<R>,
    metadata: SentenceMetadata,
    token_lines: Vec<String>,
    done: bool,
}

impl SentenceReader<BufReader<File>> {
    /// Open `path` and stream its sentence blocks.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CobaldError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> SentenceReader<R> {
    /// Stream sentence blocks from any buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            metadata: SentenceMetadata::default(),
            token_lines: Vec::new(),
            done: false,
        }
    }

    /// Store `sent_id`/`text` metadata; other comment lines are ignored.
    /// On duplicate keys the last occurrence wins.
    fn absorb_metadata(&mut self, line: &str) {
        let Some(rest) = line.strip_prefix(COMMENT_PREFIX) else {
            return;
        };
        let Some((key, value)) = rest.split_once(METADATA_SEP) else {
            return;
        };
        let value = value.trim().to_string();
        match key.trim() {
            KEY_SENT_ID => self.metadata.sent_id = Some(value),
            KEY_TEXT => self.metadata.text = Some(value),
            _ => {}
        }
    }

    fn flush_block(&mut self) -> Result<Sentence, CobaldError> {
        let token_lines = std::mem::take(&mut self.token_lines);
        let metadata = std::mem::take(&mut self.metadata);
        let sentence = Sentence::parse(&token_lines, metadata)?;
        debug!(
            sent_id = ?sentence.sent_id,
            tokens = sentence.len(),
            "parsed sentence block"
        );
        Ok(sentence)
    }
}

impl<R: BufRead> Iterator for SentenceReader<R> {
    type Item = Result<Sentence, CobaldError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            match self.lines.next() {
                Some(Ok(raw)) => {
                    let line = raw.trim();
                    if line.is_empty() {
                        // A blank line with nothing buffered is a no-op, which
                        // tolerates leading and consecutive separators.
                        if !self.token_lines.is_empty() {
                            let result = self.flush_block();
                            if result.is_err() {
                                self.done = true;
                            }
                            return Some(result);
                        }
                    } else if line.starts_with(COMMENT_PREFIX) {
                        self.absorb_metadata(line);
                    } else {
                        self.token_lines.push(line.to_string());
                    }
                }
                Some(Err(err)) => {
                    self.done = true;
                    return Some(Err(err.into()));
                }
                None => {
                    self.done = true;
                    if self.token_lines.is_empty() {
                        return None;
                    }
                    return Some(self.flush_block());
                }
            }
        }
    }
}

/// Read and validate every sentence in `path` into memory.
pub fn read_sentences(path: impl AsRef<Path>) -> Result<Vec<Sentence>, CobaldError> {
    SentenceReader::open(path)?.collect()
}
