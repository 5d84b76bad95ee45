/// Constants describing the CoBaLD token-line format.
pub mod fields {
    /// Number of tab-separated columns in a token line.
    pub const NUM_FIELDS: usize = 12;
    /// Placeholder marking an absent value in any nullable column.
    pub const PLACEHOLDER: &str = "_";
    /// Reserved head value marking the syntactic root.
    pub const ROOT_HEAD: u64 = 0;
    /// Root key allowed in deps mappings without a matching token id.
    pub const ROOT_DEPS_KEY: &str = "0";
    /// Sentinel form carried by null (elided) tokens.
    pub const NULL_FORM: &str = "#NULL";
    /// Mandatory misc value for null tokens.
    pub const NULL_MISC: &str = "ellipsis";
    /// Inner key/value separator inside the feats column.
    pub const FEATS_INNER_SEP: char = '=';
    /// Inner head/relation separator inside the deps column.
    pub const DEPS_INNER_SEP: char = ':';
    /// Outer group separator shared by the feats and deps columns.
    pub const OUTER_SEP: char = '|';
}

/// Constants used by the streaming sentence reader.
pub mod reader {
    /// Prefix marking a metadata/comment line.
    pub const COMMENT_PREFIX: char = '#';
    /// Key/value separator inside metadata lines.
    pub const METADATA_SEP: char = '=';
    /// Metadata key for the sentence identifier.
    pub const KEY_SENT_ID: &str = "sent_id";
    /// Metadata key for the raw sentence text.
    pub const KEY_TEXT: &str = "text";
    /// Placeholder sentence id used in errors when a block carried none.
    pub const UNKNOWN_SENT_ID: &str = "unknown";
}

/// Constants used by the stratified splitter.
pub mod splitter {
    /// Maximum allowed distance between the realized and requested train fraction.
    pub const FRACTION_TOLERANCE: f64 = 0.05;
    /// Default relative size of the train set.
    pub const DEFAULT_TRAIN_FRACTION: f64 = 0.8;
}

/// Constants used by dataset export.
pub mod export {
    /// Output filename for the train subset.
    pub const TRAIN_FILENAME: &str = "train.jsonl";
    /// Output filename for the validation subset.
    pub const VALIDATION_FILENAME: &str = "validation.jsonl";
}
