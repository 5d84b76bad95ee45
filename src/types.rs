/// A single tag value drawn from one of the stratification categories.
/// Examples: `NOUN`, `advcl:while`, `Mood=Ind|Number=Sing`
pub type Tag = String;
/// Relation label attached to an enhanced-dependency edge.
/// Examples: `conj`, `advcl:while`
pub type RelationLabel = String;
/// Parsed enhanced-dependency mapping from head reference to relation label.
/// Keys are decimal ids (`26`) or null indexes (`18.1`); insertion order is preserved.
pub type DepsMap = indexmap::IndexMap<String, RelationLabel>;
