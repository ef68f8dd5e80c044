use std::fmt;

/// A 1-based line/column position inside the parsed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Location of the first character of the document.
    pub fn start() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A TOML value together with the location it was written at.
#[derive(Debug, Clone, PartialEq)]
pub struct TomlValue {
    pub kind: ValueKind,
    pub location: Location,
}

impl TomlValue {
    pub fn new(kind: ValueKind, location: Location) -> Self {
        Self { kind, location }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.kind {
            ValueKind::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.kind {
            ValueKind::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[TomlValue]> {
        match &self.kind {
            ValueKind::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&TomlTable> {
        match &self.kind {
            ValueKind::Table(t) => Some(t),
            _ => None,
        }
    }

    /// Short human readable rendering used in diagnostics,
    /// e.g. `"extreme"` or `integer 3`.
    pub fn describe(&self) -> String {
        match &self.kind {
            ValueKind::String(s) => format!("{s:?}"),
            ValueKind::Bool(b) => format!("boolean {b}"),
            ValueKind::Integer(i) => format!("integer {i}"),
            ValueKind::Float(f) => format!("float {f}"),
            _ => self.kind.type_name().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValueKind {
    String(String),
    Bool(bool),
    /// Kept as written; the schema has no integer fields so no range is imposed.
    Integer(String),
    Float(f64),
    Datetime,
    Array(Vec<TomlValue>),
    Table(TomlTable),
}

impl ValueKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            ValueKind::String(_) => "string",
            ValueKind::Bool(_) => "boolean",
            ValueKind::Integer(_) => "integer",
            ValueKind::Float(_) => "float",
            ValueKind::Datetime => "datetime",
            ValueKind::Array(_) => "array",
            ValueKind::Table(_) => "table",
        }
    }
}

/// One `key = value` pair of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct TomlEntry {
    pub key: String,
    pub key_location: Location,
    pub value: TomlValue,
}

/// A table in document order. Keys are unique, the walker rejects duplicates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TomlTable {
    entries: Vec<TomlEntry>,
}

impl TomlTable {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, entry: TomlEntry) {
        self.entries.push(entry);
    }

    pub fn get(&self, key: &str) -> Option<&TomlEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut TomlEntry> {
        self.entries.iter_mut().find(|e| e.key == key)
    }

    pub(crate) fn into_entries(self) -> Vec<TomlEntry> {
        self.entries
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn entries(&self) -> impl Iterator<Item = &TomlEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        let loc = Location::start();
        assert_eq!(
            TomlValue::new(ValueKind::String("extreme".into()), loc).describe(),
            "\"extreme\""
        );
        assert_eq!(
            TomlValue::new(ValueKind::Integer("3".into()), loc).describe(),
            "integer 3"
        );
        assert_eq!(
            TomlValue::new(ValueKind::Array(vec![]), loc).describe(),
            "array"
        );
    }

    #[test]
    fn test_location_display() {
        assert_eq!(Location::new(3, 14).to_string(), "3:14");
        assert_eq!(Location::default(), Location::start());
    }
}
