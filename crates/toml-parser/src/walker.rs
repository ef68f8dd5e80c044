use lsp_async_stub::util::Mapper;
use taplo::{
    dom::{
        node::{Key, Table},
        Node,
    },
    rowan::TextRange,
};
use thiserror::Error;
use tracing::trace;

use crate::toml_tree::{Location, TomlEntry, TomlTable, TomlValue, ValueKind};

/// The first structural problem found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{location}: {message}")]
pub struct SyntaxError {
    pub message: String,
    pub location: Location,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, location: Location) -> Self {
        Self {
            message: message.into(),
            location,
        }
    }
}

/// Parse a TOML document into a located tree.
///
/// The whole document is rejected on the first syntax error or duplicate key.
pub fn parse(text: &str) -> Result<TomlTable, SyntaxError> {
    let parsed = taplo::parser::parse(text);
    let walker = Walker::new(text);

    if let Some(err) = parsed.errors.first() {
        return Err(SyntaxError::new(
            err.message.clone(),
            walker.location(Some(err.range)),
        ));
    }

    let dom = parsed.into_dom();
    if let Err(mut errors) = dom.validate() {
        if let Some(err) = errors.next() {
            return Err(walker.dom_error(&err));
        }
    }

    match dom {
        Node::Table(root) => walker.walk_table(&root),
        _ => Ok(TomlTable::default()),
    }
}

struct Walker {
    mapper: Mapper,
}

impl Walker {
    fn new(text: &str) -> Self {
        Self {
            mapper: Mapper::new_utf16(text, false),
        }
    }

    fn location(&self, range: Option<TextRange>) -> Location {
        range
            .and_then(|r| self.mapper.range(r))
            .map(|r| Location::new(r.start.line as usize + 1, r.start.character as usize + 1))
            .unwrap_or_default()
    }

    // Conflicts are reported at the later of the two keys.
    fn dom_error(&self, err: &taplo::dom::Error) -> SyntaxError {
        let location = match err {
            taplo::dom::Error::ConflictingKeys { key, other } => {
                self.key_location(key).max(self.key_location(other))
            }
            _ => Location::start(),
        };
        SyntaxError::new(err.to_string(), location)
    }

    fn key_location(&self, key: &Key) -> Location {
        self.location(key.text_ranges().reduce(|a, b| a.cover(b)))
    }

    // Implicit tables (dotted keys) have no text of their own, fall back to the key.
    fn node_location(&self, node: &Node, fallback: Location) -> Location {
        match node.text_ranges(true).reduce(|a, b| a.cover(b)) {
            Some(range) => self.location(Some(range)),
            None => fallback,
        }
    }

    fn walk_table(&self, table: &Table) -> Result<TomlTable, SyntaxError> {
        let entries = table.entries().read();
        let mut out = TomlTable::with_capacity(entries.len());

        for (key, node) in entries.iter() {
            let name = key.value();
            let key_location = self.key_location(key);

            let value = self.walk_node(node, key_location)?;
            trace!("walked `{}` ({}) at {}", name, value.kind.type_name(), key_location);
            insert(
                &mut out,
                TomlEntry {
                    key: name.to_string(),
                    key_location,
                    value,
                },
            )?;
        }

        Ok(out)
    }

    fn walk_node(&self, node: &Node, fallback: Location) -> Result<TomlValue, SyntaxError> {
        let location = self.node_location(node, fallback);

        let kind = match node {
            Node::Table(t) => ValueKind::Table(self.walk_table(t)?),
            Node::Array(arr) => {
                let items = arr.items().read();
                let mut values = Vec::with_capacity(items.len());
                for item in items.iter() {
                    values.push(self.walk_node(item, location)?);
                }
                ValueKind::Array(values)
            }
            Node::Str(s) => ValueKind::String(s.value().to_string()),
            Node::Bool(b) => ValueKind::Bool(b.value()),
            Node::Integer(i) => ValueKind::Integer(i.value().to_string()),
            Node::Float(f) => ValueKind::Float(f.value()),
            Node::Date(_) => ValueKind::Datetime,
            Node::Invalid(_) => return Err(SyntaxError::new("invalid value", location)),
        };

        Ok(TomlValue::new(kind, location))
    }
}

// `[a]` followed by `[a.b]` can show up as two `a` entries in the dom, so tables
// sharing a key are merged. Real conflicts were already rejected by `validate`.
fn insert(table: &mut TomlTable, entry: TomlEntry) -> Result<(), SyntaxError> {
    let Some(existing) = table.get_mut(&entry.key) else {
        table.push(entry);
        return Ok(());
    };

    match (&mut existing.value.kind, entry.value.kind) {
        (ValueKind::Table(existing), ValueKind::Table(incoming)) => {
            for child in incoming.into_entries() {
                insert(existing, child)?;
            }
            Ok(())
        }
        _ => Err(SyntaxError::new(
            format!("duplicate key `{}`", entry.key),
            entry.key_location,
        )),
    }
}
