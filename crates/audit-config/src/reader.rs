//! Maps a parsed TOML tree onto [`AuditConfig`].

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::str::FromStr;

use toml_parser::{Location, TomlEntry, TomlTable, TomlValue};
use tracing::debug;

use crate::category::{Category, DenyOption, OutputFormat};
use crate::config::{AdvisoryId, AuditConfig};
use crate::error::ConfigError;
use crate::severity::Severity;

/// A key present in the document that the schema does not know about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredKey {
    /// Dotted path, e.g. `output.colour`
    pub key: String,
    pub location: Location,
}

/// Result of reading one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfig {
    pub config: AuditConfig,
    /// Unknown sections and keys, skipped for forward compatibility
    pub ignored_keys: Vec<IgnoredKey>,
}

/// Parse and validate a document held in memory.
pub fn parse_document(text: &str) -> Result<ParsedConfig, ConfigError> {
    let root = toml_parser::parse(text)?;
    let mut reader = Reader::default();
    reader.read_root(&root)?;
    Ok(reader.finish())
}

#[derive(Default)]
struct Reader {
    config: AuditConfig,
    ignored_keys: Vec<IgnoredKey>,
}

impl Reader {
    fn finish(self) -> ParsedConfig {
        ParsedConfig {
            config: self.config,
            ignored_keys: self.ignored_keys,
        }
    }

    fn ignore(&mut self, key: String, location: Location) {
        debug!("ignoring unknown key `{}` at {}", key, location);
        self.ignored_keys.push(IgnoredKey { key, location });
    }

    fn read_root(&mut self, root: &TomlTable) -> Result<(), ConfigError> {
        for entry in root.entries() {
            let section = entry.key.as_str();
            match section {
                "advisories" | "output" | "yanked" | "database" | "target" => {
                    let table = expect_table(section, &entry.value)?;
                    for field in table.entries() {
                        let key = format!("{}.{}", section, field.key);
                        self.read_field(section, key, field)?;
                    }
                }
                _ => self.ignore(section.to_string(), entry.key_location),
            }
        }
        Ok(())
    }

    fn read_field(
        &mut self,
        section: &str,
        key: String,
        field: &TomlEntry,
    ) -> Result<(), ConfigError> {
        let value = &field.value;
        let config = &mut self.config;

        match (section, field.key.as_str()) {
            ("advisories", "ignore") => {
                let mut ignore = BTreeSet::new();
                for id in expect_strings(&key, value)? {
                    let id = AdvisoryId::new(id);
                    if !id.is_rustsec() {
                        debug!("advisory id `{}` does not look like RUSTSEC-<year>-<sequence>", id);
                    }
                    ignore.insert(id);
                }
                config.advisories.ignore = ignore;
            }
            ("advisories", "informational_warnings") => {
                config.advisories.informational_warnings =
                    expect_keywords(&key, value, Category::VARIANTS)?;
            }
            ("advisories", "severity_threshold") => {
                config.advisories.severity_threshold =
                    expect_keyword::<Severity>(&key, value, Severity::VARIANTS)?;
            }
            ("output", "deny") => {
                config.output.deny = expect_keywords(&key, value, DenyOption::VARIANTS)?;
            }
            ("output", "format") => {
                config.output.format =
                    expect_keyword::<OutputFormat>(&key, value, OutputFormat::VARIANTS)?;
            }
            ("output", "quiet") => config.output.quiet = expect_bool(&key, value)?,
            ("output", "show_tree") => config.output.show_tree = expect_bool(&key, value)?,
            ("yanked", "enabled") => config.yanked.enabled = expect_bool(&key, value)?,
            ("yanked", "update_index") => config.yanked.update_index = expect_bool(&key, value)?,
            ("database", "path") => {
                config.database.path = Some(PathBuf::from(expect_string(&key, value)?));
            }
            ("database", "url") => config.database.url = expect_string(&key, value)?.to_string(),
            ("database", "fetch") => config.database.fetch = expect_bool(&key, value)?,
            ("database", "stale") => config.database.stale = expect_bool(&key, value)?,
            ("target", "arch") => {
                config.target.arch = expect_strings(&key, value)?.map(str::to_string).collect();
            }
            ("target", "os") => {
                config.target.os = expect_strings(&key, value)?.map(str::to_string).collect();
            }
            _ => self.ignore(key, field.key_location),
        }

        Ok(())
    }
}

fn invalid(key: &str, expected: impl Into<String>, value: &TomlValue) -> ConfigError {
    ConfigError::InvalidValue {
        path: None,
        key: key.to_string(),
        expected: expected.into(),
        found: value.describe(),
        line: value.location.line,
        column: value.location.column,
    }
}

fn one_of(accepted: &[&str]) -> String {
    let quoted = accepted
        .iter()
        .map(|v| format!("{v:?}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("one of {quoted}")
}

fn expect_table<'a>(key: &str, value: &'a TomlValue) -> Result<&'a TomlTable, ConfigError> {
    value.as_table().ok_or_else(|| invalid(key, "a table", value))
}

fn expect_bool(key: &str, value: &TomlValue) -> Result<bool, ConfigError> {
    value.as_bool().ok_or_else(|| invalid(key, "a boolean", value))
}

fn expect_string<'a>(key: &str, value: &'a TomlValue) -> Result<&'a str, ConfigError> {
    value.as_str().ok_or_else(|| invalid(key, "a string", value))
}

fn expect_strings<'a>(
    key: &str,
    value: &'a TomlValue,
) -> Result<impl Iterator<Item = &'a str>, ConfigError> {
    let items = value
        .as_array()
        .ok_or_else(|| invalid(key, "an array of strings", value))?;
    if let Some(bad) = items.iter().find(|item| item.as_str().is_none()) {
        return Err(invalid(key, "an array of strings", bad));
    }
    Ok(items.iter().filter_map(TomlValue::as_str))
}

fn expect_keyword<T: FromStr>(
    key: &str,
    value: &TomlValue,
    accepted: &[&str],
) -> Result<T, ConfigError> {
    let s = value
        .as_str()
        .ok_or_else(|| invalid(key, one_of(accepted), value))?;
    s.parse().map_err(|_| invalid(key, one_of(accepted), value))
}

fn expect_keywords<T: FromStr + Ord>(
    key: &str,
    value: &TomlValue,
    accepted: &[&str],
) -> Result<BTreeSet<T>, ConfigError> {
    let items = value
        .as_array()
        .ok_or_else(|| invalid(key, format!("an array of {}", one_of(accepted)), value))?;
    items
        .iter()
        .map(|item| expect_keyword(key, item, accepted))
        .collect()
}
