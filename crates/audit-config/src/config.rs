//! The typed audit configuration.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::category::{Category, DenyOption, OutputFormat};
use crate::severity::Severity;

/// Default advisory database location used by the audit tool.
pub const DEFAULT_ADVISORY_DB_URL: &str = "https://github.com/RustSec/advisory-db.git";

/// Settings read from an `audit.toml` document.
///
/// Every field has a default, so any subset of the document (including none of it)
/// produces a fully populated value. Instances are immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditConfig {
    pub advisories: AdvisoriesConfig,
    pub output: OutputConfig,
    pub yanked: YankedConfig,
    pub database: DatabaseConfig,
    pub target: TargetConfig,
}

/// Identifier of a published advisory (e.g., "RUSTSEC-2024-0437").
///
/// Any string is accepted; [`AdvisoryId::is_rustsec`] tells whether it follows the usual layout.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AdvisoryId(String);

impl AdvisoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id has the `RUSTSEC-<year>-<sequence>` shape.
    pub fn is_rustsec(&self) -> bool {
        let mut parts = self.0.split('-');
        let (Some("RUSTSEC"), Some(year), Some(seq), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return false;
        };
        year.len() == 4
            && !seq.is_empty()
            && year.bytes().all(|b| b.is_ascii_digit())
            && seq.bytes().all(|b| b.is_ascii_digit())
    }
}

impl fmt::Display for AdvisoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AdvisoryId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// `[advisories]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdvisoriesConfig {
    /// Advisories to leave out of the report
    pub ignore: BTreeSet<AdvisoryId>,
    /// Informational categories reported as warnings
    pub informational_warnings: BTreeSet<Category>,
    /// Minimum severity that is reported
    pub severity_threshold: Severity,
}

impl Default for AdvisoriesConfig {
    fn default() -> Self {
        Self {
            ignore: BTreeSet::new(),
            informational_warnings: BTreeSet::from([Category::Unmaintained, Category::Unsound]),
            severity_threshold: Severity::None,
        }
    }
}

impl AdvisoriesConfig {
    pub fn is_ignored(&self, id: &str) -> bool {
        self.ignore.iter().any(|ignored| ignored.as_str() == id)
    }

    /// Whether a finding of the given severity clears the threshold.
    pub fn reports(&self, severity: Severity) -> bool {
        severity >= self.severity_threshold
    }

    pub fn warns_about(&self, category: Category) -> bool {
        self.informational_warnings.contains(&category)
    }
}

/// `[output]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputConfig {
    /// Warnings that fail the audit; `warnings` covers all of them
    pub deny: BTreeSet<DenyOption>,
    pub format: OutputFormat,
    pub quiet: bool,
    /// Print the inverse dependency tree for each finding
    pub show_tree: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            deny: BTreeSet::new(),
            format: OutputFormat::Terminal,
            quiet: false,
            show_tree: true,
        }
    }
}

impl OutputConfig {
    pub fn denies(&self, category: Category) -> bool {
        self.deny.contains(&DenyOption::Warnings)
            || DenyOption::for_category(category).is_some_and(|option| self.deny.contains(&option))
    }
}

/// `[yanked]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YankedConfig {
    pub enabled: bool,
    pub update_index: bool,
}

impl Default for YankedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            update_index: true,
        }
    }
}

/// `[database]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseConfig {
    /// Local checkout of the advisory database; `None` lets the audit tool decide
    pub path: Option<PathBuf>,
    pub url: String,
    pub fetch: bool,
    pub stale: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            url: DEFAULT_ADVISORY_DB_URL.to_string(),
            fetch: true,
            stale: false,
        }
    }
}

/// `[target]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TargetConfig {
    pub arch: BTreeSet<String>,
    pub os: BTreeSet<String>,
}
