//! # audit-config
//!
//! Locate, parse and validate `audit.toml`, the configuration file of the
//! dependency audit tool.
//!
//! ## Overview
//!
//! The `audit-config` crate sits on top of `toml-parser`:
//! - **toml-parser**: Parses TOML text into a tree with line/column positions
//! - **audit-config**: Validates that tree against the audit schema and fills in defaults
//!
//! Every field has a default, so a missing file, section or key is never an
//! error. Unknown sections and keys are skipped and reported back as
//! [`IgnoredKey`]s.
//!
//! ## Example
//!
//! ```ignore
//! use audit_config::{AuditConfig, SearchPaths, Severity};
//!
//! // project `.cargo/audit.toml` wins over `$CARGO_HOME/audit.toml`
//! let loaded = AuditConfig::load_or_default(&SearchPaths::from_env()?)?;
//!
//! if loaded.config.advisories.is_ignored("RUSTSEC-2024-0437") {
//!     println!("ignored");
//! }
//! if loaded.config.advisories.reports(Severity::Medium) {
//!     println!("medium findings are reported");
//! }
//! ```
//!
//! ## File format
//!
//! ```toml
//! [advisories]
//! ignore = ["RUSTSEC-2024-0437"]
//! informational_warnings = ["unmaintained", "unsound"]
//! severity_threshold = "low"
//!
//! [output]
//! deny = ["unsound"]
//! format = "terminal"
//! quiet = false
//! show_tree = true
//!
//! [yanked]
//! enabled = true
//! update_index = true
//! ```

mod category;
mod config;
mod error;
mod locate;
mod reader;
mod severity;

pub use category::{Category, DenyOption, OutputFormat};
pub use config::{
    AdvisoriesConfig, AdvisoryId, AuditConfig, DatabaseConfig, OutputConfig, TargetConfig,
    YankedConfig, DEFAULT_ADVISORY_DB_URL,
};
pub use error::{ConfigError, UnknownKeyword};
pub use locate::{cargo_home, ConfigSource, LoadedConfig, SearchPaths, CONFIG_FILE_NAME};
pub use reader::{parse_document, IgnoredKey, ParsedConfig};
pub use severity::Severity;
pub use toml_parser::Location;
