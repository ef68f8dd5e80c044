//! Locating and loading `audit.toml` from the user and project scopes.

use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use directories::BaseDirs;
use toml_parser::Location;
use tracing::{debug, info};

use crate::config::AuditConfig;
use crate::error::ConfigError;
use crate::reader::{parse_document, IgnoredKey};

pub const CONFIG_FILE_NAME: &str = "audit.toml";

/// The two fixed places a configuration may live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPaths {
    /// `<project>/.cargo/audit.toml`
    pub project: PathBuf,
    /// `<cargo home>/audit.toml`, `None` when no home directory can be determined
    pub user: Option<PathBuf>,
}

impl SearchPaths {
    pub fn new(project_dir: impl AsRef<Path>, cargo_home: Option<PathBuf>) -> Self {
        Self {
            project: project_dir.as_ref().join(".cargo").join(CONFIG_FILE_NAME),
            user: cargo_home.map(|home| home.join(CONFIG_FILE_NAME)),
        }
    }

    /// Search paths for `project_dir` with the cargo home taken from the environment.
    pub fn for_project(project_dir: impl AsRef<Path>) -> Self {
        Self::new(project_dir, cargo_home())
    }

    /// Search paths for the current directory with the cargo home taken from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(|source| ConfigError::Io {
            path: PathBuf::from("."),
            source,
        })?;
        Ok(Self::for_project(cwd))
    }

    /// Candidate files in precedence order: project first, then user.
    pub fn candidates(&self) -> impl Iterator<Item = (ConfigSource, &Path)> {
        std::iter::once((ConfigSource::Project, self.project.as_path())).chain(
            self.user
                .as_deref()
                .map(|user| (ConfigSource::User, user)),
        )
    }
}

/// `$CARGO_HOME`, falling back to `~/.cargo`.
pub fn cargo_home() -> Option<PathBuf> {
    if let Some(home) = std::env::var_os("CARGO_HOME").filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(home));
    }
    BaseDirs::new().map(|dirs| dirs.home_dir().join(".cargo"))
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// A file named explicitly by the caller
    Explicit,
    Project,
    User,
    /// No file was found, every field holds its default
    Defaults,
}

impl ConfigSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigSource::Explicit => "file",
            ConfigSource::Project => "project",
            ConfigSource::User => "user",
            ConfigSource::Defaults => "defaults",
        }
    }
}

/// A configuration together with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    pub config: AuditConfig,
    pub source: ConfigSource,
    /// File the configuration was read from, `None` for [`ConfigSource::Defaults`]
    pub path: Option<PathBuf>,
    pub ignored_keys: Vec<IgnoredKey>,
}

impl FromStr for AuditConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_document(s).map(|parsed| parsed.config)
    }
}

impl AuditConfig {
    /// Read and validate a single file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        read_file(path.as_ref()).map(|(config, _)| config)
    }

    /// Read a single file named by the caller, bypassing the search locations.
    pub fn load_explicit(path: impl AsRef<Path>) -> Result<LoadedConfig, ConfigError> {
        let path = path.as_ref();
        let (config, ignored_keys) = read_file(path)?;
        Ok(LoadedConfig {
            config,
            source: ConfigSource::Explicit,
            path: Some(path.to_path_buf()),
            ignored_keys,
        })
    }

    /// Load the first configuration found in `paths`.
    ///
    /// The project file takes precedence and is used on its own; the user file is only
    /// consulted when the project has none. Nothing is merged.
    pub fn discover(paths: &SearchPaths) -> Result<LoadedConfig, ConfigError> {
        let mut searched = Vec::with_capacity(2);

        for (source, path) in paths.candidates() {
            match read_file(path) {
                Ok((config, ignored_keys)) => {
                    debug!("using {} configuration {}", source.as_str(), path.display());
                    return Ok(LoadedConfig {
                        config,
                        source,
                        path: Some(path.to_path_buf()),
                        ignored_keys,
                    });
                }
                Err(e) if e.is_not_found() => {
                    debug!("no {} configuration at {}", source.as_str(), path.display());
                    searched.push(path.to_path_buf());
                }
                Err(e) => return Err(e),
            }
        }

        Err(ConfigError::NotFound { searched })
    }

    /// Like [`AuditConfig::discover`], but a missing configuration yields the defaults.
    pub fn load_or_default(paths: &SearchPaths) -> Result<LoadedConfig, ConfigError> {
        match Self::discover(paths) {
            Err(ConfigError::NotFound { searched }) => {
                info!(
                    "no audit configuration in {} location(s), using defaults",
                    searched.len()
                );
                Ok(LoadedConfig {
                    config: AuditConfig::default(),
                    source: ConfigSource::Defaults,
                    path: None,
                    ignored_keys: Vec::new(),
                })
            }
            other => other,
        }
    }
}

fn read_file(path: &Path) -> Result<(AuditConfig, Vec<IgnoredKey>), ConfigError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ConfigError::NotFound {
                searched: vec![path.to_path_buf()],
            })
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let text = String::from_utf8(bytes).map_err(|e| {
        let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
        let location = end_of(valid);
        ConfigError::ParseError {
            path: Some(path.to_path_buf()),
            line: location.line,
            column: location.column,
            message: "invalid UTF-8".to_string(),
        }
    })?;

    let parsed = parse_document(&text).map_err(|e| e.with_path(path))?;
    Ok((parsed.config, parsed.ignored_keys))
}

// Position just past `valid`, which must be valid UTF-8.
fn end_of(valid: &[u8]) -> Location {
    let text = std::str::from_utf8(valid).unwrap_or_default();
    let line = text.matches('\n').count() + 1;
    let last = text.rsplit('\n').next().unwrap_or_default();
    Location::new(line, last.encode_utf16().count() + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::severity::Severity;
    use std::fs;
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        project: PathBuf,
        cargo_home: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let project = dir.path().join("project");
            let cargo_home = dir.path().join("cargo-home");
            fs::create_dir_all(project.join(".cargo")).unwrap();
            fs::create_dir_all(&cargo_home).unwrap();
            Self {
                _dir: dir,
                project,
                cargo_home,
            }
        }

        fn paths(&self) -> SearchPaths {
            SearchPaths::new(&self.project, Some(self.cargo_home.clone()))
        }

        fn write_project(&self, text: &str) {
            fs::write(self.project.join(".cargo").join(CONFIG_FILE_NAME), text).unwrap();
        }

        fn write_user(&self, text: &str) {
            fs::write(self.cargo_home.join(CONFIG_FILE_NAME), text).unwrap();
        }
    }

    #[test]
    fn test_search_paths() {
        let paths = SearchPaths::new("/work/app", Some(PathBuf::from("/home/u/.cargo")));
        assert_eq!(paths.project, PathBuf::from("/work/app/.cargo/audit.toml"));
        assert_eq!(paths.user, Some(PathBuf::from("/home/u/.cargo/audit.toml")));

        let sources: Vec<_> = paths.candidates().map(|(s, _)| s).collect();
        assert_eq!(sources, vec![ConfigSource::Project, ConfigSource::User]);
    }

    #[test]
    fn test_not_found_at_both_locations() {
        let fixture = Fixture::new();
        let err = AuditConfig::discover(&fixture.paths()).unwrap_err();
        match err {
            ConfigError::NotFound { searched } => assert_eq!(searched.len(), 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_or_default() {
        let fixture = Fixture::new();
        let loaded = AuditConfig::load_or_default(&fixture.paths()).unwrap();
        assert_eq!(loaded.source, ConfigSource::Defaults);
        assert_eq!(loaded.config, AuditConfig::default());
        assert!(loaded.path.is_none());
    }

    #[test]
    fn test_user_fallback() {
        let fixture = Fixture::new();
        fixture.write_user("[advisories]\nseverity_threshold = \"high\"\n");

        let loaded = AuditConfig::discover(&fixture.paths()).unwrap();
        assert_eq!(loaded.source, ConfigSource::User);
        assert_eq!(loaded.config.advisories.severity_threshold, Severity::High);
    }

    #[test]
    fn test_project_overrides_user() {
        let fixture = Fixture::new();
        fixture.write_user("[advisories]\nseverity_threshold = \"high\"\n[output]\nquiet = true\n");
        fixture.write_project("[advisories]\nseverity_threshold = \"low\"\n");

        let loaded = AuditConfig::discover(&fixture.paths()).unwrap();
        assert_eq!(loaded.source, ConfigSource::Project);
        assert_eq!(loaded.config.advisories.severity_threshold, Severity::Low);
        // not merged: the user-level `quiet` does not leak in
        assert!(!loaded.config.output.quiet);
    }

    #[test]
    fn test_invalid_project_file_is_not_skipped() {
        let fixture = Fixture::new();
        fixture.write_user("");
        fixture.write_project("[advisories]\nseverity_threshold = \"extreme\"\n");

        let err = AuditConfig::load_or_default(&fixture.paths()).unwrap_err();
        assert_eq!(err.key(), Some("advisories.severity_threshold"));
        assert!(err.to_string().contains("audit.toml:2:22"));
    }

    #[test]
    fn test_load_single_file() {
        let fixture = Fixture::new();
        fixture.write_project("[yanked]\nenabled = false\n");

        let config = AuditConfig::load(&fixture.paths().project).unwrap();
        assert!(!config.yanked.enabled);

        let missing = fixture.project.join("missing.toml");
        assert!(AuditConfig::load(missing).unwrap_err().is_not_found());
    }

    #[test]
    fn test_load_explicit() {
        let fixture = Fixture::new();
        let file = fixture.project.join("custom.toml");
        fs::write(&file, "[output]\nquiet = true\nloud = true\n").unwrap();

        let loaded = AuditConfig::load_explicit(&file).unwrap();
        assert_eq!(loaded.source, ConfigSource::Explicit);
        assert_eq!(loaded.path.as_deref(), Some(file.as_path()));
        assert!(loaded.config.output.quiet);
        assert_eq!(loaded.ignored_keys[0].key, "output.loud");
    }

    #[test]
    fn test_invalid_utf8_is_a_parse_error() {
        let fixture = Fixture::new();
        let file = fixture.project.join("latin1.toml");
        fs::write(&file, b"[output]\nquiet = \xff\n").unwrap();

        match AuditConfig::load(&file).unwrap_err() {
            ConfigError::ParseError {
                path, line, column, ..
            } => {
                assert_eq!(path.as_deref(), Some(file.as_path()));
                assert_eq!((line, column), (2, 9));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_ignored_keys_are_reported() {
        let fixture = Fixture::new();
        fixture.write_project("[bogus]\nx = 1\n");

        let loaded = AuditConfig::discover(&fixture.paths()).unwrap();
        assert_eq!(loaded.config, AuditConfig::default());
        assert_eq!(loaded.ignored_keys.len(), 1);
    }

    #[test]
    fn test_from_str() {
        let config: AuditConfig = "[output]\nformat = \"json\"\n".parse().unwrap();
        assert_eq!(config.output.format.as_str(), "json");
    }
}
