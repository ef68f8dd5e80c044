use audit_config::{LoadedConfig, SearchPaths};

fn join<T: ToString>(items: impl IntoIterator<Item = T>) -> String {
    let items: Vec<String> = items.into_iter().map(|i| i.to_string()).collect();
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}

/// Human readable summary of the effective configuration.
pub fn terminal(loaded: &LoadedConfig) -> String {
    let config = &loaded.config;
    let mut text = String::new();

    match &loaded.path {
        Some(path) => {
            text.push_str(&format!(
                "# Source: {} ({})\n",
                loaded.source.as_str(),
                path.display()
            ));
        }
        None => {
            text.push_str(&format!("# Source: {}\n", loaded.source.as_str()));
        }
    }

    let advisories = &config.advisories;
    text.push_str("\n# Advisories\n");
    text.push_str(&format!("* Ignore: {}\n", join(&advisories.ignore)));
    text.push_str(&format!(
        "* Informational warnings: {}\n",
        join(&advisories.informational_warnings)
    ));
    text.push_str(&format!(
        "* Severity threshold: {}\n",
        advisories.severity_threshold
    ));

    let output = &config.output;
    text.push_str("\n# Output\n");
    text.push_str(&format!("* Deny: {}\n", join(&output.deny)));
    text.push_str(&format!("* Format: {}\n", output.format));
    text.push_str(&format!("* Quiet: {}\n", output.quiet));
    text.push_str(&format!("* Show tree: {}\n", output.show_tree));

    text.push_str("\n# Yanked\n");
    text.push_str(&format!("* Enabled: {}\n", config.yanked.enabled));
    text.push_str(&format!("* Update index: {}\n", config.yanked.update_index));

    let database = &config.database;
    text.push_str("\n# Database\n");
    if let Some(path) = &database.path {
        text.push_str(&format!("* Path: {}\n", path.display()));
    }
    text.push_str(&format!("* URL: {}\n", database.url));
    text.push_str(&format!("* Fetch: {}\n", database.fetch));
    text.push_str(&format!("* Stale: {}\n", database.stale));

    let target = &config.target;
    if !target.arch.is_empty() || !target.os.is_empty() {
        text.push_str("\n# Target\n");
        text.push_str(&format!("* Arch: {}\n", join(&target.arch)));
        text.push_str(&format!("* OS: {}\n", join(&target.os)));
    }

    if !loaded.ignored_keys.is_empty() {
        text.push_str("\n# Ignored keys\n");
        for ignored in &loaded.ignored_keys {
            text.push_str(&format!("* {} ({})\n", ignored.key, ignored.location));
        }
    }

    text
}

/// Both search locations, marking which exist and which one is in effect.
pub fn locations(paths: &SearchPaths) -> String {
    let mut text = String::new();
    let mut in_effect = false;

    for (source, path) in paths.candidates() {
        let exists = path.is_file();
        let marker = if exists && !in_effect {
            in_effect = true;
            "*"
        } else {
            " "
        };
        let state = if exists { "found" } else { "missing" };
        text.push_str(&format!(
            "{marker} {:<7} {} ({state})\n",
            source.as_str(),
            path.display()
        ));
    }

    if paths.user.is_none() {
        text.push_str("  user    (no home directory)\n");
    }
    if !in_effect {
        text.push_str("no configuration file found, defaults apply\n");
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use audit_config::{AuditConfig, ConfigSource};
    use std::path::PathBuf;

    #[test]
    fn test_terminal_defaults() {
        let loaded = LoadedConfig {
            config: AuditConfig::default(),
            source: ConfigSource::Defaults,
            path: None,
            ignored_keys: Vec::new(),
        };
        let text = terminal(&loaded);
        assert!(text.starts_with("# Source: defaults\n"));
        assert!(text.contains("* Ignore: (none)\n"));
        assert!(text.contains("* Informational warnings: unmaintained, unsound\n"));
        assert!(text.contains("* Severity threshold: none\n"));
        assert!(text.contains("* Format: terminal\n"));
        assert!(!text.contains("# Target"));
        assert!(!text.contains("# Ignored keys"));
    }

    #[test]
    fn test_terminal_from_document() {
        let parsed =
            audit_config::parse_document("[advisories]\nignore = [\"RUSTSEC-2024-0437\"]\n[x]\n")
                .unwrap();
        let loaded = LoadedConfig {
            config: parsed.config,
            source: ConfigSource::Project,
            path: Some(PathBuf::from(".cargo/audit.toml")),
            ignored_keys: parsed.ignored_keys,
        };
        let text = terminal(&loaded);
        assert!(text.starts_with("# Source: project (.cargo/audit.toml)\n"));
        assert!(text.contains("* Ignore: RUSTSEC-2024-0437\n"));
        assert!(text.contains("# Ignored keys\n* x (3:2)\n"));
    }

    #[test]
    fn test_locations_none_found() {
        let dir = tempfile::tempdir().unwrap();
        let paths = SearchPaths::new(dir.path(), Some(dir.path().join("home")));
        let text = locations(&paths);
        assert!(text.contains("project"));
        assert!(text.contains("(missing)"));
        assert!(text.ends_with("no configuration file found, defaults apply\n"));
    }

    #[test]
    fn test_locations_marks_effective_file() {
        let dir = tempfile::tempdir().unwrap();
        let home = dir.path().join("home");
        std::fs::create_dir_all(&home).unwrap();
        std::fs::write(home.join("audit.toml"), "").unwrap();

        let paths = SearchPaths::new(dir.path(), Some(home));
        let text = locations(&paths);
        assert!(text.contains("* user"));
        assert!(!text.contains("defaults apply"));
    }
}
