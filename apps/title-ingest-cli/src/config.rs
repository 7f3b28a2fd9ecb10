//! Ingest configuration
//!
//! A plain struct populated once at startup and passed explicitly.
//! Precedence: compiled defaults, then environment variables, then the
//! optional TOML file. The file is an overlay: keys it leaves out keep
//! their environment or default values.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Connection settings for the DOMS repository
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DomsConfig {
    pub username: String,
    pub password: String,
    pub url: String,
    pub pidgenerator_url: String,
}

impl Default for DomsConfig {
    fn default() -> Self {
        Self {
            username: "fedoraAdmin".to_string(),
            password: "fedoraAdminPass".to_string(),
            url: "http://achernar:7880/fedora".to_string(),
            pidgenerator_url: "http://achernar:7880/pidgenerator-service".to_string(),
        }
    }
}

/// Settings for reading source files
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Charset label of the source files (WHATWG encoding registry)
    pub charset: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            charset: "cp1252".to_string(),
        }
    }
}

/// Full ingest configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IngestConfig {
    pub doms: DomsConfig,
    pub source: SourceConfig,
}

/// Partial configuration as read from a TOML file; absent keys leave the
/// underlying value untouched
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct FileConfig {
    doms: FileDomsConfig,
    source: FileSourceConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct FileDomsConfig {
    username: Option<String>,
    password: Option<String>,
    url: Option<String>,
    pidgenerator_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct FileSourceConfig {
    charset: Option<String>,
}

impl IngestConfig {
    /// Load configuration: defaults, overlaid by the environment,
    /// overlaid by the optional file
    pub fn load(file: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = Self::default();
        config.overlay_env(|key| std::env::var(key).ok());

        if let Some(path) = file {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            let overlay: FileConfig = toml::from_str(&content)
                .with_context(|| format!("parsing config file {}", path.display()))?;
            config.overlay_file(overlay);
        }

        Ok(config)
    }

    /// Apply overrides from a key lookup (environment variables in
    /// production, a map in tests)
    fn overlay_env(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(value) = get("DOMS_USERNAME") {
            self.doms.username = value;
        }
        if let Some(value) = get("DOMS_PASSWORD") {
            self.doms.password = value;
        }
        if let Some(value) = get("DOMS_URL") {
            self.doms.url = value;
        }
        if let Some(value) = get("DOMS_PIDGENERATOR_URL") {
            self.doms.pidgenerator_url = value;
        }
        if let Some(value) = get("SOURCE_CHARSET") {
            self.source.charset = value;
        }
    }

    /// Apply the keys present in a configuration file
    fn overlay_file(&mut self, overlay: FileConfig) {
        if let Some(value) = overlay.doms.username {
            self.doms.username = value;
        }
        if let Some(value) = overlay.doms.password {
            self.doms.password = value;
        }
        if let Some(value) = overlay.doms.url {
            self.doms.url = value;
        }
        if let Some(value) = overlay.doms.pidgenerator_url {
            self.doms.pidgenerator_url = value;
        }
        if let Some(value) = overlay.source.charset {
            self.source.charset = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(env: &'a HashMap<&'a str, &'a str>) -> impl Fn(&str) -> Option<String> + 'a {
        |key| env.get(key).map(|v| v.to_string())
    }

    #[test]
    fn test_defaults() {
        let config = IngestConfig::default();
        assert_eq!(config.doms.username, "fedoraAdmin");
        assert_eq!(config.doms.password, "fedoraAdminPass");
        assert_eq!(config.doms.url, "http://achernar:7880/fedora");
        assert_eq!(
            config.doms.pidgenerator_url,
            "http://achernar:7880/pidgenerator-service"
        );
        assert_eq!(config.source.charset, "cp1252");
    }

    #[test]
    fn test_partial_file_overlays_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ingest.toml");
        std::fs::write(
            &path,
            "[doms]\nurl = \"http://doms.example.org/fedora\"\n\n[source]\ncharset = \"iso-8859-1\"\n",
        )
        .unwrap();

        let config = IngestConfig::load(Some(&path)).unwrap();

        assert_eq!(config.doms.url, "http://doms.example.org/fedora");
        assert_eq!(config.source.charset, "iso-8859-1");
        // untouched keys keep their defaults
        assert_eq!(config.doms.username, "fedoraAdmin");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(IngestConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let env: HashMap<&str, &str> = [
            ("DOMS_USERNAME", "operator"),
            ("SOURCE_CHARSET", "windows-1252"),
        ]
        .into_iter()
        .collect();

        let mut config = IngestConfig::default();
        config.overlay_env(lookup(&env));

        assert_eq!(config.doms.username, "operator");
        assert_eq!(config.source.charset, "windows-1252");
        assert_eq!(config.doms.password, "fedoraAdminPass");
    }

    #[test]
    fn test_file_overrides_environment() {
        let env: HashMap<&str, &str> = [
            ("DOMS_USERNAME", "operator"),
            ("DOMS_URL", "http://env.example.org/fedora"),
        ]
        .into_iter()
        .collect();

        let mut config = IngestConfig::default();
        config.overlay_env(lookup(&env));

        let overlay: FileConfig =
            toml::from_str("[doms]\nurl = \"http://file.example.org/fedora\"\n").unwrap();
        config.overlay_file(overlay);

        // the file wins where it speaks
        assert_eq!(config.doms.url, "http://file.example.org/fedora");
        // environment values survive for keys the file leaves out
        assert_eq!(config.doms.username, "operator");
    }
}
