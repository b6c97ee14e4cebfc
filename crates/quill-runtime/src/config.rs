use crate::controller::Controller;
use crate::options::Options;
use crate::sink::{FileSink, StderrSink, StdoutSink};
use crate::{Error, Result};
use quill_types::{shared, DisplayUpdate, ModeOptions};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Resolve the configuration file path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. QUILL_CONFIG environment variable (with tilde expansion)
/// 3. System config directory (recommended default)
/// 4. ~/.quill.toml (fallback for systems without a standard config directory)
pub fn resolve_config_path(explicit_path: Option<&str>) -> Result<PathBuf> {
    // Priority 1: Explicit path
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    // Priority 2: QUILL_CONFIG environment variable
    if let Ok(env_path) = std::env::var("QUILL_CONFIG") {
        return Ok(expand_tilde(&env_path));
    }

    // Priority 3: System config directory (recommended default)
    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("quill").join("config.toml"));
    }

    // Priority 4: Fallback to ~/.quill.toml
    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".quill.toml"));
    }

    Err(Error::Config(
        "Could not determine config path: no HOME directory or system config directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

/// File-based configuration, mirroring the batch `Options` surface.
///
/// Output destinations are named by target (bare name or `"section/type"`
/// path) and map to `"stdout"`, `"stderr"`, or a file path opened in
/// append mode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub groups: HashMap<String, Vec<String>>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub outputs: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub formats: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub modes: HashMap<String, ModeOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_by_default: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hide: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub show: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayUpdate>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::default_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn default_path() -> Result<PathBuf> {
        resolve_config_path(None)
    }

    /// Convert into batch options. Opening a file output is the fallible
    /// step; everything else is carried over verbatim, in sorted key order
    /// for deterministic application.
    pub fn into_options(self) -> Result<Options> {
        let mut options = Options::new();

        let mut groups: Vec<_> = self.groups.into_iter().collect();
        groups.sort_by(|a, b| a.0.cmp(&b.0));
        for (name, members) in groups {
            options = options.group(name, members);
        }

        let mut outputs: Vec<_> = self.outputs.into_iter().collect();
        outputs.sort_by(|a, b| a.0.cmp(&b.0));
        for (target, destination) in outputs {
            let sink = match destination.as_str() {
                "stdout" => shared(StdoutSink),
                "stderr" => shared(StderrSink),
                path => shared(FileSink::append(expand_tilde(path))?),
            };
            options = options.output_shared(target, sink);
        }

        let mut formats: Vec<_> = self.formats.into_iter().collect();
        formats.sort_by(|a, b| a.0.cmp(&b.0));
        for (log_type, template) in formats {
            options = options.format(log_type, template);
        }

        let mut modes: Vec<_> = self.modes.into_iter().collect();
        modes.sort_by(|a, b| a.0.cmp(&b.0));
        for (name, mode_options) in modes {
            options = options.mode_definition(name, mode_options);
        }

        if let Some(mode) = self.mode {
            options = options.mode(mode);
        }
        if let Some(flag) = self.show_by_default {
            options = options.show_by_default(flag);
        }
        for target in self.hide {
            options = options.hide(target);
        }
        for target in self.show {
            options = options.show(target);
        }
        if let Some(display) = self.display {
            options = options.display(display);
        }

        Ok(options)
    }

    /// Load-and-apply convenience: `configure` with this file's contents.
    pub fn apply(self, controller: &Controller) -> Result<()> {
        controller.configure(self.into_options()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default_is_empty() {
        let config = Config::default();
        assert!(config.groups.is_empty());
        assert!(config.mode.is_none());
    }

    #[test]
    fn test_config_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config
            .groups
            .insert("web".to_string(), vec!["http".to_string(), "router".to_string()]);
        config
            .formats
            .insert("simple".to_string(), "{{message}}".to_string());
        config.mode = Some("quiet".to_string());
        config.modes.insert(
            "quiet".to_string(),
            ModeOptions::new().show_by_default(false).show("web"),
        );
        config.save_to(&config_path)?;

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded.groups["web"], vec!["http", "router"]);
        assert_eq!(loaded.formats["simple"], "{{message}}");
        assert_eq!(loaded.mode.as_deref(), Some("quiet"));
        assert_eq!(loaded.modes["quiet"].show, vec!["web"]);
        Ok(())
    }

    #[test]
    fn test_missing_file_loads_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config = Config::load_from(&temp_dir.path().join("nope.toml"))?;
        assert!(config.formats.is_empty());
        Ok(())
    }

    #[test]
    fn test_unopenable_output_is_loud() {
        let mut config = Config::default();
        config.outputs.insert(
            "db".to_string(),
            "/definitely/not/a/dir/out.log".to_string(),
        );
        assert!(config.into_options().is_err());
    }
}
