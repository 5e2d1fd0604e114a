//! Project configuration: `kryo.toml`, loaded from a project directory.
//!
//! Unlike the two-file project/workspace split some UI toolchains use,
//! this adapter's persistent settings are small enough for one file —
//! the default compile mode new instances use and the hot-reload
//! debounce interval.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

fn default_compile_mode() -> String {
    "runtime".to_string()
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_entry() -> String {
    "src/main.kry".to_string()
}

/// `kryo.toml` project configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct KryoConfig {
    pub project: ProjectMetadata,
    #[serde(default)]
    pub build: BuildConfig,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ProjectMetadata {
    pub name: String,
    #[serde(default)]
    pub authors: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct BuildConfig {
    /// Entry point source file, relative to the project root.
    #[serde(default = "default_entry")]
    pub entry: String,
    /// Default lowering compile mode for `kryo run`/`kryo watch`.
    #[serde(default = "default_compile_mode")]
    pub compile_mode: String,
    /// Hot-reload debounce interval in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self { entry: default_entry(), compile_mode: default_compile_mode(), debounce_ms: default_debounce_ms() }
    }
}

impl KryoConfig {
    /// Load `kryo.toml` from a project directory. Missing file yields
    /// the default configuration rather than an error — the CLI is
    /// usable against a bare `.kry` file with no project wrapper.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let path = dir.join("kryo.toml");
        if !path.exists() {
            return Ok(Self { project: ProjectMetadata { name: "kryo_app".to_string(), authors: Vec::new() }, build: BuildConfig::default() });
        }
        let content = fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_file_yields_defaults() {
        let dir = std::env::temp_dir();
        let config = KryoConfig::load_from_dir(&dir).unwrap();
        assert_eq!(config.build.debounce_ms, 500);
    }

    #[test]
    fn parses_a_minimal_toml_file() {
        let toml = "[project]\nname = \"demo\"\n\n[build]\nentry = \"src/app.kry\"\n";
        let config: KryoConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.project.name, "demo");
        assert_eq!(config.build.entry, "src/app.kry");
        assert_eq!(config.build.compile_mode, "runtime");
    }
}
