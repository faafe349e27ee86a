//! Configuration for the chronicle engine.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (CHRONICLE_LLM_URL, CHRONICLE_LLM_MODEL,
//!    CHRONICLE_SUMMARY_TIMEOUT_SECS, CHRONICLE_MAX_INPUT_BYTES)
//! 2. Config file (.chronicle/config.yaml)
//! 3. Defaults
//!
//! Config file discovery searches the current directory and its parents
//! for .chronicle/config.yaml.

use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::adapters::SummarizerConfig;
use crate::core::EngineOptions;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<std::result::Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub summarizer: SummarizerFileConfig,
    #[serde(default)]
    pub limits: LimitsFileConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummarizerFileConfig {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LimitsFileConfig {
    pub max_input_bytes: Option<usize>,
}

/// Resolved configuration after merging all sources
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Summarization service settings
    pub summarizer: SummarizerConfig,

    /// Per-call summarizer timeout
    pub summary_timeout: Duration,

    /// Maximum accepted document size in bytes
    pub max_input_bytes: usize,

    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Engine options derived from this configuration
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            summary_timeout: self.summary_timeout,
            max_input_bytes: self.max_input_bytes,
        }
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".chronicle").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Resolve configuration from all sources
fn resolve() -> Result<ResolvedConfig> {
    let config_file = find_config_file();

    let file: ConfigFile = match &config_file {
        Some(path) => load_file(path)?,
        None => ConfigFile::default(),
    };

    let defaults = SummarizerConfig::default();

    let base_url = std::env::var("CHRONICLE_LLM_URL")
        .ok()
        .or(file.summarizer.base_url)
        .unwrap_or(defaults.base_url);

    let model = std::env::var("CHRONICLE_LLM_MODEL")
        .ok()
        .or(file.summarizer.model)
        .unwrap_or(defaults.model);

    let timeout_seconds = env_parse("CHRONICLE_SUMMARY_TIMEOUT_SECS")?
        .or(file.summarizer.timeout_seconds)
        .unwrap_or(30);

    let max_input_bytes = env_parse("CHRONICLE_MAX_INPUT_BYTES")?
        .or(file.limits.max_input_bytes)
        .unwrap_or(1_048_576);

    Ok(ResolvedConfig {
        summarizer: SummarizerConfig { base_url, model },
        summary_timeout: Duration::from_secs(timeout_seconds),
        max_input_bytes,
        config_file,
    })
}

/// Read and parse one YAML config file
fn load_file(path: &std::path::Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Result<Option<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(value) => {
            let parsed = value
                .parse()
                .with_context(|| format!("Invalid value for {name}: '{value}'"))?;
            Ok(Some(parsed))
        }
        Err(_) => Ok(None),
    }
}

/// Access the resolved configuration, computing it on first use
pub fn config() -> Result<&'static ResolvedConfig> {
    let cached = CONFIG.get_or_init(|| resolve().map_err(|e| format!("{e:#}")));

    match cached {
        Ok(c) => Ok(c),
        Err(e) => anyhow::bail!("Configuration error: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_parsing() {
        let yaml = r#"
summarizer:
  base_url: http://localhost:8080
  model: test-model
  timeout_seconds: 10

limits:
  max_input_bytes: 4096
"#;
        let parsed: ConfigFile = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(
            parsed.summarizer.base_url.as_deref(),
            Some("http://localhost:8080")
        );
        assert_eq!(parsed.summarizer.model.as_deref(), Some("test-model"));
        assert_eq!(parsed.summarizer.timeout_seconds, Some(10));
        assert_eq!(parsed.limits.max_input_bytes, Some(4096));
    }

    #[test]
    fn test_partial_config_file() {
        let yaml = r#"
summarizer:
  model: only-the-model
"#;
        let parsed: ConfigFile = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(parsed.summarizer.model.as_deref(), Some("only-the-model"));
        assert!(parsed.summarizer.base_url.is_none());
        assert!(parsed.limits.max_input_bytes.is_none());
    }

    #[test]
    fn test_empty_config_file() {
        let parsed: ConfigFile = serde_yaml::from_str("{}").unwrap();
        assert!(parsed.summarizer.base_url.is_none());
    }

    #[test]
    fn test_load_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "summarizer:\n  model: disk-model\n").unwrap();

        let parsed = load_file(&path).unwrap();
        assert_eq!(parsed.summarizer.model.as_deref(), Some("disk-model"));
    }

    #[test]
    fn test_load_file_rejects_invalid_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "summarizer: [not a mapping").unwrap();

        assert!(load_file(&path).is_err());
    }
}
