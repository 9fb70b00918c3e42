//! Configuration for learnmap.
//!
//! The documented defaults in `defaults/learnmap.default.toml` are compiled in, so a bare
//! `learnmap <id>` talks to platform.quip.com with `QUIP_TOKEN` / `~/.quiprc`. A user TOML file
//! can replace any subset of keys.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/learnmap.default.toml");

/// Top-level configuration consumed by learnmap.
#[derive(Debug, Clone, Deserialize)]
pub struct LearnmapConfig {
    pub quip: QuipConfig,
}

/// Where documents and credentials come from.
#[derive(Debug, Clone, Deserialize)]
pub struct QuipConfig {
    pub api_base: String,
    pub token_env: String,
    pub rc_file: String,
    pub preferred_site: String,
}

impl QuipConfig {
    /// REST endpoint for one thread (document).
    pub fn thread_url(&self, document_id: &str) -> String {
        format!("{}/threads/{}", self.api_base.trim_end_matches('/'), document_id)
    }
}

/// Builds a [`LearnmapConfig`] from the embedded defaults plus any user files.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a TOML file over what is already loaded. The file must exist.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    pub fn build(self) -> Result<LearnmapConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Defaults, optionally overlaid with the user file at `path`.
pub fn load(path: Option<&Path>) -> Result<LearnmapConfig, ConfigError> {
    match path {
        Some(path) => Loader::new().with_file(path).build(),
        None => Loader::new().build(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load(None).expect("defaults to deserialize");
        assert_eq!(config.quip.api_base, "https://platform.quip.com/1");
        assert_eq!(config.quip.token_env, "QUIP_TOKEN");
        assert_eq!(config.quip.rc_file, ".quiprc");
        assert_eq!(config.quip.preferred_site, "quip.com");
    }

    #[test]
    fn user_file_overrides_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[quip]\napi_base = \"http://localhost:8080/1/\"").unwrap();

        let config = load(Some(file.path())).unwrap();
        assert_eq!(config.quip.api_base, "http://localhost:8080/1/");
        assert_eq!(config.quip.preferred_site, "quip.com");
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let result = Loader::new()
            .with_file("/nonexistent/learnmap.toml")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn user_file_must_be_valid_toml() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[quip\napi_base = ").unwrap();
        assert!(load(Some(file.path())).is_err());
    }

    #[test]
    fn thread_url_joins_without_double_slash() {
        let mut config = load(None).unwrap().quip;
        assert_eq!(
            config.thread_url("AbCd123"),
            "https://platform.quip.com/1/threads/AbCd123"
        );
        config.api_base = "http://localhost:8080/1/".to_string();
        assert_eq!(
            config.thread_url("x"),
            "http://localhost:8080/1/threads/x"
        );
    }
}
