//! Configuration file loading with an embedded fallback
//!
//! - If `CONFIG_FILE` is NOT set: use the embedded `config.yaml` only
//! - If `CONFIG_FILE` IS set and the file exists: use it
//! - If `CONFIG_FILE` IS set and the file is missing: fall back to embedded

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
struct EmbeddedConfig;

const CONFIG_NAME: &str = "config.yaml";

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    File(PathBuf),
    Embedded,
    /// `CONFIG_FILE` points at a path that does not exist.
    EmbeddedMissingFile(PathBuf),
}

impl std::fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigOrigin::File(path) => write!(f, "{}", path.display()),
            ConfigOrigin::Embedded => write!(f, "embedded"),
            ConfigOrigin::EmbeddedMissingFile(path) => {
                write!(f, "embedded ({} not found)", path.display())
            }
        }
    }
}

/// Outcome of `inkseal init`.
#[derive(Debug, PartialEq, Eq)]
pub enum InitOutcome {
    Written(PathBuf),
    Skipped(PathBuf),
}

/// Config loader with optional filesystem override
#[derive(Debug, Clone, Default)]
pub struct ConfigSource {
    /// External config file path (from CONFIG_FILE env var)
    config_file: Option<PathBuf>,
}

impl ConfigSource {
    /// `config_file` should be `Some` only if `CONFIG_FILE` was set.
    pub fn new(config_file: Option<PathBuf>) -> Self {
        Self { config_file }
    }

    /// Read `CONFIG_FILE` from the environment.
    pub fn from_env() -> Self {
        Self::new(std::env::var("CONFIG_FILE").ok().map(PathBuf::from))
    }

    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    pub fn origin(&self) -> ConfigOrigin {
        match &self.config_file {
            Some(path) if path.exists() => ConfigOrigin::File(path.clone()),
            Some(path) => ConfigOrigin::EmbeddedMissingFile(path.clone()),
            None => ConfigOrigin::Embedded,
        }
    }

    /// The embedded default, byte for byte.
    pub fn embedded() -> io::Result<Cow<'static, [u8]>> {
        EmbeddedConfig::get(CONFIG_NAME)
            .map(|f| f.data)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml not found"))
    }

    /// Read the config file
    pub fn read_config(&self) -> io::Result<Cow<'static, [u8]>> {
        if let Some(ref path) = self.config_file {
            if path.exists() {
                tracing::trace!(path = %path.display(), "Loading config from filesystem");
                return Ok(Cow::Owned(fs::read(path)?));
            }
        }

        tracing::trace!("Loading config from embedded assets");
        Self::embedded()
    }

    /// Read config as a UTF-8 string
    pub fn read_config_string(&self) -> io::Result<String> {
        let bytes = self.read_config()?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Write the embedded config to the configured path (or `./config.yaml`)
    /// so it can be customized.
    pub fn init(&self, force: bool) -> io::Result<InitOutcome> {
        let path = self
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(CONFIG_NAME));

        if !force && path.exists() {
            return Ok(InitOutcome::Skipped(path));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &*Self::embedded()?)?;
        tracing::info!(path = %path.display(), "Wrote default config");
        Ok(InitOutcome::Written(path))
    }
}
