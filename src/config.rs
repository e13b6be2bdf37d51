// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathwise-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathwise and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Portal configuration loaded from TOML.
//!
//! The config file is found in priority order:
//! 1. an explicit path (command line)
//! 2. the `PATHWISE_CONFIG` environment variable
//! 3. `./pathwise.toml` when it exists
//! 4. compiled defaults

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::checkpoint::SequentialGating;
use crate::store::{SnapshotFile, WriteDurability};

pub const CONFIG_ENV: &str = "PATHWISE_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "pathwise.toml";
pub const DEFAULT_SNAPSHOT_FILE: &str = "pathwise-snapshot.json";
pub const DEFAULT_LOG_FILTER: &str = "pathwise=info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("invalid config {path:?}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PortalConfig {
    /// Snapshot file holding the entity store.
    pub snapshot: PathBuf,
    /// fsync snapshot writes.
    pub durable_writes: bool,
    pub sequential_gating: SequentialGating,
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            snapshot: PathBuf::from(DEFAULT_SNAPSHOT_FILE),
            durable_writes: false,
            sequential_gating: SequentialGating::default(),
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

impl PortalConfig {
    pub fn from_toml_str(raw: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&raw, path)?;
        // A relative snapshot path is relative to the config file.
        if config.snapshot.is_relative() {
            if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
                config.snapshot = dir.join(&config.snapshot);
            }
        }
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Resolves and loads the configuration.
    ///
    /// An explicitly named file (argument or environment) must exist. The implicit
    /// `./pathwise.toml` is optional; without it the defaults apply.
    pub fn discover(cli_arg: Option<&Path>) -> Result<Self, ConfigError> {
        let env_value = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        match resolve_config_path(cli_arg, env_value, Path::new(DEFAULT_CONFIG_FILE)) {
            ConfigSource::Explicit(path) => Self::load(&path),
            ConfigSource::Implicit(path) => match Self::load(&path) {
                Err(ConfigError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                    debug!("no config file, using defaults");
                    Ok(Self::default())
                }
                other => other,
            },
        }
    }

    pub fn write_durability(&self) -> WriteDurability {
        if self.durable_writes {
            WriteDurability::Durable
        } else {
            WriteDurability::BestEffort
        }
    }

    pub fn snapshot_file(&self) -> SnapshotFile {
        SnapshotFile::new(&self.snapshot).with_durability(self.write_durability())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    Implicit(PathBuf),
}

pub fn resolve_config_path(
    cli_arg: Option<&Path>,
    env_value: Option<PathBuf>,
    default_path: &Path,
) -> ConfigSource {
    if let Some(path) = cli_arg {
        return ConfigSource::Explicit(path.to_path_buf());
    }
    match env_value {
        Some(path) if !path.as_os_str().is_empty() => ConfigSource::Explicit(path),
        _ => ConfigSource::Implicit(default_path.to_path_buf()),
    }
}
