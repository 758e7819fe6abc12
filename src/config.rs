//! Configuration manager for lmnuser.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Related to directory lookups.
    #[serde(default)]
    pub ldap: Ldap,
    /// Related to logs output.
    #[serde(default)]
    pub logging: Logging,
    #[serde(skip)]
    path: PathBuf,
}

/// LDAP configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ldap {
    /// DN for domain.
    pub base_dn: String,
    /// School users are searched in.
    pub school: String,
    /// Replace default users filter. Must contain `{uid}`.
    pub users_filter: Option<String>,
}

impl Default for Ldap {
    fn default() -> Self {
        Self {
            base_dn: "DC=linuxmuster,DC=lan".into(),
            school: "default-school".into(),
            users_filter: None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Logging {
    /// Default filter when `RUST_LOG` is not set.
    pub level: String,
    pub format: LogFormat,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Console,
        }
    }
}

/// Output format of logs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Console,
    Json,
}

impl Configuration {
    pub fn path(mut self, path: PathBuf) -> Self {
        self.path = path;
        self
    }

    /// Parse a YAML configuration.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads the `config.yaml` file from the specified path or the default
    /// location.
    pub fn read(self) -> Self {
        let file_path = if self.path.is_file() {
            self.path.clone()
        } else {
            Path::new(DEFAULT_CONFIG_PATH).to_path_buf()
        };

        match File::open(&file_path) {
            Ok(file) => match serde_yaml::from_reader(file) {
                Ok(config) => Self {
                    path: file_path,
                    ..config
                },
                Err(err) => self.error(err),
            },
            Err(err) => self.error(err),
        }
    }

    /// Return a default configuration as fallback.
    fn error(&self, err: impl std::error::Error) -> Self {
        tracing::error!(error = %err, "cannot read `config.yaml`, using defaults");
        Self::default()
    }
}
