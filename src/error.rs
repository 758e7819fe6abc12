//! Error handler for lmnuser.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Enum representing errors raised while building a user.
#[derive(Debug, Error)]
pub enum Error {
    #[error("permission entry `{entry}` is not formatted as `module: value`")]
    MalformedPermission { entry: String },

    #[error("missing required attribute: {0}")]
    MissingAttribute(String),

    #[error("users filter `{0}` must contain `{{uid}}`")]
    InvalidFilter(String),

    #[error("invalid configuration file")]
    Config(#[from] serde_yaml::Error),
}
