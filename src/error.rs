//! Error type shared by the preferences core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the accelerator, preset and configuration layers.
#[derive(Debug, Error)]
pub enum PrefsError {
    /// The localized path does not segment the same way as the canonical one.
    #[error("translation mismatch: `{canonical}' vs. `{localized}'")]
    TranslationMismatch { canonical: String, localized: String },

    #[error("empty accelerator path")]
    EmptyPath,

    #[error("accelerator path {0} clashes with an existing node")]
    PathShape(String),

    #[error("unknown accelerator: {0}")]
    UnknownAccelerator(String),

    #[error("invalid accelerator string: {0:?}")]
    InvalidAccelerator(String),

    #[error("preset {0} is write protected")]
    WriteProtected(i64),

    #[error("preset {0} not found")]
    PresetNotFound(i64),

    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    TomlParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("invalid preset parameters: {0}")]
    InvalidParams(#[from] hex::FromHexError),
}

impl PrefsError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PrefsError>;
