//! Error types for resource preparation.

use std::path::PathBuf;

/// Errors that can occur while loading configuration or rewriting plists.
#[derive(Debug)]
pub enum Error {
    /// A file could not be read or written.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The project has neither `config.toml` nor `config.h`.
    MissingConfig { project_dir: PathBuf },
    /// The build configuration did not deserialize (missing or mistyped key).
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// A version string is not in `major.minor.patch` form.
    Version(String),
    /// A plist could not be decoded or encoded.
    Plist {
        path: PathBuf,
        source: plist::Error,
    },
    /// The plist root is not a dictionary.
    NotADictionary { path: PathBuf },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::MissingConfig { project_dir } => write!(
                f,
                "no config.toml or config.h found in {}",
                project_dir.display()
            ),
            Self::Config { path, source } => {
                write!(f, "invalid build configuration {}: {source}", path.display())
            }
            Self::Version(msg) => write!(f, "invalid version: {msg}"),
            Self::Plist { path, source } => write!(f, "plist {}: {source}", path.display()),
            Self::NotADictionary { path } => {
                write!(f, "plist {} does not have a dictionary root", path.display())
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Config { source, .. } => Some(source),
            Self::Plist { source, .. } => Some(source),
            Self::MissingConfig { .. } | Self::Version(_) | Self::NotADictionary { .. } => None,
        }
    }
}

/// Result type for resource preparation.
pub type Result<T> = std::result::Result<T, Error>;
