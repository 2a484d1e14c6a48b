//! Result and Error types for the crate.
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result containing an error variant from this module.
pub type Result<T> = std::result::Result<T, Error>;

/// Which of the layered files an error originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKind {
    /// The shared configuration file.
    Main,
    /// The robot specific overlay on top of the main file.
    Overlay,
}

impl std::fmt::Display for ConfigKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigKind::Main => write!(f, "main"),
            ConfigKind::Overlay => write!(f, "overlay"),
        }
    }
}

/// Error raised while loading the configuration `name`.
#[derive(Error, Diagnostic, Debug)]
#[error("failed to load config `{name}`")]
pub struct Error {
    pub name: &'static str,
    #[source]
    #[diagnostic_source]
    pub kind: ErrorKind,
}

/// Configuration error variants
#[derive(Error, Diagnostic, Debug)]
pub enum ErrorKind {
    /// The file could not be read, this wraps a [`std::io::Error`].
    #[error("failed to read {config_kind} config from `{}`", path.display())]
    Load {
        path: PathBuf,
        config_kind: ConfigKind,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML, this wraps a [`toml::de::Error`].
    #[error("failed to parse {config_kind} config `{}`", path.display())]
    #[diagnostic(help("check the TOML syntax of the file"))]
    Parse {
        path: PathBuf,
        config_kind: ConfigKind,
        #[source]
        source: toml::de::Error,
    },

    /// The merged table does not match the configuration struct.
    #[error("merged config does not match the expected layout")]
    #[diagnostic(help("unknown or missing keys are reported by name"))]
    Deserialize(#[source] toml::de::Error),
}
