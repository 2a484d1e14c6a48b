//! Layered TOML configuration.
//!
//! A configuration is stored in a main directory that is shared between all robots, and can be
//! partially overridden by a file with the same name in an overlay directory. Tables are merged
//! recursively, every other value in the overlay replaces the value in the main file.

mod error;

use std::{fs, path::Path};

use serde::de::DeserializeOwned;
use toml::Table;

pub use error::{ConfigKind, Error, ErrorKind, Result};

/// A configuration struct that can be loaded from a TOML file.
///
/// # Example
///
/// ```no_run
/// use odal::Config;
/// use serde::Deserialize;
///
/// #[derive(Debug, Deserialize)]
/// #[serde(deny_unknown_fields)]
/// pub struct MeowConfig {
///     count: u32,
/// }
///
/// impl Config for MeowConfig {
///     const PATH: &'static str = "meow.toml";
/// }
///
/// // Loads `config/meow.toml`, with `config/overlay/nao/meow.toml` on top.
/// let config = MeowConfig::load_with_overlay("config".as_ref(), "config/overlay/nao".as_ref());
/// ```
pub trait Config: DeserializeOwned {
    /// Path of the configuration file, relative to the configuration directories.
    const PATH: &'static str;

    /// Load the configuration from the main directory only.
    fn load(main_dir: &Path) -> Result<Self> {
        let table = read_table::<Self>(main_dir, ConfigKind::Main)?;
        deserialize(table)
    }

    /// Load the configuration from the main directory, with the overlay merged on top.
    ///
    /// Fails with [`ConfigKind::Overlay`] if the overlay file cannot be read, callers that
    /// treat the overlay as optional can fall back to [`Config::load`].
    fn load_with_overlay(main_dir: &Path, overlay_dir: &Path) -> Result<Self> {
        let main = read_table::<Self>(main_dir, ConfigKind::Main)?;
        let overlay = read_table::<Self>(overlay_dir, ConfigKind::Overlay)?;
        deserialize(merge(main, overlay))
    }
}

/// Merge `overlay` into `main`.
///
/// Nested tables are merged key by key, any other value in `overlay` replaces the value in
/// `main`. Keys that only exist in `overlay` are added.
#[must_use]
pub fn merge(mut main: Table, overlay: Table) -> Table {
    for (key, value) in overlay {
        let merged = match (main.remove(&key), value) {
            (Some(toml::Value::Table(main_table)), toml::Value::Table(overlay_table)) => {
                toml::Value::Table(merge(main_table, overlay_table))
            }
            (_, value) => value,
        };
        main.insert(key, merged);
    }

    main
}

fn read_table<T: Config>(dir: &Path, config_kind: ConfigKind) -> Result<Table> {
    let path = dir.join(T::PATH);
    let error = |kind| Error { name: T::PATH, kind };

    let contents = fs::read_to_string(&path).map_err(|source| {
        error(ErrorKind::Load {
            path: path.clone(),
            config_kind,
            source,
        })
    })?;

    contents.parse::<Table>().map_err(|source| {
        error(ErrorKind::Parse {
            path,
            config_kind,
            source,
        })
    })
}

fn deserialize<T: Config>(table: Table) -> Result<T> {
    toml::Value::Table(table)
        .try_into()
        .map_err(|source| Error {
            name: T::PATH,
            kind: ErrorKind::Deserialize(source),
        })
}
