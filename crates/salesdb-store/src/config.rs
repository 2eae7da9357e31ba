//! Connection configuration
//!
//! Connection parameters arrive either as a plain string mapping
//! (`DbConfig::from_properties`) or through the layered loader
//! (`load_config`), which reads, in order:
//! 1. built-in defaults
//! 2. `db.properties` / `salesdb.toml` in the working directory, or an explicit file
//! 3. `.env` (loaded into the process environment)
//! 4. environment variables with the `SALESDB_` prefix (e.g. `SALESDB_URL`)

use crate::errors::{config_error, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// URL selecting a private in-memory database
pub const MEMORY_URL: &str = ":memory:";

const DEFAULT_URL: &str = "salesdb.db";
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
const ENV_PREFIX: &str = "SALESDB";
const PROPERTY_KEYS: [&str; 6] = [
    "url",
    "dburl",
    "create_if_missing",
    "foreign_keys",
    "busy_timeout_ms",
    "journal_mode",
];

/// Parameters for opening the store connection
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DbConfig {
    /// Database location: a file path, `sqlite:<path>`, or `:memory:`.
    /// Sources may spell the key `dburl`; `url` wins when both are set.
    pub url: String,

    /// Create the database file when it does not exist
    pub create_if_missing: bool,

    /// Enforce `seller.DepartmentId -> department.Id`
    ///
    /// With enforcement off, a seller can be inserted with a department id
    /// that has no row. Seller reads join on `department`, so such a seller
    /// is then invisible: `find_by_id` reports `NotFound` and the list
    /// operations skip it.
    pub foreign_keys: bool,

    /// How long a statement waits on a locked database before failing
    pub busy_timeout_ms: u64,

    /// Optional `PRAGMA journal_mode` value (e.g. `wal`, `delete`)
    pub journal_mode: Option<String>,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            create_if_missing: true,
            foreign_keys: true,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            journal_mode: None,
        }
    }
}

/// Where a configuration points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Memory,
    File(PathBuf),
}

impl DbConfig {
    /// Configuration for a fresh in-memory database
    pub fn in_memory() -> Self {
        Self {
            url: MEMORY_URL.to_string(),
            ..Self::default()
        }
    }

    /// Configuration for a database file
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self {
            url: path.as_ref().to_string_lossy().into_owned(),
            ..Self::default()
        }
    }

    /// Build a configuration from a string mapping such as a parsed
    /// `db.properties`. Unknown keys are ignored; missing keys keep defaults.
    /// Values go through the same conversion as [`load_config`].
    ///
    /// Recognized keys: `url` (alias `dburl`), `create_if_missing`,
    /// `foreign_keys`, `busy_timeout_ms`, `journal_mode`.
    ///
    /// # Errors
    ///
    /// `Configuration` if a value cannot be parsed or the url is empty.
    pub fn from_properties(props: &HashMap<String, String>) -> Result<Self> {
        let mut builder = Config::builder();
        for key in PROPERTY_KEYS {
            if let Some(value) = props.get(key) {
                builder = builder
                    .set_override(key, value.as_str())
                    .map_err(|e| config_error(key, e.to_string()))?;
            }
        }
        deserialize(builder)
    }

    /// Trim the url, drop a blank journal mode, then validate
    fn normalized(mut self) -> Result<Self> {
        self.url = self.url.trim().to_string();
        self.journal_mode = self
            .journal_mode
            .map(|mode| mode.trim().to_string())
            .filter(|mode| !mode.is_empty());
        self.validate()?;
        Ok(self)
    }

    /// Check the configuration for values that can never open a connection
    ///
    /// # Errors
    ///
    /// `Configuration` if the url is empty or the journal mode is unknown.
    pub fn validate(&self) -> Result<()> {
        self.target()?;
        if let Some(mode) = &self.journal_mode {
            const MODES: [&str; 6] = ["delete", "truncate", "persist", "memory", "wal", "off"];
            if !MODES.contains(&mode.to_ascii_lowercase().as_str()) {
                return Err(config_error(
                    "journal_mode",
                    format!("unknown journal mode: {}", mode),
                ));
            }
        }
        Ok(())
    }

    /// Resolve the url into a database location
    ///
    /// # Errors
    ///
    /// `Configuration` if the url is empty.
    pub fn target(&self) -> Result<Target> {
        let url = self.url.trim();
        let path = url
            .strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("sqlite:"))
            .unwrap_or(url);

        if path.is_empty() {
            return Err(config_error("url", "must not be empty"));
        }
        if path == MEMORY_URL {
            return Ok(Target::Memory);
        }
        Ok(Target::File(PathBuf::from(path)))
    }
}

/// Load the connection configuration from layered sources.
///
/// With `path = None` the loader looks for `db.properties` and
/// `salesdb.toml` in the working directory; both are optional. An explicit
/// path must exist. Files ending in `.properties` are read as `key=value`
/// lines; other extensions are detected by the `config` crate.
///
/// # Errors
///
/// `Configuration` if a source cannot be read or a value is malformed.
pub fn load_config(path: Option<&Path>) -> Result<DbConfig> {
    if let Err(e) = dotenvy::dotenv() {
        debug!("No .env file loaded: {}", e);
    }

    let mut builder = Config::builder();

    match path {
        Some(path) => {
            debug!("Loading config from: {}", path.display());
            builder = builder.add_source(file_source(path).required(true));
        }
        None => {
            builder = builder
                .add_source(File::new("db.properties", FileFormat::Ini).required(false))
                .add_source(File::new("salesdb.toml", FileFormat::Toml).required(false));
        }
    }

    // SALESDB_URL -> url; `__` only separates nested keys
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = deserialize(builder)?;
    debug!(url = %config.url, "configuration loaded");
    Ok(config)
}

fn deserialize(builder: ConfigBuilder<DefaultState>) -> Result<DbConfig> {
    let settings = builder
        .build()
        .map_err(|e| config_error("source", e.to_string()))?;

    let mut config: DbConfig = settings
        .clone()
        .try_deserialize()
        .map_err(|e| config_error("source", e.to_string()))?;

    if settings.get_string("url").is_err() {
        if let Ok(url) = settings.get_string("dburl") {
            config.url = url;
        }
    }
    config.normalized()
}

fn file_source(path: &Path) -> File<config::FileSourceFile, FileFormat> {
    let name = path.to_string_lossy();
    match path.extension().and_then(|e| e.to_str()) {
        Some("properties") | Some("ini") => File::new(&name, FileFormat::Ini),
        Some("json") => File::new(&name, FileFormat::Json),
        _ => File::new(&name, FileFormat::Toml),
    }
}
