//! Subcommands and the state they share

pub mod department;
pub mod init;
pub mod seller;

use salesdb_store::{load_config, DaoFactory, DbConfig};
use serde::Serialize;
use std::fmt::Display;
use std::path::Path;
use tracing::debug;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Resolved global options
#[derive(Debug)]
pub struct Context {
    pub config: DbConfig,
    pub json: bool,
}

impl Context {
    /// Load the layered configuration and apply `--db` on top
    pub fn load(
        config_path: Option<&Path>,
        db: Option<&str>,
        json: bool,
    ) -> salesdb_core::Result<Self> {
        let mut config = load_config(config_path)?;
        if let Some(url) = db {
            config.url = url.to_string();
            config.validate()?;
        }
        debug!(url = %config.url, "cli configuration resolved");
        Ok(Self { config, json })
    }

    pub fn factory(&self) -> DaoFactory {
        DaoFactory::new(self.config.clone())
    }

    pub fn print_one<T: Serialize + Display>(&self, value: &T) -> CommandResult {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", value);
        }
        Ok(())
    }

    pub fn print_many<T: Serialize + Display>(&self, values: &[T], empty: &str) -> CommandResult {
        if self.json {
            println!("{}", serde_json::to_string_pretty(values)?);
        } else if values.is_empty() {
            println!("{}", empty);
        } else {
            for value in values {
                println!("{}", value);
            }
        }
        Ok(())
    }

    /// Report the outcome of an idempotent delete
    pub fn print_deleted(&self, entity: &str, id: i64, deleted: bool) -> CommandResult {
        if self.json {
            let body = serde_json::json!({ "entity": entity, "id": id, "deleted": deleted });
            println!("{}", serde_json::to_string_pretty(&body)?);
        } else if deleted {
            println!("Deleted {} {}", entity, id);
        } else {
            println!("No {} with id {}", entity, id);
        }
        Ok(())
    }
}
