//! Command surface of the `entity_sync` tool.
//!
//! # Responsibility
//! - Parse commands and store settings from flags or `ENTITY_SYNC_*` env vars.
//! - Run one command against the staging store and report a status.
//!
//! # Invariants
//! - `show` prints pretty JSON on a hit and `not found: <id>` on a miss.
//! - Exit codes: `0` success, `1` entity not found, `2` any error.

use clap::{Args, Parser, Subcommand};
use entity_sync_core::config::DEFAULT_DB_FILE_NAME;
use entity_sync_core::db::open_db;
use entity_sync_core::{
    core_version, default_log_level, parse_log_dir, parse_log_level, signature_type_name,
    EntityRepository, SqliteEntityRepository, SyncConfig,
};
use log::info;
use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

/// Exit code for usage, parse and store errors.
pub const ERROR_EXIT_CODE: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "entity_sync", version, about = "Inspect staged ledger entities")]
pub struct Cli {
    #[command(flatten)]
    pub store: StoreArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Args)]
pub struct StoreArgs {
    /// Staging database file
    #[arg(long, env = "ENTITY_SYNC_DB_PATH", default_value = DEFAULT_DB_FILE_NAME, global = true)]
    pub db_path: PathBuf,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, env = "ENTITY_SYNC_LOG_LEVEL", value_parser = parse_log_level, global = true)]
    pub log_level: Option<&'static str>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, env = "ENTITY_SYNC_LOG_DIR", value_parser = parse_log_dir, global = true)]
    pub log_dir: Option<PathBuf>,
}

impl StoreArgs {
    pub fn into_config(self) -> SyncConfig {
        SyncConfig {
            db_path: self.db_path,
            log_level: self.log_level.unwrap_or_else(default_log_level),
            log_dir: self.log_dir,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the core library version
    Ping,
    /// Print one staged entity as JSON
    Show {
        /// `shard.realm.num` or a bare entity number
        id: String,
    },
    /// Print the name of a signature type code
    Sigtype {
        #[arg(allow_negative_numbers = true)]
        code: i64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    NotFound,
}

impl Status {
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::NotFound => 1,
        }
    }
}

/// Runs `command`, writing its report to `out`.
pub fn run(
    command: &Command,
    config: &SyncConfig,
    out: &mut impl Write,
) -> Result<Status, Box<dyn Error>> {
    match command {
        Command::Ping => {
            writeln!(out, "entity_sync_core version={}", core_version())?;
            Ok(Status::Success)
        }
        Command::Sigtype { code } => {
            writeln!(out, "{}", signature_type_name(*code))?;
            Ok(Status::Success)
        }
        Command::Show { id } => show(id, config, out),
    }
}

fn show(id: &str, config: &SyncConfig, out: &mut impl Write) -> Result<Status, Box<dyn Error>> {
    let conn = open_db(&config.db_path)?;
    let repo = SqliteEntityRepository::try_new(&conn)?;
    match repo.fetch_entity(id)? {
        Some(record) => {
            writeln!(out, "{}", serde_json::to_string_pretty(&record)?)?;
            Ok(Status::Success)
        }
        None => {
            info!("event=cli_show module=cli status=not_found entity_id={id}");
            writeln!(out, "not found: {id}")?;
            Ok(Status::NotFound)
        }
    }
}
