use clap::error::ErrorKind;
use clap::Parser;
use entity_sync_cli::{run, Cli, Command, Status, ERROR_EXIT_CODE};
use entity_sync_core::db::open_db;
use entity_sync_core::SyncConfig;
use rusqlite::params;
use std::path::Path;

fn seed_store(path: &Path) {
    let conn = open_db(path).unwrap();
    conn.execute(
        "INSERT INTO t_entities_bkup (
            id,
            entity_shard,
            entity_realm,
            entity_num,
            memo,
            auto_renew_period,
            proxy_account_id
        ) VALUES (?1, 0, 0, ?2, ?3, 7776000, 98);",
        params![1_i64, 1234_i64, "treasury"],
    )
    .unwrap();
}

fn config_for(path: &Path) -> SyncConfig {
    SyncConfig {
        db_path: path.to_path_buf(),
        ..SyncConfig::default()
    }
}

fn run_to_string(command: Command, config: &SyncConfig) -> (Result<Status, String>, String) {
    let mut out = Vec::new();
    let result = run(&command, config, &mut out).map_err(|err| err.to_string());
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn show_prints_found_entity_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("staging.sqlite3");
    seed_store(&path);

    let (result, output) = run_to_string(
        Command::Show {
            id: "0.0.1234".to_string(),
        },
        &config_for(&path),
    );

    let status = result.unwrap();
    assert_eq!(status, Status::Success);
    assert_eq!(status.exit_code(), 0);
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["id"], 1);
    assert_eq!(json["entity_key"], "1234");
    assert_eq!(json["memo"], "treasury");
    assert_eq!(json["proxy_account_id"], 98);
}

#[test]
fn show_reports_missing_entity_with_exit_code_one() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("staging.sqlite3");
    seed_store(&path);

    let (result, output) = run_to_string(
        Command::Show {
            id: "5678".to_string(),
        },
        &config_for(&path),
    );

    let status = result.unwrap();
    assert_eq!(status, Status::NotFound);
    assert_eq!(status.exit_code(), 1);
    assert_eq!(output, "not found: 5678\n");
}

#[test]
fn show_fails_on_malformed_id() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("staging.sqlite3");
    seed_store(&path);

    let (result, output) = run_to_string(
        Command::Show {
            id: "1.2".to_string(),
        },
        &config_for(&path),
    );

    let message = result.unwrap_err();
    assert!(message.contains("1.2"), "{message}");
    assert!(output.is_empty());
    assert_eq!(ERROR_EXIT_CODE, 2);
}

#[test]
fn show_fails_when_store_cannot_be_opened() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("staging.sqlite3");

    let (result, _) = run_to_string(
        Command::Show {
            id: "1".to_string(),
        },
        &config_for(&path),
    );

    assert!(result.unwrap_err().contains("open"));
}

#[test]
fn sigtype_accepts_negative_codes() {
    let cli = Cli::try_parse_from(["entity_sync", "sigtype", "-1"]).unwrap();
    assert_eq!(cli.command, Command::Sigtype { code: -1 });

    let (result, output) = run_to_string(cli.command, &SyncConfig::default());
    assert_eq!(result.unwrap(), Status::Success);
    assert_eq!(output, "UNKNOWN\n");
}

#[test]
fn ping_prints_core_version() {
    let (result, output) = run_to_string(Command::Ping, &SyncConfig::default());
    assert_eq!(result.unwrap(), Status::Success);
    assert!(output.starts_with("entity_sync_core version="));
}

#[test]
fn flags_fill_store_settings() {
    let log_dir = std::env::temp_dir().join("entity-sync-cli-logs");
    let cli = Cli::try_parse_from([
        "entity_sync",
        "show",
        "7",
        "--db-path",
        "/tmp/staging.sqlite3",
        "--log-level",
        "WARNING",
        "--log-dir",
        log_dir.to_str().unwrap(),
    ])
    .unwrap();

    assert_eq!(
        cli.command,
        Command::Show {
            id: "7".to_string()
        }
    );
    let config = cli.store.into_config();
    assert_eq!(config.db_path, Path::new("/tmp/staging.sqlite3"));
    assert_eq!(config.log_level, "warn");
    assert_eq!(config.log_dir, Some(log_dir));
}

#[test]
fn parser_rejects_bad_input() {
    let err = Cli::try_parse_from(["entity_sync", "show"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

    let err = Cli::try_parse_from(["entity_sync", "--log-level", "loud", "ping"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);

    let err = Cli::try_parse_from(["entity_sync", "--log-dir", "logs", "ping"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);

    let err = Cli::try_parse_from(["entity_sync", "sigtype", "ed25519"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);
}
