use clap::Parser;
use entity_sync_cli::{run, Cli, ERROR_EXIT_CODE};
use entity_sync_core::init_logging;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::from(ERROR_EXIT_CODE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    let config = cli.store.into_config();

    if let Some(log_dir) = config.log_dir.as_deref() {
        if let Err(err) = init_logging(config.log_level, log_dir) {
            eprintln!("error: {err}");
            return ExitCode::from(ERROR_EXIT_CODE);
        }
    }

    let mut stdout = std::io::stdout().lock();
    match run(&cli.command, &config, &mut stdout) {
        Ok(status) => ExitCode::from(status.exit_code()),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(ERROR_EXIT_CODE)
        }
    }
}
