use std::{process::ExitCode, sync::Arc};

use clap::Parser;
use log::{error, info};

use mindful::{App, Cli, Config, FileKvStore, JournalStore, Keyspace, Result, SystemClock};

fn default_log_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

pub fn initialize_logger(verbose: bool) {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_log_filter(verbose)),
    )
        .format_timestamp_secs()
        .format_module_path(true)
        .init();

    info!("Logger initialized");
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.clone().or_else(Config::default_path);
    let mut config = match &config_path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    let kv = FileKvStore::open(&config.data_dir)?;
    let store = JournalStore::with_parts(
        Arc::new(kv),
        Arc::new(SystemClock),
        Keyspace::new(config.key_prefix.clone()),
    );

    let app = App::new(Arc::new(store), config, config_path, cli.verbose);
    app.run(cli.command).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    initialize_logger(cli.verbose);
    info!("Application starting up");

    match run(cli).await {
        Ok(()) => {
            info!("Application shutting down");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("{} {}", console::style("Error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
