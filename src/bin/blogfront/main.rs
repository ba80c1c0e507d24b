use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use spdlog::{info, warn};

use blogfront::logger::configure_logger;
use blogfront::server::server_run;

use crate::config::{generate_cfg, open_config};

mod config;
mod config_data;

const CFG_FILE_NAME: &str = "blogfront.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    /// Write a sample configuration to the config path (or the user config dir) and exit
    #[arg(long)]
    write_config: bool,
}

#[ntex::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config_path.map(PathBuf::from);

    if args.write_config {
        return generate_cfg(config_path).map(|_| ()).map_err(|e| anyhow!(e));
    }

    let config = match open_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Please run blogfront --help");
            return Ok(());
        }
    };

    if let Err(err) = configure_logger(config.log.as_ref()) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    info!("Starting blogfront =-=-=-=-=-=-=-=-=-=-=-=-=-=-=-");
    info!("Listening on {}:{}", config.server.address, config.server.port);

    server_run(config).await?;
    Ok(())
}
