use std::env;
use std::path::PathBuf;

use blogfront::config::{read_config, Config};

use crate::config_data::write_sample_cfg;
use crate::CFG_FILE_NAME;

fn get_config_path() -> Option<PathBuf> {
    let mut candidates = vec![];
    if let Some(exe_dir) = env::current_exe().ok().and_then(|p| p.parent().map(PathBuf::from)) {
        candidates.push(exe_dir.join(CFG_FILE_NAME));
    }
    if let Ok(cur_dir) = env::current_dir() {
        candidates.push(cur_dir.join(CFG_FILE_NAME));
    }
    if let Some(cfg_dir) = dirs::config_dir() {
        candidates.push(cfg_dir.join(CFG_FILE_NAME));
    }

    candidates.into_iter().find(|path| path.exists())
}

pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config, String> {
    let config_path = match cfg_path.or_else(get_config_path) {
        None => return Err("Could not find blogfront configuration".to_string()),
        Some(x) => x,
    };

    println!("Reading config from {}", config_path.display());
    let mut config = match read_config(&config_path) {
        Ok(config) => config,
        Err(e) => return Err(e.to_string()),
    };

    if let Some(ref mut log) = config.log {
        if log.location.is_none() {
            log.location = dirs::cache_dir().map(|d| d.join("blogfront").join("log").join("server.log"));
        }
        match log.location {
            Some(ref location) => println!("Log enabled. Files will be written in {}", location.display()),
            None => println!("Log enabled. No cache dir available, using console"),
        }
    } else {
        println!("Log disabled. Using stdout");
    }

    Ok(config)
}

pub(crate) fn generate_cfg(config_path: Option<PathBuf>) -> Result<PathBuf, String> {
    let path = match config_path.or_else(|| dirs::config_dir().map(|d| d.join(CFG_FILE_NAME))) {
        Some(path) => path,
        None => return Err("Could not find user config dir".to_string()),
    };

    println!("Writing sample config to {}", path.display());
    match write_sample_cfg(&path) {
        Ok(()) => Ok(path),
        Err(e) => Err(format!("Error writing {}: {}", path.display(), e)),
    }
}
