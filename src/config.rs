use std::io::ErrorKind;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

use crate::comments::CommentConfig;
use crate::feed::MAX_DISPLAY;

#[derive(Deserialize)]
pub struct Paths {
    pub template_dir: PathBuf,
    pub public_dir: PathBuf,
    pub content_index: PathBuf,
}

#[derive(Deserialize)]
pub struct Site {
    pub title: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_max_display")]
    pub max_display: NonZeroUsize,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_locale() -> String {
    "ko-KR".to_string()
}

fn default_max_display() -> NonZeroUsize {
    NonZeroUsize::new(MAX_DISPLAY).unwrap_or(NonZeroUsize::MIN)
}

fn default_page_size() -> u32 {
    5
}

#[derive(Deserialize)]
pub struct Server {
    pub address: String,
    pub port: u16,
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize)]
pub struct Config {
    pub paths: Paths,
    pub site: Site,
    pub server: Server,
    pub log: Option<Log>,
    pub comments: Option<CommentConfig>,
}

fn parse_path(path: PathBuf, exe_dir: Option<&Path>) -> PathBuf {
    let (Some(exe_dir), Some(str_path)) = (exe_dir, path.to_str()) else {
        return path;
    };
    if path.starts_with("${exe_dir}") {
        PathBuf::from(str_path.replace("${exe_dir}", &exe_dir.to_string_lossy()))
    } else {
        path
    }
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => Ok(cfg),
        Err(e) => Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    }
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    let mut cfg = parse_config(&cfg_content)?;

    let cur_exe = env::current_exe()?;
    let exe_dir = cur_exe.parent();
    cfg.paths = Paths {
        template_dir: parse_path(cfg.paths.template_dir, exe_dir),
        public_dir: parse_path(cfg.paths.public_dir, exe_dir),
        content_index: parse_path(cfg.paths.content_index, exe_dir),
    };

    Ok(cfg)
}
