use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use directories::ProjectDirs;

use crate::usecase::services::page_service::DEFAULT_PAGE_SIZE;

/// Explore US bikeshare trip data interactively.
#[derive(Parser, Debug)]
#[command(name = "bikeshare")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory holding chicago, new_york_city and washington tables (.csv or .xlsx)
    #[arg(long = "data-dir", env = "BIKESHARE_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Rows shown per page of raw data
    #[arg(long = "page-size", default_value_t = DEFAULT_PAGE_SIZE, value_parser = parse_page_size)]
    pub page_size: usize,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn parse_page_size(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err("page size must be at least 1".to_string()),
        Ok(size) => Ok(size),
        Err(err) => Err(format!("invalid page size {value:?}: {err}")),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub page_size: usize,
}

impl AppConfig {
    pub fn from_args(args: &Args) -> Result<Self> {
        let data_dir = match &args.data_dir {
            Some(dir) => {
                if !dir.is_dir() {
                    return Err(anyhow!("data directory does not exist: {}", dir.display()));
                }
                dir.clone()
            }
            None => default_data_dir()?,
        };

        Ok(Self {
            data_dir,
            page_size: args.page_size.max(1),
        })
    }
}

fn default_data_dir() -> Result<PathBuf> {
    if let Some(project_dirs) = ProjectDirs::from("com", "hellhbbd", "bikeshare") {
        let dir = project_dirs.data_local_dir();
        if dir.is_dir() {
            return Ok(dir.to_path_buf());
        }
    }
    std::env::current_dir().context("unable to resolve current directory")
}
