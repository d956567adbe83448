use std::io;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod app;
mod config;

mod domain {
    pub mod error;

    pub mod entities {
        pub mod dataset;
        pub mod registry;
        pub mod report;
    }
}

mod infra {
    pub mod fs {
        pub mod source;
    }

    pub mod import {
        pub mod csv;
        pub mod xlsx;
    }
}

mod ui {
    pub mod prompt;
    pub mod render;

    pub mod state {
        pub mod app_state;
    }
}

mod usecase {
    pub mod ports {
        pub mod source;
    }

    pub mod services {
        pub mod load_service;
        pub mod page_service;
        pub mod stats_service;
    }
}


use crate::app::App;
use crate::config::{AppConfig, Args};
use crate::domain::entities::registry::Registry;
use crate::infra::fs::source::FsTripSource;
use crate::ui::prompt::Console;
use crate::usecase::services::load_service::LoadService;

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_writer(io::stderr)
        .init();

    let config = AppConfig::from_args(&args)?;
    tracing::debug!(data_dir = %config.data_dir.display(), page_size = config.page_size, "resolved configuration");

    let registry = Registry::new();
    let loader = LoadService::new(Arc::new(FsTripSource::new(config.data_dir.clone())));
    let console = Console::new(io::stdin().lock(), io::stdout().lock());

    App::new(console, &registry, loader, config).run()
}
