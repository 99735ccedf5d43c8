use crate::{config::Config, gateways, session};
use anyhow::{Context as _, Result};
use clap::Parser;
use dotenvy::dotenv;
use std::{path::PathBuf, sync::Arc, time::Duration};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    config_file: Option<PathBuf>,

    /// Base URL of the backend API
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,
}

pub fn run() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();

    let mut cfg = Config::try_load_from_file_or_default(args.config_file.as_ref())?;
    if let Some(api_url) = args.api_url {
        cfg.api.url = api_url;
    }
    log::info!("pitstop v{}", clap::crate_version!());

    // The blocking HTTP clients must neither be created nor
    // dropped within the async runtime.
    let gateways = Arc::new(gateways::gateways(&cfg));
    let settings = cfg.settings();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Unable to start the runtime")?;
    let result = runtime.block_on(session::run(settings, Arc::clone(&gateways), cfg.map.zoom));
    // Requests that are still pending are not awaited.
    runtime.shutdown_timeout(Duration::from_millis(500));
    drop(gateways);
    result
}
