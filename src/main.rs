//! # pitstop
//!
//! A map-centric client for browsing, rating and adding
//! points of interest near the current position.

mod cli;
mod config;
mod gateways;
mod session;
mod ui;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    cli::run()
}
