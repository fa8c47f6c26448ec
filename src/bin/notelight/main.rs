//! notelight - live note analyzer with a feedback delay monitor
//!
//! Run with: cargo run -- --delay-ms 300 --mix 0.4

mod app;
mod cli;
mod ui;

use clap::Parser;

use cli::Cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let default_filter = if cli.headless { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .init();

    app::run(cli)
}
