use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use confab::core::config;
use confab::tui;

#[derive(Parser)]
#[command(name = "confab", about = "Minimal single-screen AI chat client")]
struct Args {
    /// Model to chat with (overrides config)
    #[arg(short, long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - the TUI owns the terminal, so logs go to
    // confab.log in the current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("confab.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("Confab starting up");

    // Config and credential problems are reported before the terminal
    // enters raw mode
    let file_config = config::load_config().map_err(std::io::Error::other)?;
    let resolved = config::resolve(&file_config, args.model.as_deref());
    let provider = tui::build_provider(&resolved).map_err(std::io::Error::other)?;

    log::info!(
        "Using model {} via {}",
        resolved.model_name,
        resolved.base_url
    );

    tui::run(provider, resolved)
}
