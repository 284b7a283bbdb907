use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use taskdeck::core::config;
use taskdeck::tui;

#[derive(Parser)]
#[command(name = "taskdeck", about = "Terminal workspace for tasks")]
struct Args {
    /// Location to open at startup, e.g. /tasks or /task/42
    #[arg(short, long)]
    route: Option<String>,

    /// Base URL of the workspace API
    #[arg(long)]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to taskdeck.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("taskdeck.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        config::TaskdeckConfig::default()
    });
    let resolved = config::resolve(&file_config, args.route.as_deref(), args.api_url.as_deref());

    log::info!(
        "Taskdeck starting at {} against {}",
        resolved.start_route,
        resolved.api_base_url
    );

    tui::run(resolved)
}
