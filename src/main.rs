use std::fs::File;
use std::sync::Arc;

use clap::Parser;
use sentichat::Locale;
use sentichat::api::HttpBackend;
use sentichat::core::config::{self, CliOverrides, SentichatConfig, StartupLog};
use sentichat::core::state::App;
use simplelog::{ConfigBuilder, WriteLogger};

#[derive(Parser)]
#[command(name = "sentichat", about = "Terminal client for a sentiment-aware chat bot")]
struct Args {
    /// Backend base URL (e.g. http://localhost:5000)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Language for labels and bot notices
    #[arg(short, long, value_enum)]
    locale: Option<Locale>,

    /// Log file path
    #[arg(long)]
    log_file: Option<String>,

    /// Line-oriented mode for pipes and dumb terminals
    #[arg(long)]
    plain: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The logger needs the resolved config, so loading records into a buffer
    let mut startup = StartupLog::default();
    let file_config = config::load_config(&mut startup).unwrap_or_else(|e| {
        eprintln!("sentichat: {e}; using defaults");
        SentichatConfig::default()
    });
    let cli = CliOverrides {
        base_url: args.base_url,
        locale: args.locale,
        log_file: args.log_file,
    };
    let config = config::resolve(&file_config, &cli, &mut startup);

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&config.log_file) {
        let _ = WriteLogger::init(config.log_level, log_config, log_file);
    }
    startup.replay();

    log::info!(
        "sentichat starting up: base_url={}, locale={:?}, plain={}",
        config.base_url,
        config.locale,
        args.plain
    );

    let backend = HttpBackend::new(&config.base_url, config.connect_timeout).map_err(|e| {
        log::error!("Failed to create backend client: {}", e);
        std::io::Error::other(e.to_string())
    })?;
    let app = App::from_config(&config);

    if args.plain {
        sentichat::plain::run(app, &backend).await
    } else {
        sentichat::tui::run(app, Arc::new(backend))
    }
}
