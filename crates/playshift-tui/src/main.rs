mod action;
mod app;
mod app_state;
mod component;
mod components;
mod navigator;
mod shell;
mod theme;
mod widgets;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::{info, warn};

use playshift_core::api::ApiClient;
use playshift_core::config::Config;
use playshift_core::session::SessionContext;

use crate::shell::Route;

#[derive(Parser, Debug)]
#[command(
    name = "playshift",
    about = "Terminal client for moving playlists between Spotify and YouTube",
    version
)]
struct Args {
    /// Base URL of the playlist backend
    #[arg(long, env = "PLAYSHIFT_API_URL")]
    base_url: Option<String>,

    /// User id sent with imported playlists
    #[arg(long, env = "PLAYSHIFT_USER_ID")]
    user_id: Option<String>,

    /// View to open first: /, /import, /playlists or /songs
    #[arg(long, default_value = "/")]
    start: String,

    /// Config file to read instead of the default location
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let data_dir = playshift_core::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = playshift_core::platform::log_path();

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; default to debug for app code but keep the
    // HTTP client internals quiet.
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("playshift log: {}", log_path.display());

    info!("playshift starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(base_url) = args.base_url {
        config.api.base_url = base_url;
    }
    if let Some(user_id) = args.user_id {
        config.session.user_id = user_id;
    }
    info!(
        "api {} as user {}",
        config.api.base_url, config.session.user_id
    );

    let route = Route::from_path(&args.start).unwrap_or_else(|| {
        warn!("unknown start path {:?}, opening the dashboard", args.start);
        Route::Dashboard
    });

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let api = ApiClient::new(&config.api)?;
    let app = app::App::new(
        api,
        SessionContext::from(&config.session),
        route,
        Duration::from_millis(config.ui.tick_ms.max(10)),
        log_path,
    );
    app.run().await?;

    Ok(())
}
