use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{info, warn};

use voxlog::notice::Severity;
use voxlog::{
    create_router, AppState, Capabilities, CommandClipboard, Config, FileStorage, Notices,
    SessionController, TranscriptStore,
};

/// Local voice transcription service
#[derive(Debug, Parser)]
#[command(name = "voxlog", version, about)]
struct Args {
    /// Configuration file, without extension (e.g. config/voxlog)
    #[arg(long, default_value = "config/voxlog")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("{} starting", cfg.service.name);

    let notices = Arc::new(Notices::new());

    let mut store = TranscriptStore::new(
        Box::new(FileStorage::new(&cfg.storage.path)),
        Arc::clone(&notices),
    );
    store.load();
    info!("Loaded {} saved transcriptions", store.len());
    let store = Arc::new(Mutex::new(store));

    // Capability-unsupported is surfaced exactly once, here; the record
    // control stays disabled but everything else keeps working.
    let capabilities = match Capabilities::detect() {
        Ok(caps) => Some(caps),
        Err(e) => {
            warn!("Recording disabled: {e:#}");
            notices.publish(
                Severity::Error,
                "Speech recognition is not supported on this host",
            );
            None
        }
    };

    let controller = SessionController::new(
        capabilities,
        cfg.speech.language,
        Duration::from_millis(cfg.speech.meter_interval_ms),
        Arc::clone(&store),
        Arc::clone(&notices),
    );

    let state = AppState {
        controller,
        store,
        clipboard: Arc::new(CommandClipboard),
        notices,
    };
    let router = create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on {addr}");

    axum::serve(listener, router)
        .await
        .context("HTTP server failed")?;

    Ok(())
}
