//! `mathsheet-gateway` — serve the annotation API and the front end.
//!
//! All model credentials arrive per request; the process itself needs no
//! API keys, only a port and the directory of prebuilt front-end assets.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mathsheet_gateway::{build_router, AppState, OpenAiInvoker, ServerConfig};

#[derive(Debug, Parser)]
#[command(
    name = "mathsheet-gateway",
    version,
    about = "Annotation gateway: explanation, visualization, conversion and OCR for math documents"
)]
struct Cli {
    /// TCP port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8000)]
    port: u16,

    /// Directory with the prebuilt front-end assets.
    #[arg(long, env = "STATIC_ROOT", default_value = "dist")]
    static_root: String,

    /// Per-upstream-call timeout in seconds.
    #[arg(long, env = "API_TIMEOUT_SECS", default_value_t = 120)]
    api_timeout_secs: u64,

    /// Token cap for OCR transcriptions.
    #[arg(long, env = "MAX_OCR_TOKENS", default_value_t = 2000)]
    max_ocr_tokens: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mathsheet_gateway=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::builder()
        .port(cli.port)
        .static_root(cli.static_root)
        .api_timeout_secs(cli.api_timeout_secs)
        .max_ocr_tokens(cli.max_ocr_tokens)
        .build()
        .context("invalid configuration")?;

    let config = Arc::new(config);
    let invoker = Arc::new(
        OpenAiInvoker::new(Duration::from_secs(config.api_timeout_secs))
            .context("failed to build model client")?,
    );

    let app = build_router(AppState {
        invoker,
        config: Arc::clone(&config),
    });

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("failed to bind port {}", config.port))?;

    info!(
        port = config.port,
        static_root = %config.static_root.display(),
        "mathsheet gateway listening"
    );

    axum::serve(listener, app)
        .await
        .context("server terminated")?;

    Ok(())
}
