//! Elviora chat relay server binary.
//!
//! Reads `.env` and the process environment, builds the product cache and
//! completion gateway, and serves the API until Ctrl-C.

use std::sync::Arc;

use clap::Parser;
use elviora_core::clock::SystemClock;
use elviora_core::completion::CompletionGateway;
use elviora_core::completion::openrouter::OpenRouterGateway;
use elviora_core::config::RelayConfig;
use elviora_core::products::HttpProductSource;
use elviora_core::products::cache::ProductContextCache;
use elviora_core::prompt::PromptAssembler;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// CLI arguments for the relay server.
#[derive(Parser, Debug)]
#[command(name = "elviora_api_server", about = "Elviora chat relay server")]
struct Args {
    /// Host/interface to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on (0 = ephemeral).
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,elviora_api=debug,elviora_core=debug".into()),
        )
        .init();

    let args = Args::parse();

    let relay = RelayConfig::from_env();
    let api = elviora_api::config::ApiConfig {
        bind_addr: format!("{}:{}", args.host, args.port),
        ..elviora_api::config::ApiConfig::from_env()
    };

    info!(
        model = %relay.completion.model,
        products_url = %relay.products.url,
        cache_ttl_ms = relay.products.cache_ttl.as_millis() as u64,
        "starting elviora_api_server"
    );

    let gateway = OpenRouterGateway::from_config(&relay.completion)?
        .map(|g| Arc::new(g) as Arc<dyn CompletionGateway>);
    if gateway.is_none() {
        warn!("OPENROUTER_API_KEY is not set; /api/chat will answer NO_API_KEY");
    }

    let source = HttpProductSource::new(&relay.products)?;
    let products = Arc::new(ProductContextCache::new(
        Arc::new(source),
        Arc::new(SystemClock),
        relay.products.cache_ttl,
    ));

    let state = elviora_api::AppState {
        products,
        prompt: PromptAssembler::new(relay.completion.model.clone()),
        gateway,
        config: api.clone(),
    };

    let app = elviora_api::router(state);

    let listener = tokio::net::TcpListener::bind(&api.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, origins = ?api.allowed_origins, "chat API listening");

    let ct = CancellationToken::new();
    tokio::spawn({
        let ct = ct.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("shutdown requested");
            }
            ct.cancel();
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { ct.cancelled().await })
        .await?;

    Ok(())
}
