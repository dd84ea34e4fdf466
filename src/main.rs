use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tally::{api, BalanceStore, HistoryStore, KeyLockRegistry, PointService};

#[derive(Parser)]
#[command(name = "tally", about = "Point balance ledger server")]
struct Args {
    /// Address to bind the HTTP server to
    #[arg(long, env = "TALLY_ADDR", default_value = "127.0.0.1:8080")]
    addr: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tally=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let service = Arc::new(PointService::new(
        BalanceStore::new(),
        HistoryStore::new(),
        KeyLockRegistry::new(),
    ));
    let app = api::router(service).layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("failed to bind {}", args.addr))?;
    info!("listening on {}", args.addr);
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
