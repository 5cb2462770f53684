//! ShareIt Gateway Binary
//!
//! Entry point for the validating gateway in front of the ShareIt backend.
//!
//! # Environment Variables
//!
//! - `HOST`: Gateway host (default: 0.0.0.0)
//! - `PORT`: Gateway port (default: 8080)
//! - `SHAREIT_SERVER_URL`: Backend base URL (default: http://localhost:9090)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use shareit_gateway::{create_router, AppState, ForwardClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    let server_url =
        env::var("SHAREIT_SERVER_URL").unwrap_or_else(|_| "http://localhost:9090".to_string());
    info!("Starting ShareIt gateway, forwarding to {}", server_url);

    let state = AppState::new(ForwardClient::new(server_url));
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Gateway listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
