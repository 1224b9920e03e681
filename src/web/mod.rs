//! The single-page prediction form and its JSON twin.

pub mod handlers;
pub mod models;
pub mod router;
pub mod state;
pub mod templates;

pub use router::app_router;
pub use state::AppState;

use tracing::info;

use crate::config::ServerConfig;

/// Bind and serve until the process is stopped.
pub async fn serve(state: AppState, server: &ServerConfig) -> anyhow::Result<()> {
    let app = app_router(state);
    let bind_addr = server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!(%bind_addr, "web server listening (visit http://127.0.0.1:{})", server.port);
    axum::serve(listener, app).await?;
    Ok(())
}
