use crate::core::verifier::CrossChainVerifier;
use crate::core::{ConfigProvider, ExplorerApi, VerifyRequest, VerifyResponse};
use axum::body::Bytes;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub const VERIFY_ENDPOINT: &str = "/api/verify";

/// Builds the HTTP surface around a shared verifier.
pub fn router<E, C>(verifier: Arc<CrossChainVerifier<E, C>>) -> Router
where
    E: ExplorerApi + 'static,
    C: ConfigProvider + 'static,
{
    Router::new()
        .route(VERIFY_ENDPOINT, post(verify_handler::<E, C>))
        .layer(TraceLayer::new_for_http())
        .with_state(verifier)
}

// 請求內容無法解析時視為缺少參數，錯誤一律以 200 + status=error 回應
async fn verify_handler<E, C>(
    State(verifier): State<Arc<CrossChainVerifier<E, C>>>,
    body: Bytes,
) -> Json<VerifyResponse>
where
    E: ExplorerApi + 'static,
    C: ConfigProvider + 'static,
{
    let request = VerifyRequest::from_body(&body);
    Json(verifier.handle(request).await)
}

pub async fn serve<E, C>(verifier: Arc<CrossChainVerifier<E, C>>, bind: &str) -> anyhow::Result<()>
where
    E: ExplorerApi + 'static,
    C: ConfigProvider + 'static,
{
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!("🚀 Listening on {}", listener.local_addr()?);
    axum::serve(listener, router(verifier))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
