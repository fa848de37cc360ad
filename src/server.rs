// src/server.rs
//! HTTP surface: a single `GET /smart` route.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::collector::{Collector, SmartInfo, collect_smart_info};
use crate::error::CollectorError;

/// Builds the router serving `/smart` from the given tool configuration.
pub fn router(collector: Collector) -> Router {
    Router::new()
        .route("/smart", get(smart_handler))
        .with_state(Arc::new(collector))
        .layer(TraceLayer::new_for_http())
}

async fn smart_handler(
    State(collector): State<Arc<Collector>>,
) -> Result<Json<Vec<SmartInfo>>, CollectorError> {
    let report = collect_smart_info(&collector)
        .await
        .inspect_err(|e| error!(error = %e, "device enumeration failed"))?;

    let failed = report.iter().filter(|info| !info.is_ok()).count();
    info!(devices = report.len(), failed, "served SMART report");

    Ok(Json(report))
}

/// Function to bind `addr` and serve until the listener fails.
pub async fn run(addr: &str, collector: Collector) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Running smartd-agent on http://{}/smart", listener.local_addr()?);

    axum::serve(listener, router(collector)).await?;
    Ok(())
}
