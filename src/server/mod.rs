//! # HTTP Report Server
//!
//! Serves PDF generation over HTTP for fleet dashboards that keep their
//! records elsewhere.
//!
//! ## Usage
//!
//! ```bash
//! skyreport serve --listen 0.0.0.0:8080
//! ```
//!
//! Then `POST /api/report` with a drone record as JSON; the response body is
//! the finished PDF with a `Content-Disposition` attachment filename.

use axum::{
    extract::Json,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::post,
    Router,
};
use tower_http::trace::TraceLayer;

use crate::error::ReportError;
use crate::record::DroneRecord;
use crate::report::{self, PageGeometry};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
}

pub fn router() -> Router {
    Router::new()
        .route("/api/report", post(generate_report))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server.
pub async fn serve(config: ServerConfig) -> Result<(), ReportError> {
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;

    tracing::info!(listen_addr = %config.listen_addr, "report server listening");

    axum::serve(listener, router()).await?;

    Ok(())
}

/// Handle POST /api/report - generate the PDF for one record.
///
/// Generation runs on the blocking pool; rendering a multi-page document is
/// pure CPU work and must not stall the async executor.
async fn generate_report(
    Json(record): Json<DroneRecord>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let generated = tokio::task::spawn_blocking(move || {
        report::generate(&record, &PageGeometry::default())
    })
    .await
    .map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("generation task failed: {}", e),
        )
    })?
    .map_err(|e| match e {
        ReportError::Record(reason) => (StatusCode::BAD_REQUEST, reason),
        other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    })?;

    tracing::info!(
        filename = %generated.filename,
        pages = generated.page_count,
        bytes = generated.bytes.len(),
        "report generated"
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", generated.filename),
            ),
        ],
        generated.bytes,
    ))
}
