//! HTTP surface: one method-agnostic operation endpoint and a liveness probe.

use std::net::SocketAddr;

use axum::Router;
use axum::extract::{RawQuery, State};
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde_json::json;
use snafu::ResultExt;

use crate::dispatch::{Dispatcher, OperationRequest, ResultEnvelope};
use crate::error::{Result, ServerBindSnafu};

/// Build the gateway router.
pub fn router(dispatcher: Dispatcher) -> Router {
    Router::new()
        .route("/", get(handle_operation).post(handle_operation))
        .route("/healthz", get(healthz))
        .with_state(dispatcher)
}

/// Bind and serve until ctrl-c.
pub async fn serve(addr: SocketAddr, dispatcher: Dispatcher) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context(ServerBindSnafu {
            addr: addr.to_string(),
        })?;

    log::info!("listening on {addr}");

    axum::serve(listener, router(dispatcher))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

async fn handle_operation(
    State(dispatcher): State<Dispatcher>,
    method: Method,
    RawQuery(query): RawQuery,
    body: String,
) -> Response {
    let pairs = parse_query_pairs(query.as_deref().unwrap_or(""));
    let mut request = OperationRequest::from_query(&pairs);

    // The body is captured for the diagnostic echo only; dispatch parameters
    // travel in the query string for both methods.
    if method == Method::POST {
        log::info!("body {body}");
        request.body = Some(body);
    }

    let envelope = dispatcher.dispatch(request).await;
    envelope_response(&envelope)
}

async fn healthz() -> Response {
    (StatusCode::OK, axum::Json(json!({ "status": "ok" }))).into_response()
}

/// Decode the raw query into ordered pairs. Binding wants first-match-wins
/// over names compared case-insensitively, which the typed query extractors
/// cannot express.
fn parse_query_pairs(query: &str) -> Vec<(String, String)> {
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

/// Application failures ride the envelope's Status field; the transport
/// answers 200 for every dispatched request.
fn envelope_response(envelope: &ResultEnvelope) -> Response {
    let body = serde_json::to_string_pretty(envelope)
        .unwrap_or_else(|e| format!("{{\"Status\":\"Error\",\"Message\":\"{e}\"}}"));
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}
