// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! HTTP control/inspection plane: `GET /check_subscriber` and `GET /stop`.
//!
//! `axum` is not part of the teacher crate's own stack; it is adopted here
//! from the `foundry-rs-foundry` (`anvil-server`) pack contribution, which
//! builds its JSON-RPC control surface the same way — a `Router` over
//! shared `Arc` state with async handler functions (see
//! `anvil/server/src/handler.rs`).

use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::context::ServerContext;

#[derive(Debug, Deserialize)]
pub struct CheckSubscriberQuery {
    imsi: Option<String>,
}

/// `GET /check_subscriber?imsi=<digits>`. Holds the session lock only for
/// the presence check; the response body is built after releasing it.
async fn check_subscriber(
    State(ctx): State<Arc<ServerContext>>,
    Query(q): Query<CheckSubscriberQuery>,
) -> impl IntoResponse {
    let imsi = match q.imsi.filter(|s| !s.is_empty()) {
        Some(imsi) => imsi,
        None => {
            error!("HTTP /check_subscriber: отсутствует параметр IMSI");
            return (StatusCode::BAD_REQUEST, "Error: IMSI not specified".to_string());
        },
    };

    info!("HTTP /check_subscriber: запрос для IMSI {imsi}");
    let active = ctx.sessions.is_active(&imsi).await;
    let body = if active { "active" } else { "not active" };
    (StatusCode::OK, body.to_string())
}

/// `GET /stop`. Flips the shutdown signal and returns immediately; the
/// actual graceful drain runs in the separate `shutdown::run` task that
/// woke up on the same cancellation token.
async fn stop(State(ctx): State<Arc<ServerContext>>) -> impl IntoResponse {
    info!("HTTP /stop: запрос на завершение сервера");
    ctx.shutdown.cancel();
    (StatusCode::OK, "Shutting down...")
}

fn router(ctx: Arc<ServerContext>) -> Router {
    Router::new()
        .route("/check_subscriber", get(check_subscriber))
        .route("/stop", get(stop))
        .with_state(ctx)
}

/// Binds the control-plane listener on `0.0.0.0:<port>` and serves until
/// the shutdown signal fires, at which point axum stops accepting new
/// connections and this returns once in-flight requests finish.
pub async fn run(ctx: Arc<ServerContext>, port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind HTTP control plane on port {port}"))?;
    info!("Запуск HTTP-сервера на 0.0.0.0:{port}");

    let app = router(ctx.clone());
    let shutdown = ctx.shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .context("HTTP control plane server error")?;

    info!("HTTP-сервер остановлен");
    Ok(())
}
