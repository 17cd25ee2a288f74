// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod exercises;
pub mod users;

use crate::AppState;
use axum::http::Method;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Health check response
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[derive(Serialize)]
pub struct HelloResponse {
    pub greeting: String,
}

/// API smoke-test endpoint.
async fn hello() -> Json<HelloResponse> {
    Json(HelloResponse {
        greeting: "hello API".to_string(),
    })
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // Public demo API: any origin may call it.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let public_dir = PathBuf::from(&state.config.public_dir);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/hello", get(hello))
        .merge(users::routes())
        .merge(exercises::routes())
        .route_service("/", ServeFile::new(public_dir.join("index.html")))
        .nest_service("/public", ServeDir::new(public_dir))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
