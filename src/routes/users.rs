// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User registration and listing routes.

use crate::error::{AppError, Result};
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/users", post(register_user).get(list_users))
}

/// Registration request body. Fields are optional so that a missing
/// username is our validation error, not a deserialization failure.
#[derive(Deserialize)]
struct RegisterUserBody {
    #[serde(default)]
    username: Option<String>,
}

/// User projection returned by both user endpoints. Never carries
/// exercise fields.
#[derive(Serialize)]
pub struct UserResponse {
    pub username: String,
    pub id: String,
}

/// Register a username, or return the existing user if it is taken.
///
/// The pre-check makes repeat registrations idempotent. If a concurrent
/// registration slips between the check and the insert, the store's
/// uniqueness constraint fires and surfaces as a 409.
async fn register_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterUserBody>,
) -> Result<Json<UserResponse>> {
    let username = body.username.as_deref().map(str::trim).unwrap_or("");
    if username.is_empty() {
        return Err(AppError::BadRequest("username is required".to_string()));
    }

    if let Some(existing) = state.store.find_user_by_username(username).await? {
        return Ok(Json(UserResponse {
            username: existing.username,
            id: existing.id,
        }));
    }

    let user = state.store.create_user(username).await?;
    tracing::info!(username = %user.username, id = %user.id, "User registered");

    Ok(Json(UserResponse {
        username: user.username,
        id: user.id,
    }))
}

/// List all users as `{username, id}` projections.
async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<UserResponse>>> {
    let users = state.store.list_users().await?;

    Ok(Json(
        users
            .into_iter()
            .map(|u| UserResponse {
                username: u.username,
                id: u.id,
            })
            .collect(),
    ))
}
