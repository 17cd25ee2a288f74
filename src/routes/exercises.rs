// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise logging and log query routes.
//!
//! Request bodies and query strings arrive loosely typed; each handler
//! parses them into typed values in a fixed order before touching the
//! store, so the first invalid field decides the response.

use crate::db::DateRange;
use crate::error::{AppError, Result};
use crate::models::NewExercise;
use crate::time_utils::{format_human_date, parse_wire_date};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users/{id}/exercises", post(log_exercise))
        .route("/api/users/{id}/logs", get(get_log))
}

// ─── Log Exercise ────────────────────────────────────────────

/// Exercise request body. `duration` is kept as a raw JSON value since
/// clients send it as either a number or a numeric string.
#[derive(Deserialize)]
struct LogExerciseBody {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    duration: Option<serde_json::Value>,
    #[serde(default)]
    date: Option<String>,
}

/// Confirmation for a logged exercise. `id` is the owning user's ID.
#[derive(Serialize)]
pub struct ExerciseResponse {
    pub id: String,
    pub username: String,
    pub date: String,
    pub duration: i64,
    pub description: String,
}

/// Coerce a duration value to whole minutes. Accepts a JSON integer or
/// a string holding one; anything else (floats included) is rejected.
fn parse_duration(raw: &serde_json::Value) -> Option<i64> {
    match raw {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Whether a duration value counts as "present" for the required-fields
/// check. Empty strings and nulls do not.
fn duration_present(raw: Option<&serde_json::Value>) -> bool {
    match raw {
        None | Some(serde_json::Value::Null) => false,
        Some(serde_json::Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}

/// Log an exercise against a user.
///
/// Validation order: required fields, duration coercion, user lookup,
/// then date. Nothing is written until all of it passes.
async fn log_exercise(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(body): Json<LogExerciseBody>,
) -> Result<Json<ExerciseResponse>> {
    let description = body.description.as_deref().map(str::trim).unwrap_or("");
    if description.is_empty() || !duration_present(body.duration.as_ref()) {
        return Err(AppError::BadRequest(
            "description and duration are required".to_string(),
        ));
    }

    let duration = body
        .duration
        .as_ref()
        .and_then(parse_duration)
        .ok_or_else(|| {
            AppError::BadRequest("duration must be a whole number of minutes".to_string())
        })?;

    let user = state
        .store
        .find_user_by_id(&user_id)
        .await?
        .ok_or(AppError::UserNotFound)?;

    let date = match body.date.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => parse_wire_date(raw).ok_or_else(|| {
            AppError::BadRequest("date must be a valid YYYY-MM-DD date".to_string())
        })?,
        None => Utc::now().date_naive(),
    };

    let exercise = state
        .store
        .create_exercise(NewExercise {
            user_id: user.id.clone(),
            description: description.to_string(),
            duration,
            date,
        })
        .await?;

    tracing::info!(
        username = %user.username,
        duration = exercise.duration,
        date = %exercise.date,
        "Exercise logged"
    );

    Ok(Json(ExerciseResponse {
        id: user.id,
        username: user.username,
        date: format_human_date(exercise.date),
        duration: exercise.duration,
        description: exercise.description,
    }))
}

// ─── Fetch Log ───────────────────────────────────────────────

#[derive(Deserialize)]
struct LogQuery {
    /// Inclusive lower date bound (`YYYY-MM-DD`)
    from: Option<String>,
    /// Inclusive upper date bound (`YYYY-MM-DD`)
    to: Option<String>,
    /// Cap on the number of entries returned
    limit: Option<String>,
}

#[derive(Serialize)]
pub struct LogEntry {
    pub description: String,
    pub duration: i64,
    pub date: String,
}

#[derive(Serialize)]
pub struct LogResponse {
    pub id: String,
    pub username: String,
    pub count: usize,
    pub log: Vec<LogEntry>,
}

fn parse_bound(raw: Option<&str>, field: &str) -> Result<Option<NaiveDate>> {
    raw.map(|r| {
        parse_wire_date(r.trim()).ok_or_else(|| {
            AppError::BadRequest(format!("'{}' must be a valid YYYY-MM-DD date", field))
        })
    })
    .transpose()
}

fn parse_limit(raw: Option<&str>) -> Result<Option<u32>> {
    raw.map(|r| {
        r.trim()
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| AppError::BadRequest("limit must be positive".to_string()))
    })
    .transpose()
}

/// Fetch a user's exercise log, optionally filtered to `[from, to]` and
/// capped at `limit` entries after the date-ascending sort.
async fn get_log(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(params): Query<LogQuery>,
) -> Result<Json<LogResponse>> {
    let user = state
        .store
        .find_user_by_id(&user_id)
        .await?
        .ok_or(AppError::UserNotFound)?;

    let range = DateRange {
        from: parse_bound(params.from.as_deref(), "from")?,
        to: parse_bound(params.to.as_deref(), "to")?,
    };
    let limit = parse_limit(params.limit.as_deref())?;

    let exercises = state.store.find_exercises(&user.id, range, limit).await?;

    let log: Vec<LogEntry> = exercises
        .into_iter()
        .map(|e| LogEntry {
            description: e.description,
            duration: e.duration,
            date: format_human_date(e.date),
        })
        .collect();

    Ok(Json(LogResponse {
        id: user.id,
        username: user.username,
        count: log.len(),
        log,
    }))
}
