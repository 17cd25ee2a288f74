// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Exercise Tracker: log exercises against registered users and query
//! filtered, paginated exercise logs.
//!
//! This crate provides a stateless JSON API over two document-store
//! collections (users and exercises).

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod time_utils;

use config::Config;
use db::Store;
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn Store>,
}
