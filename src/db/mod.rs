// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer.
//!
//! The [`Store`] trait is the service's only view of persistence, so the
//! Firestore client can be swapped for an in-memory double in tests.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreStore;
pub use memory::MemoryStore;

use crate::error::AppError;
use crate::models::{Exercise, NewExercise, User};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const EXERCISES: &str = "exercises";
}

/// Inclusive date range filter; each bound is independently optional.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Document store operations over Users and Exercises.
///
/// Implementations generate entity IDs themselves and enforce the
/// username uniqueness invariant on `create_user`.
#[async_trait]
pub trait Store: Send + Sync {
    /// Create a user, assigning a fresh ID.
    ///
    /// Returns [`AppError::DuplicateUsername`] if the username is already
    /// taken. Callers pre-check with [`Store::find_user_by_username`], so
    /// this only fires when a concurrent registration wins the race.
    async fn create_user(&self, username: &str) -> Result<User, AppError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, AppError>;

    /// All users, ordered by username.
    async fn list_users(&self) -> Result<Vec<User>, AppError>;

    /// Persist a validated exercise, assigning a fresh ID.
    async fn create_exercise(&self, new: NewExercise) -> Result<Exercise, AppError>;

    /// Exercises for a user within `range`, sorted by date ascending,
    /// capped at `limit` entries when supplied.
    async fn find_exercises(
        &self,
        user_id: &str,
        range: DateRange,
        limit: Option<u32>,
    ) -> Result<Vec<Exercise>, AppError>;
}
