// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Exercise model for storage and API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stored exercise record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    /// Store-generated identifier (also used as document ID)
    pub id: String,
    /// Owning user's `id` (weak reference, checked at write time)
    pub user_id: String,
    /// What the user did
    pub description: String,
    /// Duration in whole minutes
    pub duration: i64,
    /// Calendar date of the exercise (serialized as `YYYY-MM-DD`,
    /// which keeps store range filters in date order)
    pub date: NaiveDate,
}

/// A validated exercise waiting for the store to assign its ID.
#[derive(Debug, Clone)]
pub struct NewExercise {
    pub user_id: String,
    pub description: String,
    pub duration: i64,
    pub date: NaiveDate,
}
