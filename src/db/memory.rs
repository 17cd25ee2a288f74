// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory store double for tests and offline development.
//!
//! Implements the same semantics as the Firestore layer, including the
//! duplicate-username conflict on `create_user`.

use crate::db::{DateRange, Store};
use crate::error::AppError;
use crate::models::{Exercise, NewExercise, User};
use async_trait::async_trait;
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    exercises: Vec<Exercise>,
}

/// In-memory store.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, AppError> {
        self.inner
            .lock()
            .map_err(|_| AppError::Database("store mutex poisoned".to_string()))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, username: &str) -> Result<User, AppError> {
        let mut inner = self.lock()?;
        if inner.users.iter().any(|u| u.username == username) {
            return Err(AppError::DuplicateUsername(username.to_string()));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
        };
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let inner = self.lock()?;
        Ok(inner.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let inner = self.lock()?;
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let inner = self.lock()?;
        let mut users = inner.users.clone();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn create_exercise(&self, new: NewExercise) -> Result<Exercise, AppError> {
        let mut inner = self.lock()?;
        let exercise = Exercise {
            id: Uuid::new_v4().to_string(),
            user_id: new.user_id,
            description: new.description,
            duration: new.duration,
            date: new.date,
        };
        inner.exercises.push(exercise.clone());
        Ok(exercise)
    }

    async fn find_exercises(
        &self,
        user_id: &str,
        range: DateRange,
        limit: Option<u32>,
    ) -> Result<Vec<Exercise>, AppError> {
        let inner = self.lock()?;
        let mut matches: Vec<Exercise> = inner
            .exercises
            .iter()
            .filter(|e| e.user_id == user_id)
            .filter(|e| range.from.is_none_or(|from| e.date >= from))
            .filter(|e| range.to.is_none_or(|to| e.date <= to))
            .cloned()
            .collect();

        matches.sort_by_key(|e| e.date);
        if let Some(limit) = limit {
            matches.truncate(limit as usize);
        }
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    async fn store_with_exercises() -> (MemoryStore, User) {
        let store = MemoryStore::new();
        let user = store.create_user("alice").await.unwrap();
        for day in ["2024-01-03", "2024-01-01", "2024-01-05"] {
            store
                .create_exercise(NewExercise {
                    user_id: user.id.clone(),
                    description: format!("run {}", day),
                    duration: 30,
                    date: date(day),
                })
                .await
                .unwrap();
        }
        (store, user)
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let store = MemoryStore::new();
        store.create_user("alice").await.unwrap();

        let err = store.create_user("alice").await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateUsername(_)));
    }

    #[tokio::test]
    async fn test_find_exercises_sorted_ascending() {
        let (store, user) = store_with_exercises().await;

        let results = store
            .find_exercises(&user.id, DateRange::default(), None)
            .await
            .unwrap();

        let dates: Vec<_> = results.iter().map(|e| e.date).collect();
        assert_eq!(
            dates,
            vec![date("2024-01-01"), date("2024-01-03"), date("2024-01-05")]
        );
    }

    #[tokio::test]
    async fn test_find_exercises_range_is_inclusive() {
        let (store, user) = store_with_exercises().await;

        let range = DateRange {
            from: Some(date("2024-01-01")),
            to: Some(date("2024-01-03")),
        };
        let results = store.find_exercises(&user.id, range, None).await.unwrap();

        assert_eq!(results.len(), 2);
        assert!(results
            .iter()
            .all(|e| e.date >= date("2024-01-01") && e.date <= date("2024-01-03")));
    }

    #[tokio::test]
    async fn test_find_exercises_limit_applies_after_sort() {
        let (store, user) = store_with_exercises().await;

        let results = store
            .find_exercises(&user.id, DateRange::default(), Some(2))
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        // The first two dates in ascending order, not insertion order.
        assert_eq!(results[0].date, date("2024-01-01"));
        assert_eq!(results[1].date, date("2024-01-03"));
    }

    #[tokio::test]
    async fn test_find_exercises_scoped_to_user() {
        let (store, _user) = store_with_exercises().await;
        let other = store.create_user("bob").await.unwrap();

        let results = store
            .find_exercises(&other.id, DateRange::default(), None)
            .await
            .unwrap();
        assert!(results.is_empty());
    }
}
