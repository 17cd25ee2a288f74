// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Collection layout:
//! - `users`, keyed by username so that create semantics enforce the
//!   uniqueness invariant at the store
//! - `exercises`, keyed by generated ID, with `date` stored as a
//!   `YYYY-MM-DD` string so range filters and ordering follow date order

use crate::db::{collections, DateRange, Store};
use crate::error::AppError;
use crate::models::{Exercise, NewExercise, User};
use async_trait::async_trait;
use uuid::Uuid;

/// Firestore-backed store.
#[derive(Clone)]
pub struct FirestoreStore {
    client: firestore::FirestoreDb,
}

impl FirestoreStore {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self { client })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self { client })
    }
}

#[async_trait]
impl Store for FirestoreStore {
    async fn create_user(&self, username: &str) -> Result<User, AppError> {
        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
        };

        // Insert (not upsert): an already-existing document for this
        // username fails the write, which is the uniqueness constraint.
        let _: User = self
            .client
            .fluent()
            .insert()
            .into(collections::USERS)
            .document_id(&user.username)
            .object(&user)
            .execute()
            .await
            .map_err(|e| match e {
                firestore::errors::FirestoreError::DataConflictError(_) => {
                    AppError::DuplicateUsername(user.username.clone())
                }
                other => AppError::Database(other.to_string()),
            })?;

        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.client
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(username)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let id = id.to_string();
        let mut users: Vec<User> = self
            .client
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(move |q| q.for_all([q.field("id").eq(id.clone())]))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(users.pop())
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.client
            .fluent()
            .select()
            .from(collections::USERS)
            .order_by([(
                "username",
                firestore::FirestoreQueryDirection::Ascending,
            )])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn create_exercise(&self, new: NewExercise) -> Result<Exercise, AppError> {
        let exercise = Exercise {
            id: Uuid::new_v4().to_string(),
            user_id: new.user_id,
            description: new.description,
            duration: new.duration,
            date: new.date,
        };

        let _: Exercise = self
            .client
            .fluent()
            .insert()
            .into(collections::EXERCISES)
            .document_id(&exercise.id)
            .object(&exercise)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(exercise)
    }

    async fn find_exercises(
        &self,
        user_id: &str,
        range: DateRange,
        limit: Option<u32>,
    ) -> Result<Vec<Exercise>, AppError> {
        let user_id = user_id.to_string();
        // Bounds compare against the stored YYYY-MM-DD strings.
        let from = range.from.map(|d| d.to_string());
        let to = range.to.map(|d| d.to_string());

        let query = self
            .client
            .fluent()
            .select()
            .from(collections::EXERCISES)
            .filter(move |q| {
                q.for_all([
                    q.field("user_id").eq(user_id.clone()),
                    from.as_ref()
                        .and_then(|d| q.field("date").greater_than_or_equal(d.clone())),
                    to.as_ref()
                        .and_then(|d| q.field("date").less_than_or_equal(d.clone())),
                ])
            })
            .order_by([("date", firestore::FirestoreQueryDirection::Ascending)]);

        let query = if let Some(limit) = limit {
            query.limit(limit)
        } else {
            query
        };

        query
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
