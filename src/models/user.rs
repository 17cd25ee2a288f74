//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// User record stored in the document store.
///
/// The document is keyed by `username`, which is how the store enforces
/// the uniqueness invariant; `id` is the opaque identifier handed to
/// clients and referenced by exercises.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Store-generated identifier
    pub id: String,
    /// Unique username (also used as document ID)
    pub username: String,
}
