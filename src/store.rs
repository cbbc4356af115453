//! User storage trait.
//!
//! Implement this trait for your database layer. The finder owns no
//! persistence of its own: it builds a [`UserQuery`] and hands it to the
//! store, which translates it into its backend's query language.
//!
//! # Example
//!
//! ```rust,ignore
//! use masquerade::{UserQuery, UserStore};
//! use async_trait::async_trait;
//!
//! struct SeaOrmUserStore {
//!     db: DatabaseConnection,
//! }
//!
//! #[async_trait]
//! impl UserStore for SeaOrmUserStore {
//!     type User = user::Model;
//!     type Id = i64;
//!
//!     fn user_key(&self, user: &Self::User) -> i64 {
//!         user.id
//!     }
//!
//!     async fn find_by_id(&self, id: &i64) -> Result<Option<Self::User>> {
//!         user::Entity::find_by_id(*id)
//!             .one(&self.db)
//!             .await
//!             .map_err(|e| ImpersonateError::storage(e.to_string()))
//!     }
//!
//!     async fn search(&self, query: &UserQuery) -> Result<Vec<Self::User>> {
//!         // Translate query.filters into OR'd LIKE conditions,
//!         // relation paths into exists-subqueries, apply query.limit.
//!     }
//! }
//! ```

use crate::error::Result;
use crate::query::UserQuery;
use async_trait::async_trait;
use std::fmt;

/// Trait for read-only user storage operations.
///
/// The store owns the user lifecycle entirely; this crate never creates,
/// mutates, or deletes users through it.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// The user type returned by this store.
    type User: Send + Sync + Clone;

    /// The identifier type of the store's key column (integer or string,
    /// depending on the backend).
    type Id: Clone + PartialEq + fmt::Display + Send + Sync;

    /// Name of the identifier column.
    ///
    /// Always searched first, regardless of configuration.
    fn identifier_field(&self) -> &str {
        "id"
    }

    /// Whether the user entity supports soft-deletion.
    ///
    /// Stores without a trashed/deleted-at notion keep the default.
    /// Queries only ask for soft-deleted rows when this returns true.
    fn supports_soft_delete(&self) -> bool {
        false
    }

    /// Extract a user's identifier.
    ///
    /// Users lacking a resolvable identifier must be excluded by the store
    /// itself; this method is infallible.
    fn user_key(&self, user: &Self::User) -> Self::Id;

    /// Find a user whose identifier column equals `id`.
    ///
    /// Returns `Ok(None)` when no user matches. Duplicate keys are the
    /// store's problem; uniqueness is assumed enforced by the backend.
    async fn find_by_id(&self, id: &Self::Id) -> Result<Option<Self::User>>;

    /// Execute a search query, materializing at most `query.limit` users
    /// in the backend's natural result order.
    ///
    /// Filters are OR-combined and case-insensitive (`LIKE %term%`).
    /// A relation path filter matches when a related record with a matching
    /// column exists; it is not a join-flatten. An unfiltered query is a
    /// plain listing. Soft-deleted rows appear only when
    /// `query.with_trashed` is set.
    async fn search(&self, query: &UserQuery) -> Result<Vec<Self::User>>;
}
