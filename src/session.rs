//! Session storage seam for the active impersonation pair.
//!
//! While an impersonation is active, the session holds two identifiers:
//! who is impersonating (the impersonator) and who is being impersonated.
//! This trait abstracts where that pair lives (cookie session, server-side
//! session store, token claims). Consistency guarantees of the backing
//! session are its own concern, not this crate's.

use crate::error::Result;
use async_trait::async_trait;

/// Trait for reading and writing the active impersonation pair.
///
/// Implementations are request-scoped: one instance per session.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// The identifier type, matching the user store's key type.
    type Id: Clone + Send + Sync;

    /// The identifier of the impersonating user, if impersonation is active.
    async fn impersonator_id(&self) -> Result<Option<Self::Id>>;

    /// The identifier of the impersonated user, if impersonation is active.
    async fn impersonated_id(&self) -> Result<Option<Self::Id>>;

    /// Record an impersonation pair, replacing any previous one.
    async fn set(&self, impersonator: Self::Id, impersonated: Self::Id) -> Result<()>;

    /// Forget the impersonation pair.
    ///
    /// A no-op when nothing is stored.
    async fn clear(&self) -> Result<()>;
}
