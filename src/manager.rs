//! Impersonation session swap.
//!
//! [`ImpersonateManager`] begins and ends impersonation: it resolves both
//! parties, evaluates the authorization policy on each side, guards against
//! self- and nested impersonation, and records the active pair in session
//! storage. Reverting restores the original identity by clearing the pair.
//!
//! # Tracing Events
//!
//! - `impersonate.entered` - Impersonation began
//! - `impersonate.left` - Impersonation ended, original identity restored
//! - `impersonate.rejected` - A begin attempt was refused (with a reason)
//!
//! # Example
//!
//! ```rust,ignore
//! use masquerade::ImpersonateManager;
//!
//! let manager = ImpersonateManager::new(store, checker, session);
//!
//! // Operator 1 assumes user 42's identity
//! manager.begin(&1, &42).await?;
//! assert!(manager.is_impersonating().await?);
//!
//! // ...support work happens as user 42...
//!
//! manager.leave().await?;
//! ```

use crate::authorization::{AuthorizationChecker, Capability};
use crate::error::{ImpersonateError, Result};
use crate::session::SessionStorage;
use crate::store::UserStore;

/// Manager for beginning and ending impersonation.
pub struct ImpersonateManager<S, A, T>
where
    S: UserStore,
    A: AuthorizationChecker<S::User>,
    T: SessionStorage<Id = S::Id>,
{
    store: S,
    authorizer: A,
    session: T,
}

impl<S, A, T> ImpersonateManager<S, A, T>
where
    S: UserStore,
    A: AuthorizationChecker<S::User>,
    T: SessionStorage<Id = S::Id>,
{
    /// Create a new manager.
    #[must_use]
    pub fn new(store: S, authorizer: A, session: T) -> Self {
        Self {
            store,
            authorizer,
            session,
        }
    }

    /// Begin impersonating `target` as `impersonator`.
    ///
    /// Guards, in order: no self-impersonation, both identifiers resolve,
    /// the impersonator holds [`Capability::Impersonate`], the target holds
    /// [`Capability::Impersonated`], and the session is not already
    /// impersonating (no nesting). On success the pair is written to
    /// session storage.
    pub async fn begin(&self, impersonator: &S::Id, target: &S::Id) -> Result<()> {
        if impersonator == target {
            tracing::warn!(
                target: "impersonate.rejected",
                impersonator = %impersonator,
                reason = "self_impersonation",
                "Impersonation rejected: cannot impersonate yourself"
            );
            return Err(ImpersonateError::bad_request(
                "cannot impersonate yourself",
            ));
        }

        let actor = self
            .store
            .find_by_id(impersonator)
            .await?
            .ok_or_else(|| ImpersonateError::not_found(format!("user {impersonator}")))?;
        let subject = self
            .store
            .find_by_id(target)
            .await?
            .ok_or_else(|| ImpersonateError::not_found(format!("user {target}")))?;

        if !self.authorizer.check(Capability::Impersonate, &actor).await? {
            tracing::warn!(
                target: "impersonate.rejected",
                impersonator = %impersonator,
                impersonated = %target,
                reason = "actor_not_allowed",
                "Impersonation rejected: actor may not impersonate"
            );
            return Err(ImpersonateError::forbidden(
                "user is not allowed to impersonate",
            ));
        }

        if !self
            .authorizer
            .check(Capability::Impersonated, &subject)
            .await?
        {
            tracing::warn!(
                target: "impersonate.rejected",
                impersonator = %impersonator,
                impersonated = %target,
                reason = "target_not_allowed",
                "Impersonation rejected: target may not be impersonated"
            );
            return Err(ImpersonateError::forbidden(
                "user may not be impersonated",
            ));
        }

        if self.session.impersonated_id().await?.is_some() {
            tracing::warn!(
                target: "impersonate.rejected",
                impersonator = %impersonator,
                impersonated = %target,
                reason = "already_impersonating",
                "Impersonation rejected: session is already impersonating"
            );
            return Err(ImpersonateError::bad_request(
                "already impersonating; leave first",
            ));
        }

        self.session
            .set(impersonator.clone(), target.clone())
            .await?;

        tracing::info!(
            target: "impersonate.entered",
            impersonator = %impersonator,
            impersonated = %target,
            "Impersonation started"
        );

        Ok(())
    }

    /// End the active impersonation, restoring the original identity.
    ///
    /// Fails with [`ImpersonateError::NotFound`] when the session is not
    /// impersonating.
    pub async fn leave(&self) -> Result<()> {
        let impersonated = self
            .session
            .impersonated_id()
            .await?
            .ok_or_else(|| ImpersonateError::not_found("no active impersonation"))?;
        let impersonator = self
            .session
            .impersonator_id()
            .await?
            .map(|id| id.to_string())
            .unwrap_or_default();

        self.session.clear().await?;

        tracing::info!(
            target: "impersonate.left",
            impersonator = %impersonator,
            impersonated = %impersonated,
            "Impersonation ended"
        );

        Ok(())
    }

    /// Whether this session is currently impersonating.
    pub async fn is_impersonating(&self) -> Result<bool> {
        Ok(self.session.impersonated_id().await?.is_some())
    }

    /// Get a reference to the underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get a reference to the session storage.
    #[must_use]
    pub fn session(&self) -> &T {
        &self.session
    }
}
