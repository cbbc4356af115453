//! Authorization policy seam.
//!
//! The finder and manager never decide who may impersonate whom; they ask
//! an [`AuthorizationChecker`] supplied by the application. Search results
//! are filtered to users the checker approves, so unauthorized candidates
//! never reach the picker UI.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The capability being checked against a user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// The user may act as an impersonator.
    Impersonate,
    /// The user may be impersonated by someone else.
    Impersonated,
}

impl Capability {
    /// The wire/policy name of this capability.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Impersonate => "impersonate",
            Self::Impersonated => "impersonated",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for impersonation capability checks.
///
/// # Example
///
/// ```rust,ignore
/// use masquerade::{AuthorizationChecker, Capability};
/// use async_trait::async_trait;
///
/// struct RoleChecker;
///
/// #[async_trait]
/// impl AuthorizationChecker<user::Model> for RoleChecker {
///     async fn check(&self, capability: Capability, user: &user::Model) -> Result<bool> {
///         Ok(match capability {
///             Capability::Impersonate => user.is_admin,
///             Capability::Impersonated => !user.is_admin,
///         })
///     }
/// }
/// ```
#[async_trait]
pub trait AuthorizationChecker<U>: Send + Sync {
    /// Check whether `user` holds `capability`.
    ///
    /// `Ok(false)` means "denied"; errors are reserved for the policy
    /// backend itself failing.
    async fn check(&self, capability: Capability, user: &U) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_names() {
        assert_eq!(Capability::Impersonate.as_str(), "impersonate");
        assert_eq!(Capability::Impersonated.as_str(), "impersonated");
        assert_eq!(Capability::Impersonated.to_string(), "impersonated");
    }

    #[test]
    fn test_capability_serde() {
        let json = serde_json::to_string(&Capability::Impersonated).unwrap();
        assert_eq!(json, "\"impersonated\"");
    }
}
