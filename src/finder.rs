//! User lookup and search for the impersonation picker.
//!
//! [`UserFinder`] turns a free-text search term (or none) into a bounded,
//! authorization-filtered, display-ready list of candidates, and resolves
//! raw identifiers (including the pair held in session storage) to full
//! user records. It is stateless and read-only: every call opens its own
//! query and discards it.
//!
//! # Tracing Events
//!
//! - `impersonate.search` - A search completed (candidate/authorized counts)
//!
//! # Example
//!
//! ```rust,ignore
//! use masquerade::{SearchConfig, UserFinder};
//!
//! let config = SearchConfig::new()
//!     .limit(20)
//!     .searchable_text_fields(&["name", "email", "profile.nickname"])?;
//!
//! let finder = UserFinder::new(store, checker, display, session, config);
//!
//! for candidate in finder.search_users(Some("ali")).await? {
//!     println!("{} ({})", candidate.val, candidate.key);
//! }
//! ```

use crate::authorization::{AuthorizationChecker, Capability};
use crate::config::SearchConfig;
use crate::display::DisplayFormatter;
use crate::error::{ImpersonateError, Result};
use crate::query::{FieldPath, UserQuery};
use crate::session::SessionStorage;
use crate::store::UserStore;
use serde::{Deserialize, Serialize};

/// One authorized search candidate, ready for a picker UI.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResult<Id> {
    /// The user's identifier.
    pub key: Id,
    /// The rendered display label.
    pub val: String,
}

/// User lookup and search collaborator.
///
/// Generic over the four seams it depends on: the user store, the
/// authorization policy, the label formatter, and the session storage
/// holding the active impersonation pair.
pub struct UserFinder<S, A, D, T>
where
    S: UserStore,
    A: AuthorizationChecker<S::User>,
    D: DisplayFormatter<S::User>,
    T: SessionStorage<Id = S::Id>,
{
    store: S,
    authorizer: A,
    display: D,
    session: T,
    config: SearchConfig,
}

impl<S, A, D, T> UserFinder<S, A, D, T>
where
    S: UserStore,
    A: AuthorizationChecker<S::User>,
    D: DisplayFormatter<S::User>,
    T: SessionStorage<Id = S::Id>,
{
    /// Create a new finder.
    #[must_use]
    pub fn new(store: S, authorizer: A, display: D, session: T, config: SearchConfig) -> Self {
        Self {
            store,
            authorizer,
            display,
            session,
            config,
        }
    }

    /// Get the search configuration.
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Get a reference to the underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Look up exactly one user by identifier.
    ///
    /// Fails with [`ImpersonateError::NotFound`] when no user matches.
    pub async fn find_user(&self, id: &S::Id) -> Result<S::User> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ImpersonateError::not_found(format!("user {id}")))
    }

    /// Search for impersonation candidates.
    ///
    /// With a non-empty term, every searchable column contributes a
    /// disjunctive case-insensitive substring filter; without one, this is
    /// an unfiltered listing. Results are capped at the configured limit,
    /// filtered to users the policy allows to be impersonated, and rendered
    /// through the display formatter, preserving store order.
    ///
    /// The limit caps the query, not the authorized count: the policy
    /// filter runs after the store has materialized its rows and can only
    /// shrink the result below the limit, never top it back up. Callers
    /// wanting exactly N authorized candidates must over-fetch or paginate
    /// externally.
    pub async fn search_users(&self, term: Option<&str>) -> Result<Vec<SearchResult<S::Id>>> {
        let mut query = UserQuery::new().limit(self.config.limit);

        if self.config.include_trashed && self.store.supports_soft_delete() {
            query = query.with_soft_deleted();
        }

        if let Some(term) = term.filter(|t| !t.is_empty()) {
            for path in self.searchable_columns() {
                query = query.or_like(path, term);
            }
        }

        let candidates = self.store.search(&query).await?;
        let candidate_count = candidates.len();

        let mut results = Vec::with_capacity(candidate_count);
        for user in candidates {
            if !self
                .authorizer
                .check(Capability::Impersonated, &user)
                .await?
            {
                continue;
            }
            results.push(SearchResult {
                key: self.store.user_key(&user),
                val: self.display.render(&user),
            });
        }

        tracing::debug!(
            target: "impersonate.search",
            term = term.unwrap_or(""),
            limit = self.config.limit,
            candidates = candidate_count,
            authorized = results.len(),
            "User search completed"
        );

        Ok(results)
    }

    /// Resolve the impersonator held in session storage.
    ///
    /// Fails with [`ImpersonateError::NotFound`] when no impersonation is
    /// active, or when the stored identifier no longer resolves to a user
    /// (account deleted mid-session). Callers must handle the latter; it is
    /// recoverable but surfaced.
    pub async fn impersonator_in_storage(&self) -> Result<S::User> {
        let id = self
            .session
            .impersonator_id()
            .await?
            .ok_or_else(|| ImpersonateError::not_found("no impersonator in session"))?;
        self.find_user(&id).await
    }

    /// Resolve the impersonated user held in session storage.
    ///
    /// Fails the same way [`impersonator_in_storage`](Self::impersonator_in_storage)
    /// does.
    pub async fn impersonated_in_storage(&self) -> Result<S::User> {
        let id = self
            .session
            .impersonated_id()
            .await?
            .ok_or_else(|| ImpersonateError::not_found("no impersonated user in session"))?;
        self.find_user(&id).await
    }

    /// The columns a search term is matched against, in match order.
    ///
    /// Always the identifier column first, then the configured fields.
    /// Duplicates are not removed; a configured duplicate of the identifier
    /// column yields a redundant but harmless filter.
    #[must_use]
    pub fn searchable_columns(&self) -> Vec<FieldPath> {
        let mut columns = Vec::with_capacity(1 + self.config.searchable_fields.len());
        columns.push(FieldPath::column(self.store.identifier_field()));
        columns.extend(self.config.searchable_fields.iter().cloned());
        columns
    }
}
