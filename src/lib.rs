//! Masquerade - user impersonation building blocks
//!
//! Masquerade lets an authorized operator temporarily assume another user's
//! identity for support and debugging, and revert afterwards. It provides
//! the finder that powers the "pick a user to impersonate" UI and the
//! manager that performs the session swap, over trait seams your
//! application implements for its own database, policy, and session layers.
//!
//! # Features
//!
//! - **Search**: bounded, authorization-filtered candidate search with
//!   configurable searchable fields, including relation paths
//! - **Lookup**: identifier-to-user resolution, including the pair held in
//!   session storage while impersonation is active
//! - **Session swap**: begin/leave with self- and nested-impersonation
//!   guards, audited through `tracing`
//! - **Testing**: in-memory doubles for every seam
//!
//! # Quick Start
//!
//! ```rust
//! use masquerade::testing::{
//!     field_display, InMemorySessionStorage, InMemoryUserStore, StaticAuthorizer, TestUser,
//! };
//! use masquerade::{SearchConfig, UserFinder};
//!
//! #[tokio::main]
//! async fn main() -> masquerade::Result<()> {
//!     let store = InMemoryUserStore::new();
//!     store.add(
//!         TestUser::new("1")
//!             .field("name", "Alice")
//!             .field("email", "alice@example.com"),
//!     );
//!
//!     let config = SearchConfig::new()
//!         .limit(20)
//!         .searchable_text_fields(&["name", "email"])?;
//!
//!     let finder = UserFinder::new(
//!         store,
//!         StaticAuthorizer::allow_all(),
//!         field_display(&["name", "email"]),
//!         InMemorySessionStorage::new(),
//!         config,
//!     );
//!
//!     for candidate in finder.search_users(Some("ali")).await? {
//!         println!("{} -> {}", candidate.key, candidate.val);
//!     }
//!     Ok(())
//! }
//! ```

pub mod authorization;
pub mod config;
pub mod display;
mod error;
pub mod finder;
pub mod manager;
pub mod query;
pub mod session;
pub mod store;
pub mod testing;

// Re-exports for public API
pub use authorization::{AuthorizationChecker, Capability};
pub use config::{SearchConfig, DEFAULT_LIMIT};
pub use display::{DisplayFormatter, FieldDisplay};
pub use error::{ImpersonateError, Result};
pub use finder::{SearchResult, UserFinder};
pub use manager::ImpersonateManager;
pub use query::{FieldFilter, FieldPath, UserQuery};
pub use session::SessionStorage;
pub use store::UserStore;
