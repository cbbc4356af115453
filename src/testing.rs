//! In-memory test doubles and fake-data helpers.
//!
//! These back this crate's own tests and are public so applications can
//! test their impersonation wiring without a database: an in-memory user
//! store that interprets [`UserQuery`](crate::query::UserQuery) faithfully,
//! a capability checker driven by a deny-list, and a session storage
//! holding the pair in memory.

use crate::authorization::{AuthorizationChecker, Capability};
use crate::display::FieldDisplay;
use crate::error::Result;
use crate::query::{FieldPath, UserQuery};
use crate::session::SessionStorage;
use crate::store::UserStore;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

/// A user record for tests: an id, flat attribute fields, related records,
/// and a soft-deletion flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestUser {
    /// Unique identifier.
    pub id: String,
    /// Direct attribute fields.
    pub fields: HashMap<String, String>,
    /// Related records, keyed by dotted relation path.
    pub relations: HashMap<String, Vec<HashMap<String, String>>>,
    /// Whether the user is soft-deleted.
    pub trashed: bool,
}

impl TestUser {
    /// Create a user with the given id and no fields.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: HashMap::new(),
            relations: HashMap::new(),
            trashed: false,
        }
    }

    /// Set an attribute field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Add a related record with a single field, under a relation path
    /// (e.g. `"profile"` carrying a `nickname`).
    #[must_use]
    pub fn related(
        mut self,
        relation: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let mut row = HashMap::new();
        row.insert(field.into(), value.into());
        self.relations.entry(relation.into()).or_default().push(row);
        self
    }

    /// Mark the user soft-deleted.
    #[must_use]
    pub fn trashed(mut self) -> Self {
        self.trashed = true;
        self
    }

    /// Resolve a direct column value. `"id"` resolves to the identifier.
    #[must_use]
    pub fn value(&self, column: &str) -> Option<&str> {
        if column == "id" {
            Some(&self.id)
        } else {
            self.fields.get(column).map(String::as_str)
        }
    }
}

/// In-memory user store preserving insertion order as its natural order.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<TestUser>>,
    soft_delete: bool,
}

impl InMemoryUserStore {
    /// Create an empty store whose user entity has no soft-delete notion.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store whose user entity supports soft-deletion.
    #[must_use]
    pub fn with_soft_delete() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            soft_delete: true,
        }
    }

    /// Add a user, appended at the end of the natural order.
    pub fn add(&self, user: TestUser) {
        self.users.write().unwrap().push(user);
    }

    /// Remove a user by id, returning whether one was removed.
    pub fn remove(&self, id: &str) -> bool {
        let mut users = self.users.write().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        users.len() < before
    }

    fn matches(user: &TestUser, query: &UserQuery) -> bool {
        if query.is_unfiltered() {
            return true;
        }
        query.filters.iter().any(|filter| match &filter.path {
            FieldPath::Column(column) => user
                .value(column)
                .map_or(false, |value| filter.matches(value)),
            FieldPath::Related { relations, column } => user
                .relations
                .get(&relations.join("."))
                .map_or(false, |rows| {
                    rows.iter().any(|row| {
                        row.get(column).map_or(false, |value| filter.matches(value))
                    })
                }),
        })
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    type User = TestUser;
    type Id = String;

    fn supports_soft_delete(&self) -> bool {
        self.soft_delete
    }

    fn user_key(&self, user: &TestUser) -> String {
        user.id.clone()
    }

    async fn find_by_id(&self, id: &String) -> Result<Option<TestUser>> {
        Ok(self
            .users
            .read()
            .unwrap()
            .iter()
            .find(|u| &u.id == id)
            .cloned())
    }

    async fn search(&self, query: &UserQuery) -> Result<Vec<TestUser>> {
        Ok(self
            .users
            .read()
            .unwrap()
            .iter()
            .filter(|u| query.with_trashed || !u.trashed)
            .filter(|u| Self::matches(u, query))
            .take(query.limit)
            .cloned()
            .collect())
    }
}

/// Capability checker driven by a deny-list; everything else is allowed.
#[derive(Default)]
pub struct StaticAuthorizer {
    denied: RwLock<HashSet<(Capability, String)>>,
}

impl StaticAuthorizer {
    /// Create a checker that allows everything.
    #[must_use]
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Deny a capability for a specific user id.
    pub fn deny(&self, capability: Capability, id: impl Into<String>) {
        self.denied
            .write()
            .unwrap()
            .insert((capability, id.into()));
    }
}

#[async_trait]
impl AuthorizationChecker<TestUser> for StaticAuthorizer {
    async fn check(&self, capability: Capability, user: &TestUser) -> Result<bool> {
        Ok(!self
            .denied
            .read()
            .unwrap()
            .contains(&(capability, user.id.clone())))
    }
}

/// Session storage holding the impersonation pair in memory.
#[derive(Default)]
pub struct InMemorySessionStorage {
    pair: RwLock<Option<(String, String)>>,
}

impl InMemorySessionStorage {
    /// Create storage with no active impersonation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage with a pre-seeded impersonation pair.
    #[must_use]
    pub fn with_pair(impersonator: impl Into<String>, impersonated: impl Into<String>) -> Self {
        Self {
            pair: RwLock::new(Some((impersonator.into(), impersonated.into()))),
        }
    }
}

#[async_trait]
impl SessionStorage for InMemorySessionStorage {
    type Id = String;

    async fn impersonator_id(&self) -> Result<Option<String>> {
        Ok(self.pair.read().unwrap().as_ref().map(|p| p.0.clone()))
    }

    async fn impersonated_id(&self) -> Result<Option<String>> {
        Ok(self.pair.read().unwrap().as_ref().map(|p| p.1.clone()))
    }

    async fn set(&self, impersonator: String, impersonated: String) -> Result<()> {
        *self.pair.write().unwrap() = Some((impersonator, impersonated));
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.pair.write().unwrap() = None;
        Ok(())
    }
}

/// A [`FieldDisplay`] over [`TestUser`] attribute fields.
#[must_use]
pub fn field_display(fields: &[&str]) -> FieldDisplay<TestUser> {
    FieldDisplay::new(fields.iter().copied(), |user: &TestUser, field| {
        user.value(field).map(str::to_string)
    })
}

/// Helper functions for generating fake test data.
pub mod fake {
    use uuid::Uuid;

    /// Generate a fake email address.
    pub fn email() -> String {
        format!("test-{}@example.com", Uuid::new_v4().simple())
    }

    /// Generate a fake UUID as a string.
    pub fn uuid() -> String {
        Uuid::new_v4().to_string()
    }

    /// Generate a fake name.
    pub fn name() -> String {
        format!("Test User {}", &Uuid::new_v4().simple().to_string()[..8])
    }

    /// Generate a fake numeric user id as a string.
    pub fn user_id() -> String {
        format!("user-{}", fastrand::u64(..))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_preserves_insertion_order() {
        let store = InMemoryUserStore::new();
        store.add(TestUser::new("2").field("name", "Bob"));
        store.add(TestUser::new("1").field("name", "Alice"));

        let users = store.search(&UserQuery::new()).await.unwrap();
        let ids: Vec<&str> = users.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, ["2", "1"]);
    }

    #[tokio::test]
    async fn test_store_applies_filters_before_limit() {
        let store = InMemoryUserStore::new();
        store.add(TestUser::new("1").field("name", "Bob"));
        store.add(TestUser::new("2").field("name", "Alice"));
        store.add(TestUser::new("3").field("name", "Alicia"));

        // Bob does not consume a limit slot; both matches come back.
        let query = UserQuery::new()
            .limit(2)
            .or_like(FieldPath::column("name"), "ali");
        let users = store.search(&query).await.unwrap();
        assert_eq!(users.len(), 2);
    }

    #[tokio::test]
    async fn test_store_relation_matching() {
        let store = InMemoryUserStore::new();
        store.add(TestUser::new("1").related("profile", "nickname", "Ace"));
        store.add(TestUser::new("2").field("profile.nickname", "Ace"));

        let query = UserQuery::new().or_like(FieldPath::parse("profile.nickname").unwrap(), "ace");
        let users = store.search(&query).await.unwrap();

        // Only the genuinely related record matches, not the literal
        // dotted column name.
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, "1");
    }

    #[tokio::test]
    async fn test_authorizer_deny_list() {
        let checker = StaticAuthorizer::allow_all();
        checker.deny(Capability::Impersonated, "2");

        let alice = TestUser::new("1");
        let bob = TestUser::new("2");
        assert!(checker.check(Capability::Impersonated, &alice).await.unwrap());
        assert!(!checker.check(Capability::Impersonated, &bob).await.unwrap());
        assert!(checker.check(Capability::Impersonate, &bob).await.unwrap());
    }

    #[tokio::test]
    async fn test_session_storage_round_trip() {
        let session = InMemorySessionStorage::new();
        assert!(session.impersonator_id().await.unwrap().is_none());

        session.set("1".into(), "2".into()).await.unwrap();
        assert_eq!(session.impersonator_id().await.unwrap().as_deref(), Some("1"));
        assert_eq!(session.impersonated_id().await.unwrap().as_deref(), Some("2"));

        session.clear().await.unwrap();
        assert!(session.impersonated_id().await.unwrap().is_none());
    }

    #[test]
    fn test_fake_helpers() {
        assert!(fake::email().ends_with("@example.com"));
        assert_ne!(fake::uuid(), fake::uuid());
        assert!(fake::name().starts_with("Test User "));
    }
}
