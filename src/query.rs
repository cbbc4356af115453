//! Query description passed from the finder to the user store.
//!
//! The finder never talks to a database directly. It builds a [`UserQuery`]
//! describing what it wants (row cap, soft-delete visibility, substring
//! filters) and hands it to the [`UserStore`](crate::store::UserStore)
//! implementation, which translates it into whatever its backend speaks.
//!
//! Searchable fields are [`FieldPath`]s, validated when the configuration is
//! built rather than when a query runs. A path is either a plain column on
//! the user record, or a column reached through one or more named relations
//! (`profile.nickname`). Relation paths carry "exists a related record
//! matching" semantics, not a join-flatten.

use crate::config::DEFAULT_LIMIT;
use crate::error::{ImpersonateError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A searchable field, either a direct column or a column behind relations.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FieldPath {
    /// A column on the user record itself.
    Column(String),
    /// A column on a related record, reached through named relations.
    Related {
        /// Relation names, outermost first.
        relations: Vec<String>,
        /// The column on the final related record.
        column: String,
    },
}

impl FieldPath {
    /// Create a path for a direct column.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column(name.into())
    }

    /// Parse a dotted path (`name`, `profile.nickname`, `org.owner.email`).
    ///
    /// Fails with [`ImpersonateError::InvalidFieldPath`] on empty input or
    /// empty segments, so malformed configuration is caught when the config
    /// is loaded instead of when a search runs.
    pub fn parse(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Err(ImpersonateError::invalid_field_path("empty path"));
        }
        let segments: Vec<&str> = path.split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(ImpersonateError::invalid_field_path(format!(
                "empty segment in `{path}`"
            )));
        }
        if segments.len() == 1 {
            return Ok(Self::Column(segments[0].to_string()));
        }
        let column = segments[segments.len() - 1].to_string();
        let relations = segments[..segments.len() - 1]
            .iter()
            .map(|s| (*s).to_string())
            .collect();
        Ok(Self::Related { relations, column })
    }

    /// The column name at the end of the path.
    #[must_use]
    pub fn column_name(&self) -> &str {
        match self {
            Self::Column(name) => name,
            Self::Related { column, .. } => column,
        }
    }

    /// Whether this path traverses a relation.
    #[must_use]
    pub fn is_related(&self) -> bool {
        matches!(self, Self::Related { .. })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column(name) => f.write_str(name),
            Self::Related { relations, column } => {
                write!(f, "{}.{}", relations.join("."), column)
            }
        }
    }
}

impl std::str::FromStr for FieldPath {
    type Err = ImpersonateError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FieldPath {
    type Error = ImpersonateError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.to_string()
    }
}

/// One disjunctive substring filter within a [`UserQuery`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldFilter {
    /// The field to match against.
    pub path: FieldPath,
    /// The raw search term. `LIKE %term%` semantics, case-insensitive.
    pub term: String,
}

impl FieldFilter {
    /// Check a candidate value against this filter.
    ///
    /// Store implementations over SQL backends will express this as
    /// `LOWER(col) LIKE '%term%'` instead; this helper gives in-memory
    /// backends the same semantics.
    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        value.to_lowercase().contains(&self.term.to_lowercase())
    }
}

/// A read-only user query built by the finder and executed by the store.
///
/// Filters are OR-combined: a user matches when any filter matches. With no
/// filters the query is an unfiltered listing. The row cap applies inside
/// the query engine, together with the filters, the way a SQL `LIMIT` does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserQuery {
    /// Maximum number of rows to materialize.
    pub limit: usize,
    /// Whether soft-deleted rows are visible to this query.
    pub with_trashed: bool,
    /// Disjunctive substring filters.
    pub filters: Vec<FieldFilter>,
}

impl Default for UserQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            with_trashed: false,
            filters: Vec::new(),
        }
    }
}

impl UserQuery {
    /// Create a query with the default row cap and no filters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of rows the store may return.
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Relax the query to include soft-deleted rows.
    #[must_use]
    pub fn with_soft_deleted(mut self) -> Self {
        self.with_trashed = true;
        self
    }

    /// Add a disjunctive case-insensitive substring filter.
    #[must_use]
    pub fn or_like(mut self, path: FieldPath, term: impl Into<String>) -> Self {
        self.filters.push(FieldFilter {
            path,
            term: term.into(),
        });
        self
    }

    /// Whether any candidate passes the filter set.
    ///
    /// True when there are no filters (unfiltered listing).
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.filters.is_empty()
    }
}
