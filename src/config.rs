//! Search configuration.
//!
//! An explicit struct passed by the caller, with defaults applied at
//! construction. Searchable fields are parsed into [`FieldPath`]s up front,
//! so a malformed dotted path fails when the configuration is built.

use crate::error::Result;
use crate::query::FieldPath;
use serde::{Deserialize, Serialize};

/// Default row cap for user searches.
pub const DEFAULT_LIMIT: usize = 10;

/// Configuration for user search behavior.
///
/// # Example
///
/// ```rust
/// use masquerade::SearchConfig;
///
/// let config = SearchConfig::new()
///     .limit(25)
///     .searchable_text_fields(&["name", "email", "profile.nickname"])
///     .unwrap();
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of candidates a search materializes.
    pub limit: usize,
    /// Whether searches see soft-deleted users (only honored when the
    /// store reports soft-delete support).
    pub include_trashed: bool,
    /// Fields eligible for substring matching, in match order. The
    /// identifier field is always searched first and need not be listed.
    pub searchable_fields: Vec<FieldPath>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            include_trashed: false,
            searchable_fields: Vec::new(),
        }
    }
}

impl SearchConfig {
    /// Create a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search row cap.
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Set whether searches see soft-deleted users.
    #[must_use]
    pub fn include_trashed(mut self, include: bool) -> Self {
        self.include_trashed = include;
        self
    }

    /// Add a searchable field.
    #[must_use]
    pub fn searchable_field(mut self, path: FieldPath) -> Self {
        self.searchable_fields.push(path);
        self
    }

    /// Set the searchable fields from dotted text paths.
    ///
    /// Replaces any previously configured fields. Fails on the first
    /// malformed path.
    pub fn searchable_text_fields<S: AsRef<str>>(mut self, paths: &[S]) -> Result<Self> {
        self.searchable_fields = paths
            .iter()
            .map(|p| FieldPath::parse(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::new();
        assert_eq!(config.limit, DEFAULT_LIMIT);
        assert!(!config.include_trashed);
        assert!(config.searchable_fields.is_empty());
    }

    #[test]
    fn test_text_fields_parse_at_config_time() {
        let config = SearchConfig::new()
            .searchable_text_fields(&["name", "profile.nickname"])
            .unwrap();
        assert_eq!(config.searchable_fields.len(), 2);
        assert!(config.searchable_fields[1].is_related());

        let err = SearchConfig::new().searchable_text_fields(&["name", "bad..path"]);
        assert!(err.is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let config = SearchConfig::new()
            .limit(5)
            .searchable_text_fields(&["email"])
            .unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let back: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
