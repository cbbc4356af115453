//! Display label rendering for search results.
//!
//! Each search candidate becomes one picker row: an identifier plus a
//! human-readable label. How the label is composed is the formatter's
//! business; the finder just calls [`DisplayFormatter::render`].

use std::fmt;

/// Trait for rendering a user as a display label.
///
/// Any `Fn(&U) -> String` closure works directly:
///
/// ```rust,ignore
/// let finder = UserFinder::new(store, checker, |u: &user::Model| u.email.clone(), session, config);
/// ```
pub trait DisplayFormatter<U>: Send + Sync {
    /// Render a single-line label for `user`.
    fn render(&self, user: &U) -> String;
}

impl<U, F> DisplayFormatter<U> for F
where
    F: Fn(&U) -> String + Send + Sync,
{
    fn render(&self, user: &U) -> String {
        self(user)
    }
}

/// A formatter composing configured fields through an accessor function.
///
/// Fields resolving to `None` or an empty string are skipped; the rest are
/// joined with the separator, in configured order.
///
/// # Example
///
/// ```rust
/// use masquerade::FieldDisplay;
///
/// struct User {
///     name: String,
///     email: String,
/// }
///
/// let display = FieldDisplay::new(["name", "email"], |user: &User, field| {
///     match field {
///         "name" => Some(user.name.clone()),
///         "email" => Some(user.email.clone()),
///         _ => None,
///     }
/// })
/// .separator(" - ");
///
/// # use masquerade::DisplayFormatter;
/// let user = User { name: "Alice".into(), email: "alice@example.com".into() };
/// assert_eq!(display.render(&user), "Alice - alice@example.com");
/// ```
pub struct FieldDisplay<U> {
    fields: Vec<String>,
    separator: String,
    accessor: Box<dyn Fn(&U, &str) -> Option<String> + Send + Sync>,
}

impl<U> FieldDisplay<U> {
    /// Create a formatter over the given fields and accessor.
    pub fn new<I, S, F>(fields: I, accessor: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&U, &str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            separator: " ".to_string(),
            accessor: Box::new(accessor),
        }
    }

    /// Set the separator placed between field values.
    #[must_use]
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}

impl<U> fmt::Debug for FieldDisplay<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDisplay")
            .field("fields", &self.fields)
            .field("separator", &self.separator)
            .finish_non_exhaustive()
    }
}

impl<U> DisplayFormatter<U> for FieldDisplay<U> {
    fn render(&self, user: &U) -> String {
        self.fields
            .iter()
            .filter_map(|field| (self.accessor)(user, field))
            .filter(|value| !value.is_empty())
            .collect::<Vec<_>>()
            .join(&self.separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn user(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn display(fields: &[&str]) -> FieldDisplay<HashMap<String, String>> {
        FieldDisplay::new(fields.iter().copied(), |u: &HashMap<String, String>, f| {
            u.get(f).cloned()
        })
    }

    #[test]
    fn test_renders_fields_in_order() {
        let u = user(&[("name", "Alice"), ("email", "alice@example.com")]);
        assert_eq!(
            display(&["name", "email"]).render(&u),
            "Alice alice@example.com"
        );
        assert_eq!(
            display(&["email", "name"]).render(&u),
            "alice@example.com Alice"
        );
    }

    #[test]
    fn test_skips_missing_and_empty_fields() {
        let u = user(&[("name", "Alice"), ("nickname", "")]);
        assert_eq!(display(&["name", "nickname", "email"]).render(&u), "Alice");
    }

    #[test]
    fn test_custom_separator() {
        let u = user(&[("name", "Alice"), ("email", "a@b.c")]);
        let d = display(&["name", "email"]).separator(" - ");
        assert_eq!(d.render(&u), "Alice - a@b.c");
    }

    #[test]
    fn test_closure_formatter() {
        let f = |u: &HashMap<String, String>| u.get("name").cloned().unwrap_or_default();
        let u = user(&[("name", "Bob")]);
        assert_eq!(DisplayFormatter::render(&f, &u), "Bob");
    }
}
