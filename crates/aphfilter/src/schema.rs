//! Resource-level filter configuration: which fields may be filtered and
//! which storage column each one maps to.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Mapping from logical field names to storage column (or attribute) names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMap(BTreeMap<String, String>);

impl FieldMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps every field to a column of the same name.
    pub fn identity<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        fields
            .into_iter()
            .map(|f| {
                let f = f.into();
                (f.clone(), f)
            })
            .collect()
    }

    /// Adds or replaces the column for `field`.
    pub fn insert(&mut self, field: impl Into<String>, column: impl Into<String>) {
        self.0.insert(field.into(), column.into());
    }

    /// Returns the column for `field`.
    pub fn column(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(field, column)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(f, c)| (f.as_str(), c.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// The filterable surface of one exposed resource.
///
/// `fields` is the allow-list; `columns` overrides the storage column for
/// fields whose column name differs from the field name.
///
/// # Example
///
/// ```
/// use aphfilter::ResourceSchema;
///
/// let schema = ResourceSchema::new()
///     .field("age")
///     .mapped_field("name", "full_name");
/// assert!(schema.is_allowed("age"));
/// assert_eq!(schema.column_map().column("name"), Some("full_name"));
/// assert_eq!(schema.column_map().column("age"), Some("age"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSchema {
    /// Field names that may appear in a filter.
    #[serde(default)]
    pub fields: Vec<String>,

    /// Column overrides, keyed by field name.
    #[serde(default, skip_serializing_if = "FieldMap::is_empty")]
    pub columns: FieldMap,
}

impl ResourceSchema {
    /// Creates a schema that allows nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allows `field`, stored under a column of the same name.
    pub fn field(mut self, field: impl Into<String>) -> Self {
        let field = field.into();
        if !self.fields.contains(&field) {
            self.fields.push(field);
        }
        self
    }

    /// Allows `field`, stored under `column`.
    pub fn mapped_field(self, field: impl Into<String>, column: impl Into<String>) -> Self {
        let field = field.into();
        let mut schema = self.field(field.clone());
        schema.columns.insert(field, column);
        schema
    }

    /// The allow-list.
    pub fn allowed_fields(&self) -> &[String] {
        &self.fields
    }

    /// Returns true if `field` is on the allow-list.
    pub fn is_allowed(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    /// Builds the field-to-column map for every allowed field.
    ///
    /// Overrides for fields outside the allow-list are ignored.
    pub fn column_map(&self) -> FieldMap {
        self.fields
            .iter()
            .map(|f| {
                let column = self.columns.column(f).unwrap_or(f.as_str());
                (f.as_str(), column)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_map_lookup() {
        let map: FieldMap = [("name", "full_name"), ("age", "age")].into_iter().collect();
        assert_eq!(map.column("name"), Some("full_name"));
        assert_eq!(map.column("missing"), None);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_identity_map() {
        let map = FieldMap::identity(["a", "b"]);
        assert_eq!(map.column("a"), Some("a"));
        assert_eq!(map.iter().collect::<Vec<_>>(), vec![("a", "a"), ("b", "b")]);
    }

    #[test]
    fn test_schema_builder_dedupes() {
        let schema = ResourceSchema::new().field("name").field("name");
        assert_eq!(schema.allowed_fields(), ["name".to_string()]);
    }

    #[test]
    fn test_column_map_ignores_unlisted_overrides() {
        let mut schema = ResourceSchema::new().field("name");
        schema.columns.insert("secret", "secret_column");
        let map = schema.column_map();
        assert_eq!(map.column("secret"), None);
        assert_eq!(map.column("name"), Some("name"));
    }

    #[test]
    fn test_schema_from_toml() {
        let schema: ResourceSchema = toml::from_str(
            r#"
            fields = ["name", "created_at"]

            [columns]
            name = "full_name"
            "#,
        )
        .unwrap();
        assert!(schema.is_allowed("created_at"));
        assert!(!schema.is_allowed("full_name"));
        assert_eq!(schema.column_map().column("name"), Some("full_name"));
    }

    #[test]
    fn test_schema_serialize_skips_empty_columns() {
        let schema = ResourceSchema::new().field("a");
        let json = serde_json::to_string(&schema).unwrap();
        assert_eq!(json, r#"{"fields":["a"]}"#);
    }
}
