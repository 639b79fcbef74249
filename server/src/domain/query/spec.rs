//! Declared filter fields
//!
//! A [`FilterSpec`] is the table of query parameters a resource accepts:
//! external name (and aliases) -> internal field identifier -> kind.
//! Nothing outside the table is ever bound.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// Primitive kind a bound value is coerced to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::String => write!(f, "string"),
            FieldKind::Integer => write!(f, "integer"),
        }
    }
}

/// One bindable field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Name as it appears in the query string
    pub external_name: &'static str,
    /// Identifier the value is stored under in the bound object
    pub field: &'static str,
    pub kind: FieldKind,
    /// Additional external names resolving to this field
    pub aliases: Vec<&'static str>,
}

impl FieldSpec {
    pub fn new(external_name: &'static str, field: &'static str, kind: FieldKind) -> Self {
        Self {
            external_name,
            field,
            kind,
            aliases: Vec::new(),
        }
    }

    /// String field whose external name equals its identifier
    pub fn string(name: &'static str) -> Self {
        Self::new(name, name, FieldKind::String)
    }

    /// Integer field whose external name equals its identifier
    pub fn integer(name: &'static str) -> Self {
        Self::new(name, name, FieldKind::Integer)
    }

    pub fn with_alias(mut self, alias: &'static str) -> Self {
        self.aliases.push(alias);
        self
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FilterSpecError {
    #[error("filter spec must declare at least one field")]
    Empty,

    #[error("external name '{0}' is declared more than once")]
    DuplicateName(String),

    #[error("field identifier '{0}' is declared more than once")]
    DuplicateField(String),
}

/// Validated, immutable lookup table of bindable fields
#[derive(Debug, Clone)]
pub struct FilterSpec {
    fields: Vec<FieldSpec>,
    by_name: HashMap<&'static str, usize>,
}

impl FilterSpec {
    /// Build a spec, rejecting empty tables and any name or identifier collision.
    /// Aliases share the external-name namespace.
    pub fn new(fields: Vec<FieldSpec>) -> Result<Self, FilterSpecError> {
        if fields.is_empty() {
            return Err(FilterSpecError::Empty);
        }

        let mut by_name = HashMap::new();
        let mut seen_fields = HashMap::new();

        for (idx, spec) in fields.iter().enumerate() {
            if seen_fields.insert(spec.field, idx).is_some() {
                return Err(FilterSpecError::DuplicateField(spec.field.to_string()));
            }
            for name in std::iter::once(&spec.external_name).chain(spec.aliases.iter()) {
                if by_name.insert(*name, idx).is_some() {
                    return Err(FilterSpecError::DuplicateName(name.to_string()));
                }
            }
        }

        Ok(Self { fields, by_name })
    }

    /// Exact-match lookup by external name or alias
    pub fn resolve(&self, name: &str) -> Option<&FieldSpec> {
        self.by_name.get(name).map(|&idx| &self.fields[idx])
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// All accepted external names, aliases included, sorted
    pub fn accepted_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.by_name.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_spec_rejected() {
        assert_eq!(FilterSpec::new(vec![]).unwrap_err(), FilterSpecError::Empty);
    }

    #[test]
    fn test_duplicate_external_name_rejected() {
        let err = FilterSpec::new(vec![
            FieldSpec::new("bairro", "Bairro", FieldKind::String),
            FieldSpec::new("bairro", "Other", FieldKind::String),
        ])
        .unwrap_err();
        assert_eq!(err, FilterSpecError::DuplicateName("bairro".to_string()));
    }

    #[test]
    fn test_alias_colliding_with_name_rejected() {
        let err = FilterSpec::new(vec![
            FieldSpec::string("nome_feira").with_alias("bairro"),
            FieldSpec::string("bairro"),
        ])
        .unwrap_err();
        assert_eq!(err, FilterSpecError::DuplicateName("bairro".to_string()));
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let err = FilterSpec::new(vec![
            FieldSpec::new("a", "Same", FieldKind::String),
            FieldSpec::new("b", "Same", FieldKind::Integer),
        ])
        .unwrap_err();
        assert_eq!(err, FilterSpecError::DuplicateField("Same".to_string()));
    }

    #[test]
    fn test_resolve_by_name_and_alias() {
        let spec = FilterSpec::new(vec![
            FieldSpec::new("nome_feira", "NomeFeira", FieldKind::String).with_alias("nome"),
            FieldSpec::integer("coddist"),
        ])
        .unwrap();

        assert_eq!(spec.resolve("nome_feira").unwrap().field, "NomeFeira");
        assert_eq!(spec.resolve("nome").unwrap().field, "NomeFeira");
        assert_eq!(spec.resolve("coddist").unwrap().kind, FieldKind::Integer);
        assert!(spec.resolve("NomeFeira").is_none());
        assert!(spec.resolve("Nome_feira").is_none());
    }

    #[test]
    fn test_accepted_names_sorted() {
        let spec = FilterSpec::new(vec![
            FieldSpec::string("regiao5"),
            FieldSpec::string("nome_feira").with_alias("nome"),
        ])
        .unwrap();
        assert_eq!(spec.accepted_names(), vec!["nome", "nome_feira", "regiao5"]);
    }

    #[test]
    fn test_field_kind_display() {
        assert_eq!(FieldKind::String.to_string(), "string");
        assert_eq!(FieldKind::Integer.to_string(), "integer");
    }
}
