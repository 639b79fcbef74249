//! Query parameter binding
//!
//! Turns decoded query-string pairs into a [`FilterObject`] using a
//! [`FilterSpec`]. Binding is pure: no I/O, no shared state, input untouched.

use std::collections::{BTreeMap, HashMap, HashSet};

use thiserror::Error;

use super::spec::{FieldKind, FilterSpec};

/// Decoded query string: key -> values in order of appearance
pub type QueryParams = HashMap<String, Vec<String>>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    #[error("parameter: {0} not allowed")]
    UnknownParameter(String),

    #[error("parameter: {parameter} is not a valid integer")]
    InvalidIntegerValue { parameter: String, value: String },

    #[error("parameter: {0} names a field already given by another parameter")]
    DuplicateField(String),
}

/// A coerced filter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
}

/// Bound filter criteria keyed by internal field identifier
///
/// Backed by an ordered map, so iteration order depends only on content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterObject {
    values: BTreeMap<&'static str, FilterValue>,
}

impl FilterObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, value: FilterValue) {
        self.values.insert(field, value);
    }

    pub fn get(&self, field: &str) -> Option<&FilterValue> {
        self.values.get(field)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        match self.values.get(field) {
            Some(FilterValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn get_int(&self, field: &str) -> Option<i64> {
        match self.values.get(field) {
            Some(FilterValue::Integer(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FilterValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Bind query parameters against a spec.
///
/// Keys resolve by exact external name or declared alias only. Only the first
/// value of each key is used. A key with no values still has to resolve but
/// leaves its field unset. Two keys naming the same field (an alias and its
/// external name) are rejected, even when one of them has no values. Keys are
/// visited in sorted order, so when several are invalid the reported error is
/// stable across calls.
pub fn bind(spec: &FilterSpec, params: &QueryParams) -> Result<FilterObject, BindError> {
    let mut keys: Vec<&String> = params.keys().collect();
    keys.sort_unstable();

    let mut filter = FilterObject::new();
    let mut seen = HashSet::new();
    for key in keys {
        let field = spec
            .resolve(key)
            .ok_or_else(|| BindError::UnknownParameter(key.clone()))?;
        if !seen.insert(field.field) {
            return Err(BindError::DuplicateField(key.clone()));
        }

        let Some(raw) = params.get(key).and_then(|values| values.first()) else {
            continue;
        };

        let value = match field.kind {
            FieldKind::String => FilterValue::Text(raw.clone()),
            FieldKind::Integer => {
                let n = raw
                    .parse::<i64>()
                    .map_err(|_| BindError::InvalidIntegerValue {
                        parameter: key.clone(),
                        value: raw.clone(),
                    })?;
                FilterValue::Integer(n)
            }
        };
        filter.insert(field.field, value);
    }

    Ok(filter)
}
