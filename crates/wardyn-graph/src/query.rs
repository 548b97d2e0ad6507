//! Query parameters and result rows.
//!
//! Both sides of the executor seam move loosely-typed values as
//! `serde_json::Value`; [`Row`] adds typed getters that fail with a
//! data-access error naming the offending field.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use wardyn_core::{Error, Result};

// ============================================================================
// QueryParams
// ============================================================================

/// Named parameters for a parameterized graph query.
///
/// # Examples
///
/// ```
/// use wardyn_graph::QueryParams;
///
/// let params = QueryParams::new()
///     .param("objectIdIdentity", 42)
///     .param("className", "Document");
/// assert_eq!(params.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams(BTreeMap<String, Value>);

impl QueryParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named parameter.
    pub fn param<N, V>(mut self, name: N, value: V) -> Self
    where
        N: Into<String>,
        V: Into<Value>,
    {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Looks up a parameter by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no parameters are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over (name, value) pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

// ============================================================================
// Row
// ============================================================================

/// One result row: a mapping from declared field name to value.
///
/// Rows are transient — consumed immediately to build domain values and
/// never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row(BTreeMap<String, Value>);

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named field (builder form, used by executors and fixtures).
    pub fn field<N, V>(mut self, name: N, value: V) -> Self
    where
        N: Into<String>,
        V: Into<Value>,
    {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Looks up a field by name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Reads a field as a 64-bit integer.
    ///
    /// # Errors
    ///
    /// Data-access error naming the field when it is absent or not an
    /// integer.
    pub fn get_i64(&self, field: &str) -> Result<i64> {
        self.0
            .get(field)
            .ok_or_else(|| Error::data_access(format!("result row is missing field '{field}'")))?
            .as_i64()
            .ok_or_else(|| {
                Error::data_access(format!("result row field '{field}' is not an integer"))
            })
    }

    /// Reads a field as a string slice.
    ///
    /// # Errors
    ///
    /// Data-access error naming the field when it is absent or not a
    /// string.
    pub fn get_str(&self, field: &str) -> Result<&str> {
        self.0
            .get(field)
            .ok_or_else(|| Error::data_access(format!("result row is missing field '{field}'")))?
            .as_str()
            .ok_or_else(|| {
                Error::data_access(format!("result row field '{field}' is not a string"))
            })
    }
}

// ============================================================================
// Tests
// ============================================================================
