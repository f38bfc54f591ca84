//! Constrained query capability for a remote document store.
//!
//! The store accepts only a small, fixed set of predicate kinds — field
//! equality, inclusive range bounds and pagination — so the AST here is
//! deliberately flat: a query is an ordered list of [`Query`] values, not
//! an expression tree. Non-pagination predicates combine conjunctively.

pub mod memory;
pub mod page;
pub mod store;

pub use page::{DocumentList, PageRequest, Pager};
pub use store::{
    BlobStore, Credential, Document, DocumentStore, Principal, SessionStore, StoreError,
    StoredDocument,
};

use serde::{Deserialize, Serialize};

/// Scalar operand of a predicate.
///
/// Dates travel as ISO-8601 strings; lexicographic order matches calendar
/// order, so range predicates over date fields need no dedicated variant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl Value {
    /// Equality against a document field value.
    pub fn matches(&self, field: &serde_json::Value) -> bool {
        match (self, field) {
            (Value::Bool(a), serde_json::Value::Bool(b)) => a == b,
            (Value::Int(a), serde_json::Value::Number(n)) => {
                n.as_i64() == Some(*a) || n.as_f64() == Some(*a as f64)
            }
            (Value::Float(a), serde_json::Value::Number(n)) => n.as_f64() == Some(*a),
            (Value::String(a), serde_json::Value::String(b)) => a == b,
            _ => false,
        }
    }

    /// Ordering against a document field value, when the two are comparable.
    ///
    /// Numbers compare numerically, strings lexicographically. Mixed or
    /// non-scalar kinds are incomparable and never satisfy a range bound.
    pub fn compare(&self, field: &serde_json::Value) -> Option<std::cmp::Ordering> {
        match (self, field) {
            (Value::Int(a), serde_json::Value::Number(n)) => {
                n.as_f64().and_then(|b| b.partial_cmp(&(*a as f64)))
            }
            (Value::Float(a), serde_json::Value::Number(n)) => {
                n.as_f64().and_then(|b| b.partial_cmp(a))
            }
            (Value::String(a), serde_json::Value::String(b)) => Some(b.as_str().cmp(a.as_str())),
            _ => None,
        }
    }
}

/// One compiled condition sent to the store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Query {
    Equal { field: String, value: Value },
    GreaterOrEqual { field: String, value: Value },
    LessOrEqual { field: String, value: Value },
    Limit(u64),
    Offset(u64),
}

impl Query {
    pub fn equal(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Query::Equal {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn greater_or_equal(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Query::GreaterOrEqual {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn less_or_equal(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Query::LessOrEqual {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn limit(n: u64) -> Self {
        Query::Limit(n)
    }

    pub fn offset(n: u64) -> Self {
        Query::Offset(n)
    }

    /// True for `Limit`/`Offset`, which bound the window instead of
    /// filtering documents.
    pub fn is_pagination(&self) -> bool {
        matches!(self, Query::Limit(_) | Query::Offset(_))
    }

    /// Whether a document satisfies this predicate. Pagination predicates
    /// are vacuously true; a missing field never matches.
    pub fn is_satisfied_by(&self, doc: &Document) -> bool {
        match self {
            Query::Equal { field, value } => {
                doc.get(field).is_some_and(|f| value.matches(f))
            }
            Query::GreaterOrEqual { field, value } => doc
                .get(field)
                .and_then(|f| value.compare(f))
                .is_some_and(|o| o != std::cmp::Ordering::Less),
            Query::LessOrEqual { field, value } => doc
                .get(field)
                .and_then(|f| value.compare(f))
                .is_some_and(|o| o != std::cmp::Ordering::Greater),
            Query::Limit(_) | Query::Offset(_) => true,
        }
    }
}
