//! Tagged scalar values and their canonical string form

use rusqlite::types::ValueRef;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A single SQLite storage value.
///
/// Cell comparison, key-set membership and key sorting all go through
/// [`Scalar::canonical_string`] so that equality never depends on ambient
/// runtime type behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Scalar {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Scalar {
    /// Canonical textual form: Null is the empty string, numbers use their
    /// natural decimal representation, blobs are lowercase hex.
    pub fn canonical_string(&self) -> String {
        match self {
            Scalar::Null => String::new(),
            Scalar::Integer(i) => i.to_string(),
            Scalar::Real(r) => r.to_string(),
            Scalar::Text(s) => s.clone(),
            Scalar::Blob(bytes) => bytes.iter().map(|b| format!("{:02x}", b)).collect(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Integer(i) => Some(*i as f64),
            Scalar::Real(r) => Some(*r),
            _ => None,
        }
    }

    /// Total order used for primary-key sorting. Numeric keys compare
    /// numerically and sort before all non-numeric keys; non-numeric keys
    /// compare lexicographically on their canonical string form. Ranking the
    /// numeric class first keeps the order transitive when the two classes
    /// mix, so sorting mixed-type keys never panics.
    pub fn key_cmp(&self, other: &Scalar) -> Ordering {
        match (self.as_f64(), other.as_f64()) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.canonical_string().cmp(&other.canonical_string()),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_string())
    }
}

impl From<ValueRef<'_>> for Scalar {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => Scalar::Null,
            ValueRef::Integer(i) => Scalar::Integer(i),
            ValueRef::Real(r) => Scalar::Real(r),
            ValueRef::Text(s) => Scalar::Text(String::from_utf8_lossy(s).into_owned()),
            ValueRef::Blob(b) => Scalar::Blob(b.to_vec()),
        }
    }
}
