//! Value union stored under a node's labels.
//!
//! The graph's value system is deliberately closed: a label maps to either a
//! reference to another node, a text scalar, or a 64-bit integer. Anything
//! richer is modeled as more nodes and labels, not more value kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Guid;

/// A value held under one label of one node.
///
/// The serde representation is the document encoding: a single-key object
/// tagged `guid`, `string`, or `int64`. Any other tag fails decoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    /// Reference to another node (an edge, when read as graph structure).
    #[serde(rename = "guid")]
    Ref(Guid),
    /// Text scalar.
    #[serde(rename = "string")]
    Text(String),
    /// 64-bit signed integer scalar.
    #[serde(rename = "int64")]
    Int64(i64),
}

// ============================================================================
// Type checking
// ============================================================================

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Ref(_) => "GUID",
            Value::Text(_) => "STRING",
            Value::Int64(_) => "INT64",
        }
    }

    pub fn is_ref(&self) -> bool {
        matches!(self, Value::Ref(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }

    pub fn is_int64(&self) -> bool {
        matches!(self, Value::Int64(_))
    }

    /// The referenced guid, if this value is a reference.
    pub fn as_guid(&self) -> Option<Guid> {
        match self {
            Value::Ref(guid) => Some(*guid),
            _ => None,
        }
    }

    /// The text payload, if this value is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The integer payload, if this value is an int64.
    pub fn as_int64(&self) -> Option<i64> {
        match self {
            Value::Int64(i) => Some(*i),
            _ => None,
        }
    }
}

// ============================================================================
// Conversions (From impls)
// ============================================================================

impl From<Guid> for Value { fn from(v: Guid) -> Self { Value::Ref(v) } }
impl From<i64> for Value { fn from(v: i64) -> Self { Value::Int64(v) } }
impl From<i32> for Value { fn from(v: i32) -> Self { Value::Int64(v as i64) } }
impl From<String> for Value { fn from(v: String) -> Self { Value::Text(v) } }
impl From<&str> for Value { fn from(v: &str) -> Self { Value::Text(v.to_owned()) } }

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Ref(guid) => write!(f, "-> {guid}"),
            Value::Text(s) => write!(f, "\"{}\"", s.replace('"', "\\\"")),
            Value::Int64(i) => write!(f, "{i}"),
        }
    }
}
