//! The persisted JSON document.
//!
//! A whole graph travels as one JSON object. Decoding is all-or-nothing:
//! any malformed corner fails the load, there is no partial recovery.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::model::{Guid, Value};
use crate::Result;

/// The document envelope: an optional entry-point guid plus the node map.
///
/// ```json
/// {
///   "root": "158aafa594b44474a7da66a8cfa419f0",
///   "guidMap": {
///     "<node guid>": {
///       "<label guid>": { "string": "idle" }
///     }
///   }
/// }
/// ```
///
/// `guidMap` is required, `root` may be absent. Unknown envelope fields and
/// unknown value tags are malformed, not ignored: the codec refuses input
/// it could not write back byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<Guid>,
    #[serde(rename = "guidMap")]
    pub guid_map: BTreeMap<Guid, BTreeMap<Guid, Value>>,
}

impl Document {
    pub fn from_json(json: &str) -> Result<Document> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader(reader: impl Read) -> Result<Document> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Canonical encoding: pretty-printed, two-space indent, keys ascending.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_writer(&self, writer: impl Write) -> Result<()> {
        Ok(serde_json::to_writer_pretty(writer, self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn guid(n: u8) -> Guid {
        Guid([n; 16])
    }

    #[test]
    fn test_decode_minimal() {
        let doc = Document::from_json("{\"guidMap\": {}}").unwrap();
        assert_eq!(doc.root, None);
        assert!(doc.guid_map.is_empty());
    }

    #[test]
    fn test_decode_root_and_values() {
        let json = r#"{
            "root": "01010101010101010101010101010101",
            "guidMap": {
                "01010101010101010101010101010101": {
                    "02020202020202020202020202020202": { "string": "cat" },
                    "03030303030303030303030303030303": { "int64": 83333 },
                    "04040404040404040404040404040404": { "guid": "05050505050505050505050505050505" }
                }
            }
        }"#;
        let doc = Document::from_json(json).unwrap();
        assert_eq!(doc.root, Some(guid(1)));
        let labels = &doc.guid_map[&guid(1)];
        assert_eq!(labels[&guid(2)], Value::Text("cat".into()));
        assert_eq!(labels[&guid(3)], Value::Int64(83_333));
        assert_eq!(labels[&guid(4)], Value::Ref(guid(5)));
    }

    #[test]
    fn test_missing_guid_map_is_malformed() {
        let err = Document::from_json("{}").unwrap_err();
        assert!(matches!(err, Error::MalformedDocument(_)));
    }

    #[test]
    fn test_unknown_envelope_field_is_malformed() {
        let err = Document::from_json("{\"guidMap\": {}, \"extra\": 1}").unwrap_err();
        assert!(matches!(err, Error::MalformedDocument(_)));
    }

    #[test]
    fn test_unknown_value_tag_is_malformed() {
        let json = r#"{"guidMap": {"01010101010101010101010101010101": {
            "02020202020202020202020202020202": { "float": 1.5 }
        }}}"#;
        assert!(matches!(
            Document::from_json(json).unwrap_err(),
            Error::MalformedDocument(_)
        ));
    }

    #[test]
    fn test_int64_as_string_is_malformed() {
        let json = r#"{"guidMap": {"01010101010101010101010101010101": {
            "02020202020202020202020202020202": { "int64": "83333" }
        }}}"#;
        assert!(matches!(
            Document::from_json(json).unwrap_err(),
            Error::MalformedDocument(_)
        ));
    }

    #[test]
    fn test_syntax_error_is_malformed() {
        assert!(matches!(
            Document::from_json("{\"guidMap\": ").unwrap_err(),
            Error::MalformedDocument(_)
        ));
    }

    #[test]
    fn test_canonical_encoding_shape() {
        let doc = Document::default();
        assert_eq!(doc.to_json().unwrap(), "{\n  \"guidMap\": {}\n}");
    }

    #[test]
    fn test_root_omitted_when_absent() {
        let mut doc = Document::default();
        doc.guid_map.insert(guid(1), BTreeMap::new());
        let json = doc.to_json().unwrap();
        assert!(!json.contains("root"));

        doc.root = Some(guid(1));
        assert!(doc.to_json().unwrap().contains("\"root\""));
    }

    #[test]
    fn test_exact_roundtrip() {
        let mut labels = BTreeMap::new();
        labels.insert(guid(2), Value::Text("walk".into()));
        labels.insert(guid(3), Value::Int64(-7));
        labels.insert(guid(4), Value::Ref(guid(9)));
        let mut doc = Document::default();
        doc.root = Some(guid(1));
        doc.guid_map.insert(guid(1), labels);
        doc.guid_map.insert(guid(9), BTreeMap::new());

        let json = doc.to_json().unwrap();
        let back = Document::from_json(&json).unwrap();
        assert_eq!(back, doc);
        assert_eq!(back.to_json().unwrap(), json);
    }
}
