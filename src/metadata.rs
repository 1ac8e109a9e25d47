//! The node-definition table consumed by the generator.
//!
//! Owned and produced by the type-definition library; this crate only reads it.
//! Map types are `IndexMap` so insertion order survives JSON round trips, which
//! drives the order of class, builder and alias emission.
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{Error, Result};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// Everything a generation run reads, bundled into one immutable value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Metadata {
    /// node type → field name → field spec
    #[serde(rename = "NODE_FIELDS", default)]
    pub node_fields: IndexMap<String, IndexMap<String, FieldSpec>>,

    /// node type → constructor-argument order
    #[serde(rename = "BUILDER_KEYS", default)]
    pub builder_keys: IndexMap<String, Vec<String>>,

    /// alias → member node types
    #[serde(rename = "FLIPPED_ALIAS_KEYS", default)]
    pub flipped_alias_keys: IndexMap<String, Vec<String>>,

    /// every known node type and category name
    #[serde(rename = "TYPES", default)]
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FieldSpec {
    #[serde(default)]
    pub optional: bool,

    /// `Some(Value::Null)` for an explicit `"default": null`; `None` only when absent.
    #[serde(default, deserialize_with = "present")]
    pub default: Option<Value>,

    #[serde(default)]
    pub validate: Option<Validator>,
}

/// Shape constraint of a single field; only used to pick a type annotation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Validator {
    #[serde(rename = "oneOf", default)]
    pub one_of: Option<Vec<Value>>,

    #[serde(rename = "type", default)]
    pub type_: Option<String>,

    #[serde(rename = "oneOfNodeTypes", default)]
    pub one_of_node_types: Option<Vec<String>>,

    /// Keys outside the three recognized shapes (`chainOf`, `each`, ...).
    #[serde(flatten)]
    pub other: IndexMap<String, Value>,
}

/// A metadata inconsistency that does not stop generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintWarning {
    UnknownBuilderKey { node_type: String, field: String },
    BuilderKeysForUnknownType { node_type: String },
    UnknownAliasMember { alias: String, member: String },
    UnrecognizedValidator { node_type: String, field: String },
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Metadata {
    pub fn from_json_str(src: &str) -> Result<Self> {
        crate::path_de::from_str_with_path(src)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| Error::ReadMetadata {
            path: path.to_path_buf(),
            source,
        })?;
        crate::path_de::from_slice_with_path(&bytes)
    }

    /// Builder-key order for `node_type`; empty when the table has none.
    pub fn builder_keys_for(&self, node_type: &str) -> &[String] {
        self.builder_keys.get(node_type).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_node_type(&self, name: &str) -> bool {
        self.node_fields.contains_key(name)
    }

    pub fn lint(&self) -> Vec<LintWarning> {
        let mut out = Vec::new();

        for (node_type, keys) in &self.builder_keys {
            let Some(fields) = self.node_fields.get(node_type) else {
                out.push(LintWarning::BuilderKeysForUnknownType { node_type: node_type.clone() });
                continue;
            };
            for key in keys {
                if !fields.contains_key(key) {
                    out.push(LintWarning::UnknownBuilderKey {
                        node_type: node_type.clone(),
                        field: key.clone(),
                    });
                }
            }
        }

        for (node_type, fields) in &self.node_fields {
            for (field, spec) in fields {
                if spec.validate.as_ref().is_some_and(|v| !v.is_recognized()) {
                    out.push(LintWarning::UnrecognizedValidator {
                        node_type: node_type.clone(),
                        field: field.clone(),
                    });
                }
            }
        }

        for (alias, members) in &self.flipped_alias_keys {
            for member in members {
                if !self.is_node_type(member) {
                    out.push(LintWarning::UnknownAliasMember {
                        alias: alias.clone(),
                        member: member.clone(),
                    });
                }
            }
        }

        out
    }
}

impl FieldSpec {
    /// Optional when flagged or when any default is present, `null` included.
    pub fn is_optional(&self) -> bool {
        self.optional || self.default.is_some()
    }
}

impl Validator {
    /// Non-empty `type` only; an empty name carries no information.
    pub fn primitive_type(&self) -> Option<&str> {
        self.type_.as_deref().filter(|t| !t.is_empty())
    }

    pub fn is_recognized(&self) -> bool {
        self.one_of.is_some() || self.primitive_type().is_some() || self.one_of_node_types.is_some()
    }
}

impl std::fmt::Display for LintWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LintWarning::UnknownBuilderKey { node_type, field } => {
                write!(f, "BUILDER_KEYS.{node_type} lists `{field}`, which is not a field of {node_type}")
            }
            LintWarning::BuilderKeysForUnknownType { node_type } => {
                write!(f, "BUILDER_KEYS.{node_type} has no NODE_FIELDS entry")
            }
            LintWarning::UnknownAliasMember { alias, member } => {
                write!(f, "FLIPPED_ALIAS_KEYS.{alias} lists `{member}`, which is not a node type")
            }
            LintWarning::UnrecognizedValidator { node_type, field } => {
                write!(f, "{node_type}.{field} has a validator with no recognized shape; annotated as `any`")
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// Runs only when the key exists, so `null` maps to `Some(Value::Null)`.
fn present<'de, D>(de: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(de).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metadata(v: Value) -> Metadata {
        Metadata::from_json_str(&v.to_string()).unwrap()
    }

    #[test]
    fn null_default_is_present() {
        let m = metadata(json!({
            "NODE_FIELDS": {
                "Foo": {
                    "a": { "default": null },
                    "b": {},
                    "c": { "optional": true },
                    "d": { "default": false }
                }
            }
        }));
        let fields = &m.node_fields["Foo"];
        assert_eq!(fields["a"].default, Some(Value::Null));
        assert!(fields["a"].is_optional());
        assert!(!fields["b"].is_optional());
        assert!(fields["c"].is_optional());
        assert!(fields["d"].is_optional());
    }

    #[test]
    fn table_order_is_insertion_order() {
        let m = metadata(json!({
            "NODE_FIELDS": { "Zeta": {}, "Alpha": {}, "Mid": {} },
            "FLIPPED_ALIAS_KEYS": { "Z": ["Zeta"], "A": ["Alpha"] }
        }));
        let names: Vec<_> = m.node_fields.keys().map(String::as_str).collect();
        assert_eq!(names, ["Zeta", "Alpha", "Mid"]);
        let aliases: Vec<_> = m.flipped_alias_keys.keys().map(String::as_str).collect();
        assert_eq!(aliases, ["Z", "A"]);
    }

    #[test]
    fn validator_shapes() {
        let m = metadata(json!({
            "NODE_FIELDS": {
                "Foo": {
                    "a": { "validate": { "oneOf": ["x", 1, true] } },
                    "b": { "validate": { "type": "string" } },
                    "c": { "validate": { "oneOfNodeTypes": ["Identifier"] } },
                    "d": { "validate": { "chainOf": [] } },
                    "e": { "validate": { "type": "" } }
                }
            }
        }));
        let f = &m.node_fields["Foo"];
        let v = |k: &str| f[k].validate.clone().unwrap();
        assert_eq!(v("a").one_of, Some(vec![json!("x"), json!(1), json!(true)]));
        assert_eq!(v("b").primitive_type(), Some("string"));
        assert_eq!(v("c").one_of_node_types, Some(vec!["Identifier".to_string()]));
        assert!(!v("d").is_recognized());
        assert!(v("d").other.contains_key("chainOf"));
        assert!(!v("e").is_recognized());
    }

    #[test]
    fn missing_builder_keys_are_empty() {
        let m = metadata(json!({ "NODE_FIELDS": { "Foo": {} } }));
        assert!(m.builder_keys_for("Foo").is_empty());
    }

    #[test]
    fn malformed_table_reports_path() {
        let err = Metadata::from_json_str(r#"{ "NODE_FIELDS": { "Foo": { "a": { "optional": "yes" } } } }"#)
            .unwrap_err();
        match err {
            Error::Metadata { path, .. } => assert_eq!(path, "NODE_FIELDS.Foo.a.optional"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn lint_reports_inconsistencies() {
        let m = metadata(json!({
            "NODE_FIELDS": {
                "Foo": { "a": { "validate": { "each": {} } } }
            },
            "BUILDER_KEYS": { "Foo": ["a", "ghost"], "Bar": [] },
            "FLIPPED_ALIAS_KEYS": { "Expression": ["Foo", "Baz"] }
        }));
        assert_eq!(
            m.lint(),
            vec![
                LintWarning::UnknownBuilderKey { node_type: "Foo".into(), field: "ghost".into() },
                LintWarning::BuilderKeysForUnknownType { node_type: "Bar".into() },
                LintWarning::UnrecognizedValidator { node_type: "Foo".into(), field: "a".into() },
                LintWarning::UnknownAliasMember { alias: "Expression".into(), member: "Baz".into() },
            ]
        );
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Metadata::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, Error::ReadMetadata { .. }));
    }
}
