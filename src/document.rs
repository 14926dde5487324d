//! OpenAPI document model.
//!
//! Only the slice of OpenAPI 3.x that type generation reads is modelled:
//! `info` and `components.schemas`. Schema nodes stay permissive (raw enum
//! literals, boolean `items`, free-form `type`) so the resolver can see and
//! report the shapes it does not understand instead of failing the load.

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub openapi: String,
    #[serde(default)]
    pub info: Info,
    #[serde(default)]
    pub components: Components,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub version: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Components {
    /// Document order is kept; it drives the order of generated types.
    #[serde(default)]
    pub schemas: IndexMap<String, SchemaNode>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaNode {
    #[serde(rename = "$ref", default)]
    pub reference: Option<String>,
    #[serde(rename = "type", default)]
    pub type_: Option<TypeTag>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "enum", default)]
    pub enum_: Option<Vec<Value>>,
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub properties: IndexMap<String, SchemaNode>,
    #[serde(default)]
    pub items: Option<Box<BoolOrSchema>>,
    #[serde(rename = "additionalProperties", default)]
    pub additional_properties: Option<Box<BoolOrSchema>>,
}

/// `type` is a single tag in 3.0 and may be a list in 3.1 (`["string", "null"]`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TypeTag {
    One(String),
    Many(Vec<String>),
}

/// Keywords such as `items` and `additionalProperties` take either a
/// boolean or a sub-schema.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BoolOrSchema {
    Bool(bool),
    Schema(SchemaNode),
}

/// Closed classification of a schema node, dispatched on by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind<'a> {
    Reference(&'a str),
    String,
    Boolean,
    Integer,
    Object,
    Array,
    /// A tag the resolver has no arm for (`number`, `null`, …).
    Other(&'a str),
    /// No `type` and no `$ref`.
    Untyped,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl TypeTag {
    /// First non-`null` tag.
    pub fn primary(&self) -> Option<&str> {
        match self {
            TypeTag::One(tag) => Some(tag.as_str()),
            TypeTag::Many(tags) => tags
                .iter()
                .map(String::as_str)
                .find(|tag| *tag != "null")
                .or_else(|| tags.first().map(String::as_str)),
        }
    }
}

impl SchemaNode {
    pub fn kind(&self) -> SchemaKind<'_> {
        if let Some(reference) = &self.reference {
            return SchemaKind::Reference(reference);
        }
        match self.type_.as_ref().and_then(TypeTag::primary) {
            None => SchemaKind::Untyped,
            Some("string") => SchemaKind::String,
            Some("boolean") => SchemaKind::Boolean,
            Some("integer") => SchemaKind::Integer,
            Some("object") => SchemaKind::Object,
            Some("array") => SchemaKind::Array,
            Some(other) => SchemaKind::Other(other),
        }
    }

    /// Final path segment of `$ref` (`#/components/schemas/Pet` → `Pet`).
    pub fn reference_name(&self) -> Option<&str> {
        self.reference.as_deref().map(reference_name)
    }

    /// Tag as written, for diagnostics.
    pub fn type_tag(&self) -> Option<&str> {
        self.type_.as_ref().and_then(TypeTag::primary)
    }
}

pub fn reference_name(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}

// ————————————————————————————————————————————————————————————————————————————
// LOADING
// ————————————————————————————————————————————————————————————————————————————

/// Read and validate an OpenAPI 3.x document. `.json` files are parsed as
/// JSON, everything else as YAML.
pub fn load_document(path: &Path) -> Result<Document> {
    let source = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let document = if is_json {
        parse_json(&source)
    } else {
        parse_yaml(&source)
    };
    let document = document.map_err(|message| Error::Parse {
        path: path.to_path_buf(),
        message,
    })?;
    if !document.openapi.starts_with("3.") {
        return Err(Error::UnsupportedVersion {
            path: path.to_path_buf(),
            version: document.openapi,
        });
    }
    Ok(document)
}

pub fn parse_json(source: &str) -> Result<Document, String> {
    crate::path_de::from_json_with_path(source)
}

pub fn parse_yaml(source: &str) -> Result<Document, String> {
    crate::path_de::from_yaml_with_path(source)
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(value: Value) -> SchemaNode {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn kind_dispatches_on_type_tag() {
        assert_eq!(node(json!({"type": "string"})).kind(), SchemaKind::String);
        assert_eq!(node(json!({"type": "boolean"})).kind(), SchemaKind::Boolean);
        assert_eq!(node(json!({"type": "integer"})).kind(), SchemaKind::Integer);
        assert_eq!(node(json!({"type": "object"})).kind(), SchemaKind::Object);
        assert_eq!(node(json!({"type": "array"})).kind(), SchemaKind::Array);
        assert_eq!(node(json!({"type": "number"})).kind(), SchemaKind::Other("number"));
        assert_eq!(node(json!({"description": "x"})).kind(), SchemaKind::Untyped);
    }

    #[test]
    fn reference_wins_over_type() {
        let n = node(json!({"$ref": "#/components/schemas/Category", "type": "object"}));
        assert_eq!(n.kind(), SchemaKind::Reference("#/components/schemas/Category"));
        assert_eq!(n.reference_name(), Some("Category"));
    }

    #[test]
    fn type_lists_pick_first_non_null() {
        assert_eq!(node(json!({"type": ["null", "string"]})).kind(), SchemaKind::String);
        assert_eq!(node(json!({"type": ["null"]})).kind(), SchemaKind::Other("null"));
    }

    #[test]
    fn items_and_additional_properties_accept_bools() {
        let n = node(json!({"type": "array", "items": true}));
        assert!(matches!(n.items.as_deref(), Some(BoolOrSchema::Bool(true))));
        let n = node(json!({"type": "object", "additionalProperties": {"type": "string"}}));
        assert!(matches!(n.additional_properties.as_deref(), Some(BoolOrSchema::Schema(_))));
    }

    #[test]
    fn non_string_enum_literals_survive_loading() {
        let n = node(json!({"type": "string", "enum": ["available", 42]}));
        assert_eq!(n.enum_.unwrap(), vec![json!("available"), json!(42)]);
    }

    #[test]
    fn schemas_keep_document_order() {
        let doc = parse_yaml(
            "openapi: 3.0.3\ninfo:\n  title: T\n  version: '1'\ncomponents:\n  schemas:\n\
             \x20   Zebra:\n      type: string\n\
             \x20   Apple:\n      type: string\n\
             \x20   Mango:\n      type: string\n",
        )
        .unwrap();
        let names: Vec<&str> = doc.components.schemas.keys().map(String::as_str).collect();
        assert_eq!(names, ["Zebra", "Apple", "Mango"]);
        assert_eq!(doc.info.title, "T");
    }

    #[test]
    fn parse_errors_carry_the_document_path() {
        let err = parse_json(
            r#"{"openapi": "3.0.0", "components": {"schemas": {"Pet": {"required": "id"}}}}"#,
        )
        .unwrap_err();
        assert!(err.contains("components.schemas.Pet.required"), "{err}");
    }

    #[test]
    fn rejects_swagger_2_documents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("swagger.json");
        std::fs::write(&path, r#"{"openapi": "2.0"}"#).unwrap();
        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, Error::UnsupportedVersion { .. }), "{err}");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load_document(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }
}
