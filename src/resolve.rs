//! Schema → type resolution.
//!
//! Walks one named schema node and produces the flat list of [`Type`]s it
//! needs: the type itself plus any inline objects pulled out of its
//! properties. Children are pushed before their parent. References are
//! resolved by name only; the target is expected to be resolved on its own.
//!
//! Nothing in here fails. Shapes the resolver does not understand are
//! reported to the [`DiagnosticSink`] and either skipped or typed as
//! `T.untyped`.

use indexmap::IndexMap;
use serde_json::Value;

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::document::{BoolOrSchema, Document, SchemaKind, SchemaNode, reference_name};
use crate::ir::{EnumValue, Property, Shape, Type, refs};
use crate::naming;

/// Separator between a parent schema name and a property name when an inline
/// object gets its own type (`Pet` + `address` → `Pet_address`).
const NESTED_SEPARATOR: &str = "_";

/// Resolve every schema in `components.schemas`, in document order.
pub fn resolve_document(document: &Document, sink: &mut dyn DiagnosticSink) -> Vec<Type> {
    let mut resolver = Resolver::new(sink);
    let mut types = Vec::new();
    for (name, node) in &document.components.schemas {
        let before = types.len();
        resolver.resolve_into(name, node, &mut types);
        tracing::debug!(schema = %name, types = types.len() - before, "resolved schema");
    }
    types
}

pub struct Resolver<'a> {
    sink: &'a mut dyn DiagnosticSink,
}

/// Element type of an array, before it is placed in an alias or property.
enum Items {
    Named(String),
    /// `items: true`.
    Unconstrained,
    Unmatched,
}

impl<'a> Resolver<'a> {
    pub fn new(sink: &'a mut dyn DiagnosticSink) -> Self {
        Self { sink }
    }

    /// Resolve a single named schema.
    pub fn resolve(&mut self, name: &str, node: &SchemaNode) -> Vec<Type> {
        let mut types = Vec::new();
        self.resolve_into(name, node, &mut types);
        types
    }

    fn resolve_into(&mut self, name: &str, node: &SchemaNode, out: &mut Vec<Type>) {
        if !naming::has_words(name) {
            self.sink.report(Diagnostic::UnnamedSchema { schema: name.to_string() });
            return;
        }
        match node.kind() {
            SchemaKind::Reference(target) => self.sink.report(Diagnostic::TopLevelReference {
                schema: name.to_string(),
                target: target.to_string(),
            }),
            SchemaKind::String => out.push(self.resolve_string(name, node)),
            SchemaKind::Boolean => out.push(new_type(
                name,
                node,
                Shape::Alias {
                    alias: Some(refs::BOOLEAN.to_string()),
                    is_array: false,
                    additional_properties: None,
                },
            )),
            SchemaKind::Object => self.resolve_object(name, node, out),
            SchemaKind::Array => out.push(self.resolve_array(name, node)),
            SchemaKind::Integer | SchemaKind::Other(_) | SchemaKind::Untyped => {
                self.sink.report(Diagnostic::UnmatchedType {
                    schema: name.to_string(),
                    type_tag: node.type_tag().map(str::to_string),
                })
            }
        }
    }

    // ————————————————————————————————————————————————————————————————————————
    // STRINGS
    // ————————————————————————————————————————————————————————————————————————

    fn resolve_string(&mut self, name: &str, node: &SchemaNode) -> Type {
        let string_alias = || Shape::Alias {
            alias: Some(refs::STRING.to_string()),
            is_array: false,
            additional_properties: None,
        };
        let literals = match node.enum_.as_deref() {
            Some(literals) if !literals.is_empty() => literals,
            _ => return new_type(name, node, string_alias()),
        };
        let values = self.enum_values(name, literals);
        if values.is_empty() {
            self.sink.report(Diagnostic::EmptyEnum { schema: name.to_string() });
            return new_type(name, node, string_alias());
        }
        new_type(name, node, Shape::Enum(values))
    }

    fn enum_values(&mut self, name: &str, literals: &[Value]) -> Vec<EnumValue> {
        if let Some(first) = literals.first().filter(|v| !v.is_string()) {
            self.sink.report(Diagnostic::MistypedEnum {
                schema: name.to_string(),
                literal: first.to_string(),
            });
        }
        // member constant → literal that claimed it
        let mut constants = IndexMap::<String, String>::new();
        let mut values = Vec::with_capacity(literals.len());
        for (index, literal) in literals.iter().enumerate() {
            let Some(value) = literal.as_str() else {
                self.sink.report(Diagnostic::NonStringEnumLiteral {
                    schema: name.to_string(),
                    index,
                    literal: literal.to_string(),
                });
                continue;
            };
            let member = if naming::has_words(value) {
                naming::property_name(value)
            } else {
                let placeholder = format!("v{index}");
                self.sink.report(Diagnostic::UnnamedEnumLiteral {
                    schema: name.to_string(),
                    index,
                    literal: value.to_string(),
                    placeholder: naming::type_name(&placeholder),
                });
                placeholder
            };
            let constant = naming::type_name(&member);
            if let Some(kept) = constants.get(&constant) {
                self.sink.report(Diagnostic::DuplicateEnumLiteral {
                    schema: name.to_string(),
                    constant,
                    kept: kept.clone(),
                    dropped: value.to_string(),
                });
                continue;
            }
            constants.insert(constant, value.to_string());
            values.push(EnumValue {
                name: member,
                value: value.to_string(),
            });
        }
        values
    }

    // ————————————————————————————————————————————————————————————————————————
    // OBJECTS
    // ————————————————————————————————————————————————————————————————————————

    fn resolve_object(&mut self, name: &str, node: &SchemaNode, out: &mut Vec<Type>) {
        let mut properties = Vec::with_capacity(node.properties.len());

        for (property_name, property_node) in &node.properties {
            let mut property = Property {
                name: naming::property_name(property_name),
                schema_name: property_name.clone(),
                type_: refs::UNTYPED.to_string(),
                required: node.required.iter().any(|r| r == property_name),
                is_array: false,
            };

            match property_node.kind() {
                SchemaKind::Reference(target) => match reference_type(target) {
                    Some(type_) => property.type_ = type_,
                    None => self.sink.report(Diagnostic::UnnamedReference {
                        schema: name.to_string(),
                        property: Some(property_name.clone()),
                        target: target.to_string(),
                    }),
                },
                SchemaKind::String => property.type_ = refs::STRING.to_string(),
                SchemaKind::Boolean => property.type_ = refs::BOOLEAN.to_string(),
                SchemaKind::Integer => property.type_ = refs::INTEGER.to_string(),
                SchemaKind::Object => {
                    let child = format!("{name}{NESTED_SEPARATOR}{property_name}");
                    self.resolve_into(&child, property_node, out);
                    property.type_ = naming::type_name(&child);
                }
                SchemaKind::Array => {
                    property.is_array = true;
                    let items =
                        self.resolve_items(name, Some(property_name.as_str()), property_node);
                    property.type_ = match items {
                        Items::Named(type_) => type_,
                        Items::Unconstrained | Items::Unmatched => refs::UNTYPED.to_string(),
                    };
                }
                SchemaKind::Other(tag) => {
                    self.sink.report(Diagnostic::UntypedProperty {
                        schema: name.to_string(),
                        property: property_name.clone(),
                        type_tag: tag.to_string(),
                    });
                }
                SchemaKind::Untyped => {
                    self.sink.report(Diagnostic::SkippedProperty {
                        schema: name.to_string(),
                        property: property_name.clone(),
                    });
                    continue;
                }
            }

            properties.push(property);
        }

        // ensure consistent output regardless of document order
        properties.sort_by(|a, b| a.name.cmp(&b.name));
        let properties = self.dedup_properties(name, properties);

        let additional_properties = self.resolve_additional_properties(name, node);

        out.push(new_type(
            name,
            node,
            Shape::Object {
                base_class: refs::STRUCT,
                properties,
                additional_properties,
            },
        ));
    }

    /// Drop properties whose normalized name repeats an earlier one.
    fn dedup_properties(&mut self, name: &str, properties: Vec<Property>) -> Vec<Property> {
        let mut kept: Vec<Property> = Vec::with_capacity(properties.len());
        for property in properties {
            match kept.last() {
                Some(last) if last.name == property.name => {
                    self.sink.report(Diagnostic::DuplicateProperty {
                        schema: name.to_string(),
                        name: property.name.clone(),
                        kept: last.schema_name.clone(),
                        dropped: property.schema_name.clone(),
                    });
                }
                _ => kept.push(property),
            }
        }
        kept
    }

    fn resolve_additional_properties(&mut self, name: &str, node: &SchemaNode) -> Option<String> {
        let value_type = match node.additional_properties.as_deref()? {
            BoolOrSchema::Bool(false) => return None,
            BoolOrSchema::Bool(true) => "any".to_string(),
            BoolOrSchema::Schema(schema) => match schema.kind() {
                SchemaKind::String => return Some(refs::STRING.to_string()),
                SchemaKind::Reference(target) => target.to_string(),
                _ => schema.type_tag().unwrap_or("untyped").to_string(),
            },
        };
        self.sink.report(Diagnostic::UnsupportedAdditionalProperties {
            schema: name.to_string(),
            value_type,
        });
        None
    }

    // ————————————————————————————————————————————————————————————————————————
    // ARRAYS
    // ————————————————————————————————————————————————————————————————————————

    fn resolve_array(&mut self, name: &str, node: &SchemaNode) -> Type {
        let (alias, additional_properties) = match self.resolve_items(name, None, node) {
            Items::Named(type_) => (Some(type_), None),
            Items::Unconstrained => (None, Some(refs::UNTYPED.to_string())),
            Items::Unmatched => (Some(refs::UNTYPED.to_string()), None),
        };
        new_type(
            name,
            node,
            Shape::Alias {
                alias,
                is_array: true,
                additional_properties,
            },
        )
    }

    /// Element type of an array node, shared by top-level arrays and array
    /// properties. Reports anything that is not a reference or primitive.
    fn resolve_items(&mut self, schema: &str, property: Option<&str>, node: &SchemaNode) -> Items {
        let items = match node.items.as_deref() {
            Some(BoolOrSchema::Schema(items)) => items,
            Some(BoolOrSchema::Bool(true)) => {
                self.sink.report(Diagnostic::UnconstrainedItems {
                    schema: schema.to_string(),
                    property: property.map(str::to_string),
                });
                return Items::Unconstrained;
            }
            Some(BoolOrSchema::Bool(false)) => {
                return self.unmatched_items(schema, property, "items: false");
            }
            None => return self.unmatched_items(schema, property, "no items"),
        };
        match items.kind() {
            SchemaKind::Reference(target) => match reference_type(target) {
                Some(type_) => Items::Named(type_),
                None => {
                    self.sink.report(Diagnostic::UnnamedReference {
                        schema: schema.to_string(),
                        property: property.map(str::to_string),
                        target: target.to_string(),
                    });
                    Items::Unmatched
                }
            },
            SchemaKind::String => Items::Named(refs::STRING.to_string()),
            SchemaKind::Integer => Items::Named(refs::INTEGER.to_string()),
            SchemaKind::Boolean => Items::Named(refs::BOOLEAN.to_string()),
            SchemaKind::Object => self.unmatched_items(schema, property, "inline object"),
            SchemaKind::Array => self.unmatched_items(schema, property, "nested array"),
            SchemaKind::Other(tag) => {
                self.unmatched_items(schema, property, &format!("type `{tag}`"))
            }
            SchemaKind::Untyped => self.unmatched_items(schema, property, "no type"),
        }
    }

    fn unmatched_items(&mut self, schema: &str, property: Option<&str>, detail: &str) -> Items {
        self.sink.report(Diagnostic::UnmatchedItems {
            schema: schema.to_string(),
            property: property.map(str::to_string),
            detail: detail.to_string(),
        });
        Items::Unmatched
    }
}

/// Type name of a `$ref` target, if the target can be named at all.
fn reference_type(target: &str) -> Option<String> {
    let name = reference_name(target);
    naming::has_words(name).then(|| naming::type_name(name))
}

fn new_type(name: &str, node: &SchemaNode, shape: Shape) -> Type {
    Type {
        schema_name: name.to_string(),
        type_name: naming::type_name(name),
        file_name: naming::file_name(name),
        comment: prepare_comment(node.description.as_deref()),
        shape,
    }
}

fn prepare_comment(description: Option<&str>) -> String {
    description.map(str::trim).unwrap_or_default().to_string()
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
