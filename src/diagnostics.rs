//! Recoverable degradations reported while resolving a document.
//!
//! The resolver never fails on a single schema. It reports what it skipped
//! or widened to a [`DiagnosticSink`] and carries on. Tests collect into a
//! `Vec<Diagnostic>`; the binary logs through [`LogSink`].

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A top-level schema that is only a `$ref`.
    TopLevelReference { schema: String, target: String },
    /// Top-level type tag with no handling arm (or no tag at all).
    UnmatchedType { schema: String, type_tag: Option<String> },
    /// First enum literal is not a string; the whole enum is probably mistyped.
    MistypedEnum { schema: String, literal: String },
    NonStringEnumLiteral { schema: String, index: usize, literal: String },
    /// Literal with no word characters; its member constant is a placeholder.
    UnnamedEnumLiteral { schema: String, index: usize, literal: String, placeholder: String },
    /// Two literals normalize to the same member constant; the later one is dropped.
    DuplicateEnumLiteral { schema: String, constant: String, kept: String, dropped: String },
    /// Every enum literal was dropped; the type falls back to a string alias.
    EmptyEnum { schema: String },
    /// Schema name with no word characters; no type name can be built from it.
    UnnamedSchema { schema: String },
    /// `$ref` to a schema whose name has no word characters; typed as the untyped placeholder.
    UnnamedReference { schema: String, property: Option<String>, target: String },
    /// Property without `type` or `$ref`; left out of the struct.
    SkippedProperty { schema: String, property: String },
    /// Property with an unhandled tag; typed as the untyped placeholder.
    UntypedProperty { schema: String, property: String, type_tag: String },
    /// Two properties normalize to the same member name; the later one is dropped.
    DuplicateProperty { schema: String, name: String, kept: String, dropped: String },
    UnsupportedAdditionalProperties { schema: String, value_type: String },
    /// `items: true`; elements are untyped.
    UnconstrainedItems { schema: String, property: Option<String> },
    UnmatchedItems { schema: String, property: Option<String>, detail: String },
    /// Two types share a type or file name; the later one is not emitted.
    NameCollision { name: String, kept: String, dropped: String },
}

impl Diagnostic {
    /// Schema the diagnostic is about.
    pub fn schema(&self) -> &str {
        match self {
            Diagnostic::TopLevelReference { schema, .. }
            | Diagnostic::UnmatchedType { schema, .. }
            | Diagnostic::MistypedEnum { schema, .. }
            | Diagnostic::NonStringEnumLiteral { schema, .. }
            | Diagnostic::UnnamedEnumLiteral { schema, .. }
            | Diagnostic::DuplicateEnumLiteral { schema, .. }
            | Diagnostic::EmptyEnum { schema }
            | Diagnostic::UnnamedSchema { schema }
            | Diagnostic::UnnamedReference { schema, .. }
            | Diagnostic::SkippedProperty { schema, .. }
            | Diagnostic::UntypedProperty { schema, .. }
            | Diagnostic::DuplicateProperty { schema, .. }
            | Diagnostic::UnsupportedAdditionalProperties { schema, .. }
            | Diagnostic::UnconstrainedItems { schema, .. }
            | Diagnostic::UnmatchedItems { schema, .. } => schema,
            Diagnostic::NameCollision { dropped, .. } => dropped,
        }
    }
}

fn location(schema: &str, property: &Option<String>) -> String {
    match property {
        Some(property) => format!("{schema}.{property}"),
        None => schema.to_string(),
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::TopLevelReference { schema, target } => {
                write!(f, "schema {schema} is a reference to {target}; skipped")
            }
            Diagnostic::UnmatchedType { schema, type_tag: Some(tag) } => {
                write!(f, "schema {schema} has unmatched type `{tag}`; no type generated")
            }
            Diagnostic::UnmatchedType { schema, type_tag: None } => {
                write!(f, "schema {schema} has no type; no type generated")
            }
            Diagnostic::MistypedEnum { schema, literal } => write!(
                f,
                "schema {schema} has a non-string enum type (first literal `{literal}`), \
                 which may not work with enum generation"
            ),
            Diagnostic::NonStringEnumLiteral { schema, index, literal } => write!(
                f,
                "schema {schema} enum literal #{index} (`{literal}`) is not a string; skipped"
            ),
            Diagnostic::UnnamedEnumLiteral { schema, index, literal, placeholder } => write!(
                f,
                "schema {schema} enum literal #{index} (`{literal}`) has no word characters; \
                 member named {placeholder}"
            ),
            Diagnostic::DuplicateEnumLiteral { schema, constant, kept, dropped } => write!(
                f,
                "schema {schema} enum literals `{kept}` and `{dropped}` both normalize to \
                 `{constant}`; `{dropped}` dropped"
            ),
            Diagnostic::UnnamedSchema { schema } => write!(
                f,
                "schema `{schema}` has no word characters to build a type name from; skipped"
            ),
            Diagnostic::UnnamedReference { schema, property, target } => write!(
                f,
                "{} references `{target}`, which has no usable type name; typed as T.untyped",
                location(schema, property)
            ),
            Diagnostic::EmptyEnum { schema } => write!(
                f,
                "schema {schema} has no usable enum literals; generated as a plain String"
            ),
            Diagnostic::SkippedProperty { schema, property } => {
                write!(f, "{schema}.{property} has no type; property skipped")
            }
            Diagnostic::UntypedProperty { schema, property, type_tag } => write!(
                f,
                "{schema}.{property} has unmatched type `{type_tag}`; typed as T.untyped"
            ),
            Diagnostic::DuplicateProperty { schema, name, kept, dropped } => write!(
                f,
                "{schema}: properties `{kept}` and `{dropped}` both normalize to `{name}`; \
                 `{dropped}` dropped"
            ),
            Diagnostic::UnsupportedAdditionalProperties { schema, value_type } => write!(
                f,
                "schema {schema} additionalProperties of type `{value_type}` is not yet handled"
            ),
            Diagnostic::UnconstrainedItems { schema, property } => write!(
                f,
                "{} has unconstrained array items; elements are T.untyped",
                location(schema, property)
            ),
            Diagnostic::UnmatchedItems { schema, property, detail } => write!(
                f,
                "{} has unmatched array items ({detail}); elements are T.untyped",
                location(schema, property)
            ),
            Diagnostic::NameCollision { name, kept, dropped } => write!(
                f,
                "schemas {kept} and {dropped} both generate `{name}`; {dropped} not generated"
            ),
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// SINKS
// ————————————————————————————————————————————————————————————————————————————

pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Forwards every diagnostic to `tracing` at WARN and counts them.
#[derive(Debug, Default)]
pub struct LogSink {
    count: usize,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl DiagnosticSink for LogSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.count += 1;
        tracing::warn!(schema = diagnostic.schema(), "{diagnostic}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_schema_and_property() {
        let d = Diagnostic::UntypedProperty {
            schema: "Pet".into(),
            property: "weight".into(),
            type_tag: "number".into(),
        };
        assert_eq!(d.to_string(), "Pet.weight has unmatched type `number`; typed as T.untyped");
        assert_eq!(d.schema(), "Pet");
    }

    #[test]
    fn item_diagnostics_locate_top_level_and_property_arrays() {
        let top = Diagnostic::UnconstrainedItems { schema: "Bag".into(), property: None };
        let prop = Diagnostic::UnconstrainedItems {
            schema: "Pet".into(),
            property: Some("tags".into()),
        };
        assert!(top.to_string().starts_with("Bag has"));
        assert!(prop.to_string().starts_with("Pet.tags has"));
    }

    #[test]
    fn enum_member_diagnostics_name_both_literals() {
        let d = Diagnostic::DuplicateEnumLiteral {
            schema: "Status".into(),
            constant: "OnHold".into(),
            kept: "on-hold".into(),
            dropped: "on_hold".into(),
        };
        assert_eq!(
            d.to_string(),
            "schema Status enum literals `on-hold` and `on_hold` both normalize to `OnHold`; \
             `on_hold` dropped"
        );
        assert_eq!(d.schema(), "Status");
    }

    #[test]
    fn log_sink_counts_reports() {
        let mut sink = LogSink::new();
        sink.report(Diagnostic::EmptyEnum { schema: "Status".into() });
        sink.report(Diagnostic::UnmatchedType { schema: "Blob".into(), type_tag: None });
        assert_eq!(sink.count(), 2);
    }
}
