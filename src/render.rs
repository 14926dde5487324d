//! Ruby/Sorbet rendering of resolved types.
//!
//! One [`Type`] becomes one Ruby file: a generated-file header, the module
//! wrapper from `--module`, then a `T::Struct`, `T::Enum` or `T.type_alias`
//! depending on the type's shape. The renderer only formats; it never
//! changes what the resolver decided.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::document::Document;
use crate::ir::{Property, Shape, Type, refs};
use crate::naming;

pub const COMMAND: &str = "openapi-sorbet";
pub const EXTENSION: &str = "rb";

const INDENT: &str = "  ";

static RUBY_SYMBOL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}_][\p{L}\p{N}_]*$").unwrap());

/// Run-level data shared by every rendered file.
#[derive(Debug, Clone)]
pub struct Metadata {
    pub command: String,
    pub version: String,
    pub modules: Vec<String>,
    pub spec_title: String,
    pub spec_version: String,
}

impl Metadata {
    pub fn new(document: &Document, modules: Vec<String>) -> Self {
        Self {
            command: COMMAND.to_string(),
            version: tool_version(),
            modules,
            spec_title: document.info.title.clone(),
            spec_version: document.info.version.clone(),
        }
    }
}

pub fn tool_version() -> String {
    option_env!("CARGO_PKG_VERSION")
        .filter(|v| !v.is_empty())
        .unwrap_or("(unknown)")
        .to_string()
}

// ————————————————————————————————————————————————————————————————————————————
// RENDERING
// ————————————————————————————————————————————————————————————————————————————

pub fn render_type(metadata: &Metadata, t: &Type) -> String {
    let mut out = String::new();
    out.push_str("# typed: strict\n");
    out.push_str("# frozen_string_literal: true\n\n");
    out.push_str(&format!(
        "# Generated by {} {} from {} {}.\n",
        metadata.command, metadata.version, metadata.spec_title, metadata.spec_version
    ));
    out.push_str("# DO NOT EDIT: this file is regenerated from the OpenAPI document.\n\n");

    let mut depth = 0;
    for module in &metadata.modules {
        line(&mut out, depth, &format!("module {module}"));
        depth += 1;
    }

    for comment in t.comment.lines() {
        if comment.trim().is_empty() {
            line(&mut out, depth, "#");
        } else {
            line(&mut out, depth, &format!("# {}", comment.trim_end()));
        }
    }

    match &t.shape {
        Shape::Object { base_class, properties, additional_properties } => {
            line(&mut out, depth, &format!("class {} < {}", t.type_name, base_class));
            for property in properties {
                line(&mut out, depth + 1, &property_definition(property));
            }
            if let Some(value_type) = additional_properties {
                let member = format!(
                    "const :additional_properties, T::Hash[String, {value_type}], default: {{}}"
                );
                line(&mut out, depth + 1, &member);
            }
            line(&mut out, depth, "end");
        }
        Shape::Enum(values) => {
            line(&mut out, depth, &format!("class {} < T::Enum", t.type_name));
            line(&mut out, depth + 1, "enums do");
            for value in values {
                line(
                    &mut out,
                    depth + 2,
                    &format!("{} = new({})", ruby_constant(&value.name), ruby_string(&value.value)),
                );
            }
            line(&mut out, depth + 1, "end");
            line(&mut out, depth, "end");
        }
        Shape::Alias { alias, is_array, additional_properties } => {
            let target = match (alias, is_array) {
                (Some(alias), false) => alias.clone(),
                (Some(alias), true) => format!("T::Array[{alias}]"),
                (None, _) => format!(
                    "T::Array[{}]",
                    additional_properties.as_deref().unwrap_or(refs::UNTYPED)
                ),
            };
            line(&mut out, depth, &format!("{} = T.type_alias {{ {} }}", t.type_name, target));
        }
    }

    for _ in &metadata.modules {
        depth -= 1;
        line(&mut out, depth, "end");
    }
    out
}

/// `const :photo_urls, T.nilable(T::Array[String]), name: 'photoUrls'`
pub fn property_definition(p: &Property) -> String {
    let mut type_ = p.type_.clone();
    if p.is_array {
        type_ = format!("T::Array[{type_}]");
    }
    if !p.required {
        type_ = format!("T.nilable({type_})");
    }
    let mut s = format!("const {}, {}", ruby_symbol(&p.name), type_);
    if p.renamed() {
        s.push_str(&format!(", name: {}", ruby_string(&p.schema_name)));
    }
    s
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn line(out: &mut String, depth: usize, text: &str) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str(text);
    out.push('\n');
}

fn ruby_string(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

fn ruby_symbol(name: &str) -> String {
    if RUBY_SYMBOL.is_match(name) {
        format!(":{name}")
    } else {
        format!(":\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
    }
}

/// Member names reach the renderer with words in them, so the type form is a
/// valid constant.
fn ruby_constant(name: &str) -> String {
    naming::type_name(name)
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
