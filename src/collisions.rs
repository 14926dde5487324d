//! Name collisions between resolved types.
//!
//! Two schemas can normalize to the same type name (`pet_store` and
//! `PetStore`), and a synthesized nested type can land on the name of a
//! top-level one (`Pet` + `address` vs. `PetAddress`). The first type in
//! resolution order keeps the name; later ones are reported and dropped so
//! no generated file is silently overwritten.

use indexmap::IndexMap;

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::ir::Type;

pub fn drop_collisions(types: Vec<Type>, sink: &mut dyn DiagnosticSink) -> Vec<Type> {
    let mut by_type_name = IndexMap::<String, String>::new();
    let mut by_file_name = IndexMap::<String, String>::new();
    let mut kept = Vec::with_capacity(types.len());

    for t in types {
        let clash = by_type_name
            .get(&t.type_name)
            .map(|first| (t.type_name.clone(), first.clone()))
            .or_else(|| {
                by_file_name
                    .get(&t.file_name)
                    .map(|first| (t.file_name.clone(), first.clone()))
            });
        if let Some((name, first)) = clash {
            sink.report(Diagnostic::NameCollision {
                name,
                kept: first,
                dropped: t.schema_name.clone(),
            });
            continue;
        }
        by_type_name.insert(t.type_name.clone(), t.schema_name.clone());
        by_file_name.insert(t.file_name.clone(), t.schema_name.clone());
        kept.push(t);
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Shape;
    use crate::naming;

    fn alias(schema_name: &str) -> Type {
        Type {
            schema_name: schema_name.to_string(),
            type_name: naming::type_name(schema_name),
            file_name: naming::file_name(schema_name),
            comment: String::new(),
            shape: Shape::Alias {
                alias: Some("String".into()),
                is_array: false,
                additional_properties: None,
            },
        }
    }

    #[test]
    fn distinct_names_pass_through() {
        let mut diags: Vec<Diagnostic> = Vec::new();
        let kept = drop_collisions(vec![alias("Pet"), alias("Tag")], &mut diags);
        assert_eq!(kept.len(), 2);
        assert!(diags.is_empty());
    }

    #[test]
    fn later_type_with_same_name_is_dropped() {
        let mut diags: Vec<Diagnostic> = Vec::new();
        let kept = drop_collisions(
            vec![alias("Pet_address"), alias("Pet"), alias("PetAddress")],
            &mut diags,
        );
        let names: Vec<&str> = kept.iter().map(|t| t.schema_name.as_str()).collect();
        assert_eq!(names, ["Pet_address", "Pet"]);
        assert_eq!(
            diags,
            vec![Diagnostic::NameCollision {
                name: "PetAddress".into(),
                kept: "Pet_address".into(),
                dropped: "PetAddress".into(),
            }]
        );
    }

    #[test]
    fn file_name_clash_alone_is_a_collision() {
        let mut a = alias("Pet");
        let mut b = alias("Other");
        a.file_name = "shared".into();
        b.file_name = "shared".into();
        let mut diags: Vec<Diagnostic> = Vec::new();
        let kept = drop_collisions(vec![a, b], &mut diags);
        assert_eq!(kept.len(), 1);
        assert!(matches!(&diags[0], Diagnostic::NameCollision { name, .. } if name == "shared"));
    }
}
