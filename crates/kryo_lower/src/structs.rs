//! Struct declaration/instantiation semantics (§4.5).

use std::collections::BTreeMap;

use kryo_parser::ast::StructDecl;
use kryo_parser::Value;

/// Bind `given` fields over `decl`'s field order, falling back to each
/// field's declared default for anything the instantiation omitted.
/// Fields the instantiation supplies that the struct never declared are
/// passed through unchanged (an over-specified instance, not an error).
pub fn bind_struct_fields(decl: &StructDecl, given: &BTreeMap<String, Value>) -> BTreeMap<String, Value> {
    let mut bound = BTreeMap::new();
    for field in &decl.fields {
        match given.get(&field.name) {
            Some(value) => {
                bound.insert(field.name.clone(), value.clone());
            }
            None => {
                if let Some(default) = &field.default {
                    bound.insert(field.name.clone(), default.clone());
                }
            }
        }
    }
    for (name, value) in given {
        bound.entry(name.clone()).or_insert_with(|| value.clone());
    }
    bound
}

#[cfg(test)]
mod tests {
    use super::*;
    use kryo_parser::ast::StructField;

    fn point_decl() -> StructDecl {
        StructDecl {
            name: "Point".into(),
            fields: vec![
                StructField { name: "x".into(), default: Some(Value::Number { value: 0.0, is_percentage: false }) },
                StructField { name: "y".into(), default: Some(Value::Number { value: 0.0, is_percentage: false }) },
            ],
        }
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let decl = point_decl();
        let mut given = BTreeMap::new();
        given.insert("x".to_string(), Value::Number { value: 5.0, is_percentage: false });
        let bound = bind_struct_fields(&decl, &given);
        assert_eq!(bound.get("x"), Some(&Value::Number { value: 5.0, is_percentage: false }));
        assert_eq!(bound.get("y"), Some(&Value::Number { value: 0.0, is_percentage: false }));
    }

    #[test]
    fn fields_given_in_declaration_order_all_bind() {
        let decl = point_decl();
        let mut given = BTreeMap::new();
        given.insert("x".to_string(), Value::Number { value: 1.0, is_percentage: false });
        given.insert("y".to_string(), Value::Number { value: 2.0, is_percentage: false });
        let bound = bind_struct_fields(&decl, &given);
        assert_eq!(bound.len(), 2);
    }
}
