//! Schema inference over a single values tree.
//!
//! Walk the effective values top-down, carrying the baseline node found at
//! the same position as a hint, and emit one [`SchemaFragment`] per node:
//! - the fragment's `type` and `default` come from the value itself;
//! - the hint only decides which object keys end up `required`;
//! - arrays are typed from their first element (see `arr`).
//!
//! The walk is total: every node produces a fragment.
pub mod arr;
pub mod num;
pub mod obj;
pub mod str;

use crate::schema::{SchemaFragment, TypeName};
use crate::value::ValueNode;

// ------------------------------- Options ---------------------------------- //

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InferOptions {
    /// Emit a `debug` event for every key considered for `required`.
    pub log_decisions: bool,
}

// ------------------------------- Dispatch --------------------------------- //

/// Infer the schema of `value`, using `hint` (the baseline node at the same
/// position, if any) to decide required keys.
pub fn infer(value: &ValueNode, hint: Option<&ValueNode>, opts: &InferOptions) -> SchemaFragment {
    match value {
        ValueNode::Null => SchemaFragment::nullable_string(),
        ValueNode::Bool(b) => SchemaFragment::scalar(TypeName::Boolean, ValueNode::Bool(*b)),
        ValueNode::Integer(i) => SchemaFragment::scalar(TypeName::Integer, ValueNode::Integer(*i)),
        ValueNode::Float(f) => num::infer_float(f.0),
        ValueNode::String(s) => str::infer_string(s),
        ValueNode::Array(xs) => arr::infer_array(xs, hint, opts),
        ValueNode::Object(m) => obj::infer_object(m, hint, opts),
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn infer_json(value: Value, hint: Value) -> Value {
        let value = ValueNode::from(value);
        let hint = ValueNode::from(hint);
        let frag = infer(&value, Some(&hint), &InferOptions::default());
        serde_json::to_value(&frag).unwrap()
    }

    // tiny helper to read JSON Pointers out of an emitted schema
    fn schema_pointer<'a>(v: &'a Value, ptr: &str) -> Option<&'a Value> {
        v.pointer(ptr)
    }

    #[test]
    fn scalars_keep_native_kind() {
        let cases = [
            (json!(true), "boolean"),
            (json!(false), "boolean"),
            (json!(7), "integer"),
            (json!(-7), "integer"),
            (json!(u64::MAX), "integer"),
            (json!(0.25), "number"),
            (json!("nginx"), "string"),
            (json!("0"), "string"),
        ];
        for (v, ty) in cases {
            let schema = infer_json(v.clone(), v.clone());
            assert_eq!(schema["type"], json!(ty), "for {v}");
            assert_eq!(schema["default"], v);
        }
    }

    #[test]
    fn whole_floats_collapse_to_integer() {
        assert_eq!(infer_json(json!(42.0), json!(42.0)), json!({"type": "integer", "default": 42}));
        assert_eq!(infer_json(json!(-3.0), json!(null)), json!({"type": "integer", "default": -3}));
    }

    #[test]
    fn placeholder_strings_and_null_are_nullable() {
        let sentinel = json!({"type": ["string", "null"], "default": null});
        for v in [json!(""), json!("null"), json!("<nil>"), json!(null)] {
            assert_eq!(infer_json(v.clone(), v), sentinel);
        }
    }

    #[test]
    fn nested_objects_preserve_leaf_schema() {
        let v = json!({"a": {"b": {"c": "v"}}});
        let schema = infer_json(v.clone(), v);
        assert_eq!(
            schema_pointer(&schema, "/properties/a/properties/b/properties/c"),
            Some(&json!({"type": "string", "default": "v"}))
        );
        assert_eq!(schema_pointer(&schema, "/properties/a/type"), Some(&json!("object")));
        assert_eq!(schema_pointer(&schema, "/required"), Some(&json!(["a"])));
    }

    #[test]
    fn key_missing_from_baseline_is_not_required() {
        let schema = infer_json(json!({"x": 1}), json!({}));
        assert_eq!(schema, json!({
            "type": "object",
            "properties": {"x": {"type": "integer", "default": 1}},
            "default": {"x": 1}
        }));
    }

    #[test]
    fn no_hint_means_no_required() {
        let value = ValueNode::from(json!({"a": 1, "b": {"c": 2}}));
        let frag = infer(&value, None, &InferOptions::default());
        assert!(frag.required.is_none());
        assert!(frag.property("b").unwrap().required.is_none());
    }

    #[test]
    fn mismatched_hint_is_ignored() {
        // baseline had a scalar where the value has an object
        let schema = infer_json(json!({"svc": {"port": 80}}), json!({"svc": "none"}));
        assert_eq!(schema_pointer(&schema, "/properties/svc/type"), Some(&json!("object")));
        assert_eq!(schema_pointer(&schema, "/properties/svc/required"), None);
        assert_eq!(schema_pointer(&schema, "/required"), Some(&json!(["svc"])));
    }

    #[test]
    fn object_default_strips_nulls_and_empty_children() {
        let v = json!({
            "name": "app",
            "gone": null,
            "nested": {"keep": 1, "drop": null},
            "hollow": {"only": null},
            "empty": {},
            "list": [null, 1],
            "blank": ""
        });
        let schema = infer_json(v, json!(null));
        assert_eq!(schema["default"], json!({
            "name": "app",
            "nested": {"keep": 1},
            "list": [null, 1],
            "blank": ""
        }));
        // the properties still describe every key
        assert_eq!(schema["properties"].as_object().unwrap().len(), 7);
        assert_eq!(schema["properties"]["empty"]["default"], json!({}));
    }

    #[test]
    fn disabled_component_keeps_its_children_optional() {
        let v = json!({"feature": {"enabled": false, "x": 1}});
        let schema = infer_json(v.clone(), v);
        assert_eq!(schema_pointer(&schema, "/properties/feature/required"), None);
        assert_eq!(schema_pointer(&schema, "/required"), None);
    }

    #[test]
    fn arrays_use_first_element_and_literal_default() {
        let schema = infer_json(
            json!({"ports": [{"name": "http", "port": 80}, {"name": "grpc"}]}),
            json!({"ports": [{"name": "", "port": 8080}]}),
        );
        let ports = &schema["properties"]["ports"];
        assert_eq!(ports["type"], json!("array"));
        assert_eq!(ports["default"], json!([{"name": "http", "port": 80}, {"name": "grpc"}]));
        assert_eq!(ports["items"]["properties"]["port"]["type"], json!("integer"));
        // item hint came from the baseline's first element
        assert_eq!(ports["items"]["required"], json!(["port"]));
    }

    #[test]
    fn empty_array_items_accept_anything() {
        let schema = infer_json(json!([]), json!([]));
        assert_eq!(schema, json!({"type": "array", "items": {}, "default": []}));
    }
}
