//! End-to-end generation: merge → infer → prune → unions → `$schema`.
use tracing::{debug, info};

use crate::config::{GenerateOptions, MAX_DEPTH_CEILING};
use crate::error::{Error, Result};
use crate::inference::{infer, InferOptions};
use crate::merge::merge_layers;
use crate::prune::prune_required;
use crate::schema::{SchemaFragment, SchemaType, TypeName};
use crate::value::ValueNode;

// ------------------------------- Front API -------------------------------- //

/// Build the schema for `base` with `overrides` merged on top, in order.
///
/// `base` doubles as the baseline that decides `required`.
pub fn generate(base: &ValueNode, overrides: &[ValueNode], opts: &GenerateOptions) -> Result<SchemaFragment> {
    if opts.max_depth > MAX_DEPTH_CEILING {
        return Err(Error::MaxDepthTooLarge { requested: opts.max_depth, ceiling: MAX_DEPTH_CEILING });
    }
    for input in std::iter::once(base).chain(overrides) {
        check_depth(input, opts.max_depth)?;
    }

    let merged = merge_layers(base, overrides);
    debug!(layers = overrides.len(), root = merged.kind_name(), "merged values");

    let mut schema = infer(&merged, Some(base), &opts.infer);
    if let Some(defaults) = base.as_object() {
        prune_required(&mut schema, defaults, &opts.infer);
    }
    if opts.mixed_array_one_of {
        union_mixed_arrays(&mut schema, &merged, &opts.infer);
    }

    info!(
        properties = schema.properties.as_ref().map_or(0, |p| p.len()),
        required = schema.required_fields().len(),
        "schema generated"
    );
    Ok(schema.with_schema_uri(opts.schema_uri.clone()))
}

pub fn to_json_pretty(schema: &SchemaFragment) -> Result<String> {
    Ok(serde_json::to_string_pretty(schema)?)
}

fn check_depth(value: &ValueNode, limit: usize) -> Result<()> {
    let depth = value.depth();
    if depth > limit {
        return Err(Error::DepthExceeded { depth, limit });
    }
    Ok(())
}

// ------------------------------ Mixed arrays ------------------------------ //

/// Walk `schema` alongside the value it was inferred from and turn the
/// `items` of every heterogeneous array into a `oneOf` union, one variant per
/// distinct element type in first-seen order.
///
/// Variants whose types overlap are folded into one so that every element
/// matches exactly one branch: `integer` widens to `number`, `string` widens
/// to `["string","null"]`.
pub fn union_mixed_arrays(schema: &mut SchemaFragment, value: &ValueNode, opts: &InferOptions) {
    match value {
        ValueNode::Object(m) => {
            if let Some(properties) = schema.properties.as_mut() {
                for (key, child) in properties.iter_mut() {
                    if let Some(v) = m.get(key) {
                        union_mixed_arrays(child, v, opts);
                    }
                }
            }
        }
        ValueNode::Array(xs) => {
            let Some(items) = schema.items.as_mut() else {
                return;
            };
            let Some(first) = xs.first() else {
                return;
            };
            union_mixed_arrays(items, first, opts);

            let mut variants: Vec<SchemaFragment> = vec![(**items).clone()];
            for x in &xs[1..] {
                let mut candidate = infer(x, None, opts);
                union_mixed_arrays(&mut candidate, x, opts);
                match variants.iter_mut().find(|v| overlaps(v.ty, candidate.ty)) {
                    Some(existing) => existing.ty = widest(existing.ty, candidate.ty),
                    None => variants.push(candidate),
                }
            }
            if variants.len() > 1 {
                debug!(variants = variants.len(), "mixed array items");
                **items = SchemaFragment::union(variants);
            } else if let Some(widened) = variants.pop() {
                **items = widened;
            }
        }
        _ => {}
    }
}

// ---------------------------- Variant folding ----------------------------- //

/// Types whose instance sets intersect; such variants cannot share a `oneOf`.
fn overlaps(a: Option<SchemaType>, b: Option<SchemaType>) -> bool {
    a == b || (a.is_some() && b.is_some() && type_family(a) == type_family(b))
}

fn type_family(ty: Option<SchemaType>) -> Option<TypeName> {
    match ty? {
        SchemaType::One(TypeName::Integer) => Some(TypeName::Number),
        SchemaType::One(t) | SchemaType::OrNull(t) => Some(t),
    }
}

/// The wider of two overlapping types.
fn widest(a: Option<SchemaType>, b: Option<SchemaType>) -> Option<SchemaType> {
    match (a?, b?) {
        (SchemaType::OrNull(t), _) | (_, SchemaType::OrNull(t)) => Some(SchemaType::OrNull(t)),
        (SchemaType::One(TypeName::Integer), other) => Some(other),
        (one, _) => Some(one),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(v: serde_json::Value) -> ValueNode {
        ValueNode::from(v)
    }

    fn generate_json(base: serde_json::Value, overrides: &[serde_json::Value]) -> serde_json::Value {
        let overrides: Vec<ValueNode> = overrides.iter().cloned().map(node).collect();
        let schema = generate(&node(base), &overrides, &GenerateOptions::default()).unwrap();
        serde_json::to_value(&schema).unwrap()
    }

    #[test]
    fn attaches_schema_uri_at_root_only() {
        let schema = generate_json(json!({"a": {"b": 1}}), &[]);
        assert_eq!(schema["$schema"], json!("http://json-schema.org/schema#"));
        assert!(schema["properties"]["a"].get("$schema").is_none());
    }

    #[test]
    fn override_only_keys_are_typed_but_not_required() {
        let schema = generate_json(json!({"replicas": 1}), &[json!({"extra": "x", "replicas": 3})]);
        assert_eq!(schema["properties"]["extra"], json!({"type": "string", "default": "x"}));
        assert_eq!(schema["properties"]["replicas"]["default"], json!(3));
        assert_eq!(schema["required"], json!(["replicas"]));
        assert_eq!(schema["default"], json!({"replicas": 3, "extra": "x"}));
    }

    #[test]
    fn override_enabling_a_component_still_prunes_by_baseline() {
        let base = json!({"metrics": {"enabled": false, "port": 9090}});
        let schema = generate_json(base, &[json!({"metrics": {"enabled": true}})]);
        // inference promotes metrics (the merged value is enabled) ...
        // ... but the baseline component is disabled, so pruning removes it
        assert!(schema.get("required").is_none());
        assert!(schema["properties"]["metrics"].get("required").is_none());
    }

    #[test]
    fn mixed_arrays_become_one_of() {
        let schema = generate_json(json!({"args": ["--port", 80, "--tls", true, 81]}), &[]);
        assert_eq!(
            schema["properties"]["args"]["items"],
            json!({"oneOf": [
                {"type": "string", "default": "--port"},
                {"type": "integer", "default": 80},
                {"type": "boolean", "default": true}
            ]})
        );
    }

    #[test]
    fn homogeneous_arrays_keep_plain_items() {
        let schema = generate_json(json!({"hosts": ["a", "b"]}), &[]);
        assert_eq!(schema["properties"]["hosts"]["items"], json!({"type": "string", "default": "a"}));
    }

    #[test]
    fn one_of_pass_can_be_disabled() {
        let opts = GenerateOptions { mixed_array_one_of: false, ..GenerateOptions::default() };
        let schema = generate(&node(json!({"xs": [1, "a"]})), &[], &opts).unwrap();
        let items = schema.property("xs").unwrap().items.as_ref().unwrap();
        assert!(items.one_of.is_none());
    }

    #[test]
    fn rejects_inputs_past_the_depth_limit() {
        let opts = GenerateOptions { max_depth: 3, ..GenerateOptions::default() };
        let ok = generate(&node(json!({"a": {"b": 1}})), &[], &opts);
        assert!(ok.is_ok());

        let deep = node(json!({"a": {"b": {"c": 1}}}));
        let err = generate(&node(json!({})), &[deep], &opts).unwrap_err();
        assert!(matches!(err, Error::DepthExceeded { depth: 4, limit: 3 }));
    }

    #[test]
    fn integers_and_numbers_fold_into_one_number_variant() {
        let schema = generate_json(json!({"xs": [1, 2.5]}), &[]);
        assert_eq!(schema["properties"]["xs"]["items"], json!({"type": "number", "default": 1}));

        let schema = generate_json(json!({"xs": [1, 2.5, "a"]}), &[]);
        assert_eq!(
            schema["properties"]["xs"]["items"],
            json!({"oneOf": [
                {"type": "number", "default": 1},
                {"type": "string", "default": "a"}
            ]})
        );
    }

    #[test]
    fn strings_fold_into_the_nullable_variant() {
        let schema = generate_json(json!({"xs": ["", "a"]}), &[]);
        assert_eq!(
            schema["properties"]["xs"]["items"],
            json!({"type": ["string", "null"], "default": null})
        );

        let schema = generate_json(json!({"xs": ["a", null, true]}), &[]);
        assert_eq!(
            schema["properties"]["xs"]["items"],
            json!({"oneOf": [
                {"type": ["string", "null"], "default": "a"},
                {"type": "boolean", "default": true}
            ]})
        );
    }

    #[test]
    fn nested_mixed_arrays_in_later_variants_are_unioned() {
        let schema = generate_json(json!({"xs": ["a", [1, "b"]]}), &[]);
        let later = &schema["properties"]["xs"]["items"]["oneOf"][1];
        assert_eq!(later["type"], json!("array"));
        assert_eq!(
            later["items"],
            json!({"oneOf": [
                {"type": "integer", "default": 1},
                {"type": "string", "default": "b"}
            ]})
        );
    }

    #[test]
    fn max_depth_above_the_loader_ceiling_is_rejected() {
        let opts = GenerateOptions { max_depth: MAX_DEPTH_CEILING + 1, ..GenerateOptions::default() };
        let err = generate(&node(json!({})), &[], &opts).unwrap_err();
        assert!(matches!(err, Error::MaxDepthTooLarge { ceiling: MAX_DEPTH_CEILING, .. }));
    }

    #[test]
    fn pretty_json_is_indented() {
        let schema = generate(&node(json!({"x": 1})), &[], &GenerateOptions::default()).unwrap();
        let text = to_json_pretty(&schema).unwrap();
        assert!(text.starts_with("{\n  \"$schema\""));
    }
}
