use indexmap::IndexMap;

use super::InferOptions;
use crate::schema::SchemaFragment;
use crate::value::{Object, ValueNode};

pub(super) fn infer_object(
    map: &Object,
    hint: Option<&ValueNode>,
    opts: &InferOptions,
) -> SchemaFragment {
    let hint_map = hint.and_then(ValueNode::as_object);

    let mut properties = IndexMap::with_capacity(map.len());
    for (key, child) in map {
        let _span = opts
            .log_decisions
            .then(|| tracing::debug_span!("key", name = %key).entered());
        let child_hint = hint_map.and_then(|h| h.get(key));
        properties.insert(key.clone(), super::infer(child, child_hint, opts));
    }

    let required = crate::required::required_fields(map, hint_map, opts);
    SchemaFragment::object(properties, strip_nulls(map), required)
}

/// Copy of `map` without null leaves. Nested objects left empty after
/// stripping are dropped too; arrays are copied as they are.
pub fn strip_nulls(map: &Object) -> Object {
    let mut out = Object::with_capacity(map.len());
    for (key, value) in map {
        match value {
            ValueNode::Null => {}
            ValueNode::Object(inner) => {
                let inner = strip_nulls(inner);
                if !inner.is_empty() {
                    out.insert(key.clone(), ValueNode::Object(inner));
                }
            }
            other => {
                out.insert(key.clone(), other.clone());
            }
        }
    }
    out
}
