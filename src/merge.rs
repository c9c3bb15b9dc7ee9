//! Values merge logic
//!
//! - Objects: deep-merge by key
//! - Arrays: REPLACE (last wins)
//! - Scalars and mismatched kinds: override (last wins)
use crate::value::{Object, ValueNode};

/// Deep merge `overlay` into a copy of `base`.
///
/// Keys only in `base` keep their position; keys new in `overlay` are
/// appended in overlay order. Neither input is modified.
pub fn deep_merge(base: &Object, overlay: &Object) -> Object {
    let mut out = base.clone();
    for (key, overlay_value) in overlay {
        let merged = match (out.get(key), overlay_value) {
            (Some(ValueNode::Object(b)), ValueNode::Object(o)) => ValueNode::Object(deep_merge(b, o)),
            _ => overlay_value.clone(),
        };
        out.insert(key.clone(), merged);
    }
    out
}

/// [`deep_merge`] lifted to arbitrary nodes: anything that is not an object
/// on both sides is replaced by the overlay.
pub fn merge_values(base: &ValueNode, overlay: &ValueNode) -> ValueNode {
    match (base, overlay) {
        (ValueNode::Object(b), ValueNode::Object(o)) => ValueNode::Object(deep_merge(b, o)),
        _ => overlay.clone(),
    }
}

/// Merge override layers in order (first is lowest precedence after `base`).
pub fn merge_layers<'a, I>(base: &ValueNode, layers: I) -> ValueNode
where
    I: IntoIterator<Item = &'a ValueNode>,
{
    layers.into_iter().fold(base.clone(), |acc, layer| merge_values(&acc, layer))
}
