//! Second pass over a finished schema: re-check every `required` list
//! against the baseline, this time with zero-value emptiness.
//!
//! Runs after inference so that a baseline of `0`, `false` or a disabled
//! component also drops the key, which the first pass lets through.
use tracing::debug;

use crate::inference::InferOptions;
use crate::schema::SchemaFragment;
use crate::value::{is_disabled_map, Object, ValueNode};

/// Prune `required` lists in place, walking `schema` alongside `defaults`.
///
/// Properties are visited whenever their baseline entry is an object, even
/// when the enclosing fragment has no `required` list of its own.
pub fn prune_required(schema: &mut SchemaFragment, defaults: &Object, opts: &InferOptions) {
    let Some(properties) = schema.properties.as_mut() else {
        return;
    };

    if let Some(required) = schema.required.take() {
        if is_disabled_map(defaults) {
            if opts.log_decisions {
                debug!(dropped = required.len(), "baseline disabled; required removed");
            }
        } else {
            let kept: Vec<String> = required
                .into_iter()
                .filter(|field| {
                    let keep = keeps_required(defaults.get(field));
                    if !keep && opts.log_decisions {
                        debug!(key = %field, "pruned from required");
                    }
                    keep
                })
                .collect();
            if !kept.is_empty() {
                schema.required = Some(kept);
            }
        }
    }

    for (key, child) in properties.iter_mut() {
        if let Some(ValueNode::Object(nested)) = defaults.get(key) {
            prune_required(child, nested, opts);
        }
    }
}

/// A baseline entry that is missing, zero-valued or a disabled component
/// does not justify a required key.
fn keeps_required(default: Option<&ValueNode>) -> bool {
    match default {
        None => false,
        Some(v) => !v.is_zero_value() && !v.is_disabled(),
    }
}
