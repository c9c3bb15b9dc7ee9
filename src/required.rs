//! Which object keys are mandatory.
//!
//! A key is required when the baseline sets it to something meaningful and
//! the effective values still carry it. Toggleable components (objects with
//! `enabled: false`) never make their keys, or themselves, required.
use std::fmt;

use tracing::debug;

use crate::inference::InferOptions;
use crate::value::{is_disabled_map, Object, ValueNode};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exclusion {
    /// Baseline is null, `"null"` or `""`.
    NullDefault,
    /// Baseline is an empty string, array or object.
    EmptyDefault,
    /// The value is a component with `enabled: false`.
    DisabledComponent,
    /// The enclosing object has `enabled: false`.
    DisabledParent,
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Exclusion::NullDefault => "baseline is null",
            Exclusion::EmptyDefault => "baseline is empty",
            Exclusion::DisabledComponent => "component is disabled",
            Exclusion::DisabledParent => "parent is disabled",
        })
    }
}

/// Why `current` (whose baseline is `default`) is not required, if it isn't.
pub fn exclusion(default: &ValueNode, current: &ValueNode, parent_disabled: bool) -> Option<Exclusion> {
    let null_like = match default {
        ValueNode::Null => true,
        ValueNode::String(s) => s.is_empty() || s == "null",
        _ => false,
    };
    if null_like {
        Some(Exclusion::NullDefault)
    } else if default.is_blank() {
        Some(Exclusion::EmptyDefault)
    } else if current.is_disabled() {
        Some(Exclusion::DisabledComponent)
    } else if parent_disabled {
        Some(Exclusion::DisabledParent)
    } else {
        None
    }
}

/// Required keys of `value`, in the baseline's key order.
///
/// Only keys present in both `value` and `hint` are candidates; without a
/// baseline object nothing is required.
pub fn required_fields(value: &Object, hint: Option<&Object>, opts: &InferOptions) -> Vec<String> {
    let Some(hint) = hint else {
        return Vec::new();
    };
    let parent_disabled = is_disabled_map(value);

    let mut out = Vec::new();
    for (key, default) in hint {
        let Some(current) = value.get(key) else {
            continue;
        };
        match exclusion(default, current, parent_disabled) {
            None => {
                if opts.log_decisions {
                    debug!(key = %key, "required");
                }
                out.push(key.clone());
            }
            Some(reason) => {
                if opts.log_decisions {
                    debug!(key = %key, %reason, "not required");
                }
            }
        }
    }
    out
}
