//! Decoded value trees.
//!
//! Both the effective values and the baseline defaults are materialized as
//! [`ValueNode`] before inference runs. Object keys are always strings and keep
//! first-seen document order, which is what makes `required` lists stable.
use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

pub type Object = IndexMap<String, ValueNode>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueNode {
    Null,
    Bool(bool),
    /// Holds the whole `i64::MIN..=u64::MAX` range.
    Integer(i128),
    Float(OrderedFloat<f64>),
    String(String),
    Array(Vec<ValueNode>),
    Object(Object),
}

// ------------------------------- Accessors -------------------------------- //

impl ValueNode {
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            ValueNode::Object(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[ValueNode]> {
        match self {
            ValueNode::Array(xs) => Some(xs),
            _ => None,
        }
    }

    /// Child lookup; `None` for missing keys and for non-objects alike.
    pub fn get(&self, key: &str) -> Option<&ValueNode> {
        self.as_object().and_then(|m| m.get(key))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ValueNode::Null)
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            ValueNode::Null => "null",
            ValueNode::Bool(_) => "bool",
            ValueNode::Integer(_) => "integer",
            ValueNode::Float(_) => "float",
            ValueNode::String(_) => "string",
            ValueNode::Array(_) => "array",
            ValueNode::Object(_) => "object",
        }
    }
}

// ------------------------------ Predicates -------------------------------- //

/// Strings that stand in for "no value" in chart values files.
pub fn is_placeholder_str(s: &str) -> bool {
    matches!(s, "" | "null" | "<nil>")
}

/// The map carries `enabled: false` (a boolean, not the string).
pub fn is_disabled_map(map: &Object) -> bool {
    matches!(map.get("enabled"), Some(ValueNode::Bool(false)))
}

impl ValueNode {
    /// Empty string, empty array or empty object. Zero and `false` are values.
    pub fn is_blank(&self) -> bool {
        match self {
            ValueNode::String(s) => s.is_empty(),
            ValueNode::Array(xs) => xs.is_empty(),
            ValueNode::Object(m) => m.is_empty(),
            _ => false,
        }
    }

    /// Zero-value emptiness: everything [`is_blank`](Self::is_blank) accepts
    /// plus null, numeric zero and `false`.
    pub fn is_zero_value(&self) -> bool {
        match self {
            ValueNode::Null => true,
            ValueNode::Bool(b) => !*b,
            ValueNode::Integer(i) => *i == 0,
            ValueNode::Float(f) => f.0 == 0.0,
            _ => self.is_blank(),
        }
    }

    /// A component block that defaults to off: an object with `enabled: false`.
    pub fn is_disabled(&self) -> bool {
        self.as_object().is_some_and(is_disabled_map)
    }

    /// Nesting depth; scalars and empty containers count as 1.
    ///
    /// Walks with an explicit stack so it stays safe on inputs too deep for
    /// the recursive passes it guards.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack: Vec<(&ValueNode, usize)> = vec![(self, 1)];
        while let Some((node, d)) = stack.pop() {
            max = max.max(d);
            match node {
                ValueNode::Array(xs) => stack.extend(xs.iter().map(|x| (x, d + 1))),
                ValueNode::Object(m) => stack.extend(m.values().map(|x| (x, d + 1))),
                _ => {}
            }
        }
        max
    }
}

// ------------------------------ Conversions ------------------------------- //

impl From<serde_json::Value> for ValueNode {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value;
        match v {
            Value::Null => ValueNode::Null,
            Value::Bool(b) => ValueNode::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    ValueNode::Integer(i as i128)
                } else if let Some(u) = n.as_u64() {
                    ValueNode::Integer(u as i128)
                } else {
                    ValueNode::Float(OrderedFloat(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            Value::String(s) => ValueNode::String(s),
            Value::Array(xs) => ValueNode::Array(xs.into_iter().map(ValueNode::from).collect()),
            Value::Object(m) => ValueNode::Object(
                m.into_iter().map(|(k, v)| (k, ValueNode::from(v))).collect()
            ),
        }
    }
}

impl From<&str> for ValueNode {
    fn from(s: &str) -> Self { ValueNode::String(s.to_string()) }
}

impl From<bool> for ValueNode {
    fn from(b: bool) -> Self { ValueNode::Bool(b) }
}

impl From<i64> for ValueNode {
    fn from(i: i64) -> Self { ValueNode::Integer(i as i128) }
}

impl From<f64> for ValueNode {
    fn from(f: f64) -> Self { ValueNode::Float(OrderedFloat(f)) }
}

impl Serialize for ValueNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ValueNode::Null => serializer.serialize_unit(),
            ValueNode::Bool(b) => serializer.serialize_bool(*b),
            ValueNode::Integer(i) => {
                if let Ok(v) = i64::try_from(*i) {
                    serializer.serialize_i64(v)
                } else if let Ok(v) = u64::try_from(*i) {
                    serializer.serialize_u64(v)
                } else {
                    serializer.serialize_i128(*i)
                }
            }
            ValueNode::Float(f) => serializer.serialize_f64(f.0),
            ValueNode::String(s) => serializer.serialize_str(s),
            ValueNode::Array(xs) => {
                let mut seq = serializer.serialize_seq(Some(xs.len()))?;
                for x in xs { seq.serialize_element(x)?; }
                seq.end()
            }
            ValueNode::Object(m) => {
                let mut map = serializer.serialize_map(Some(m.len()))?;
                for (k, v) in m { map.serialize_entry(k, v)?; }
                map.end()
            }
        }
    }
}

// ------------------------------- Tests ------------------------------------ //
