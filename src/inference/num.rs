use crate::schema::{SchemaFragment, TypeName};
use crate::value::ValueNode;

/// Loaders hand back `2.0` for a literal `2` often enough that whole floats
/// are typed as integers. `.nan`/`.inf` have no JSON spelling, so they get no
/// `default`.
pub(super) fn infer_float(f: f64) -> SchemaFragment {
    match whole_float(f) {
        Some(i) => SchemaFragment::scalar(TypeName::Integer, ValueNode::Integer(i)),
        None if !f.is_finite() => SchemaFragment::typed(TypeName::Number),
        None => SchemaFragment::scalar(TypeName::Number, ValueNode::from(f)),
    }
}

/// `Some(n)` when `f` has no fractional part and fits `i64::MIN..=u64::MAX`.
pub fn whole_float(f: f64) -> Option<i128> {
    // u64::MAX as f64 rounds up to 2^64, hence the strict bound
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < u64::MAX as f64 {
        Some(f as i128)
    } else {
        None
    }
}
