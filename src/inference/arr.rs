use super::InferOptions;
use crate::schema::SchemaFragment;
use crate::value::ValueNode;

/// Only the first element is inspected; heterogeneous arrays are left to the
/// `oneOf` pass in `assemble`.
pub(super) fn infer_array(
    xs: &[ValueNode],
    hint: Option<&ValueNode>,
    opts: &InferOptions,
) -> SchemaFragment {
    let items = match xs.first() {
        Some(first) => {
            let first_hint = hint.and_then(ValueNode::as_array).and_then(|h| h.first());
            super::infer(first, first_hint, opts)
        }
        None => SchemaFragment::any(),
    };
    SchemaFragment::array(items, xs.to_vec())
}
