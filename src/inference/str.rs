use crate::schema::{SchemaFragment, TypeName};
use crate::value::{is_placeholder_str, ValueNode};

pub(super) fn infer_string(s: &str) -> SchemaFragment {
    if is_placeholder_str(s) {
        SchemaFragment::nullable_string()
    } else {
        SchemaFragment::scalar(TypeName::String, ValueNode::String(s.to_string()))
    }
}
