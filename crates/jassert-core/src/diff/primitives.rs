use crate::{DiffOptions, Node, Pointer};

use super::{Collector, DiffOp};

pub(super) fn diff_primitives(
    expected: &Node,
    actual: &Node,
    path: &Pointer,
    options: &DiffOptions,
    out: &mut Collector,
) {
    if scalar_equals(expected, actual, options) {
        return;
    }
    out.push(DiffOp::replace(path.clone(), actual.clone()));
}

/// Value equality for anything that is not an object-object or array-array
/// pair. Mismatched types are never equal.
pub(super) fn scalar_equals(lhs: &Node, rhs: &Node, options: &DiffOptions) -> bool {
    match (lhs, rhs) {
        (Node::Null, Node::Null) => true,
        (Node::Bool(a), Node::Bool(b)) => a == b,
        (Node::Number(a), Node::Number(b)) => a.equals_with_precision(b, options.precision()),
        (Node::String(a), Node::String(b)) => a == b,
        _ => false,
    }
}
