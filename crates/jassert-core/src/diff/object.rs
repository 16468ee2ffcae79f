use crate::{DiffOptions, Object, Pointer};

use super::{diff_impl, Collector, DiffOp};

pub(super) fn diff_objects(
    expected: &Object,
    actual: &Object,
    path: &Pointer,
    options: &DiffOptions,
    out: &mut Collector,
) {
    for (key, left) in expected {
        if out.is_full() {
            return;
        }
        let child = path.child_key(key.as_str());
        match actual.get(key) {
            Some(right) => diff_impl(left, right, &child, options, out),
            None => out.push(DiffOp::remove(child, left.clone())),
        }
    }

    for (key, right) in actual {
        if out.is_full() {
            return;
        }
        if !expected.contains_key(key) {
            out.push(DiffOp::add(path.child_key(key.as_str()), right.clone()));
        }
    }
}
