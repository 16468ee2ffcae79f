use crate::{ArrayDiff, DiffOptions, Node, Pointer};

use super::{diff_impl, equals, Collector, DiffOp};

pub(super) fn diff_lists(
    expected: &[Node],
    actual: &[Node],
    path: &Pointer,
    options: &DiffOptions,
    out: &mut Collector,
) {
    match options.array_diff() {
        ArrayDiff::Indexed => diff_indexed(expected, actual, path, options, out),
        ArrayDiff::Lcs => diff_aligned(expected, actual, path, options, out),
    }
}

fn diff_indexed(
    expected: &[Node],
    actual: &[Node],
    path: &Pointer,
    options: &DiffOptions,
    out: &mut Collector,
) {
    for (index, (left, right)) in expected.iter().zip(actual).enumerate() {
        if out.is_full() {
            return;
        }
        diff_impl(left, right, &path.child_index(index), options, out);
    }
    emit_leftovers(expected, actual, expected.len().min(actual.len()), path, out);
}

/// Aligns both arrays on their longest common subsequence of equal elements
/// and reports the gaps between anchors.
fn diff_aligned(
    expected: &[Node],
    actual: &[Node],
    path: &Pointer,
    options: &DiffOptions,
    out: &mut Collector,
) {
    let anchors = longest_common_subsequence(expected, actual, options);
    let mut prev_left = 0usize;
    let mut prev_right = 0usize;
    let sentinel = (expected.len(), actual.len());

    for (left, right) in anchors.into_iter().chain(std::iter::once(sentinel)) {
        if out.is_full() {
            return;
        }
        diff_gap(
            &expected[prev_left..left],
            prev_left,
            &actual[prev_right..right],
            prev_right,
            path,
            options,
            out,
        );
        prev_left = left + 1;
        prev_right = right + 1;
    }
}

fn diff_gap(
    removed: &[Node],
    left_start: usize,
    added: &[Node],
    right_start: usize,
    path: &Pointer,
    options: &DiffOptions,
    out: &mut Collector,
) {
    // Positional pairing only when an index means the same slot on both sides.
    let paired = if left_start == right_start { removed.len().min(added.len()) } else { 0 };
    for offset in 0..paired {
        if out.is_full() {
            return;
        }
        let index = left_start + offset;
        diff_impl(&removed[offset], &added[offset], &path.child_index(index), options, out);
    }
    for (offset, node) in removed.iter().enumerate().skip(paired) {
        out.push(DiffOp::remove(path.child_index(left_start + offset), node.clone()));
    }
    for (offset, node) in added.iter().enumerate().skip(paired) {
        out.push(DiffOp::add(path.child_index(right_start + offset), node.clone()));
    }
}

fn emit_leftovers(
    expected: &[Node],
    actual: &[Node],
    common: usize,
    path: &Pointer,
    out: &mut Collector,
) {
    for (index, node) in expected.iter().enumerate().skip(common) {
        out.push(DiffOp::remove(path.child_index(index), node.clone()));
    }
    for (index, node) in actual.iter().enumerate().skip(common) {
        out.push(DiffOp::add(path.child_index(index), node.clone()));
    }
}

/// Returns matched `(expected, actual)` index pairs in ascending order.
fn longest_common_subsequence(
    lhs: &[Node],
    rhs: &[Node],
    options: &DiffOptions,
) -> Vec<(usize, usize)> {
    let n = lhs.len();
    let m = rhs.len();
    let same: Vec<Vec<bool>> =
        lhs.iter().map(|a| rhs.iter().map(|b| equals(a, b, options)).collect()).collect();

    let mut table = vec![vec![0usize; m + 1]; n + 1];
    for i in 0..n {
        for j in 0..m {
            table[i + 1][j + 1] = if same[i][j] {
                table[i][j] + 1
            } else {
                table[i][j + 1].max(table[i + 1][j])
            };
        }
    }

    let mut result = Vec::with_capacity(table[n][m]);
    let mut i = n;
    let mut j = m;
    while i > 0 && j > 0 {
        if same[i - 1][j - 1] {
            result.push((i - 1, j - 1));
            i -= 1;
            j -= 1;
        } else if table[i - 1][j] >= table[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    result.reverse();
    result
}
