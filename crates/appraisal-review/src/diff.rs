//! Two-column line diff for mismatched field values.
//!
//! Comparison rows carry a plain-text rendering of how the two sides
//! differ so a reviewer can spot the change without re-reading both
//! documents. Field values are short, so the diff runs a full LCS
//! table over lines and backtracks for the exact alignment.

use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DiffOp<'a> {
    Equal(&'a str),
    LeftOnly(&'a str),
    RightOnly(&'a str),
}

/// Renders `a` and `b` side by side under the given column labels.
///
/// Markers between the columns follow `sdiff` conventions: a blank
/// marker for identical lines, `|` for changed lines, `<` for lines
/// only on the left, and `>` for lines only on the right.
#[must_use]
pub fn side_by_side(a: &str, b: &str, label_a: &str, label_b: &str) -> String {
    let left_lines: Vec<&str> = a.lines().collect();
    let right_lines: Vec<&str> = b.lines().collect();
    let rows = pair_rows(&diff_ops(&left_lines, &right_lines));

    let width = rows
        .iter()
        .map(|(left, _, _)| left.chars().count())
        .chain([label_a.chars().count()])
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let mut line = String::new();
    let _ = write!(line, "{label_a:<width$}   {label_b}");
    out.push_str(line.trim_end());
    out.push('\n');
    for (left, marker, right) in rows {
        line.clear();
        let _ = write!(line, "{left:<width$} {marker} {right}");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn diff_ops<'a>(a: &[&'a str], b: &[&'a str]) -> Vec<DiffOp<'a>> {
    let m = a.len();
    let n = b.len();
    let mut dp = vec![vec![0usize; n + 1]; m + 1];
    for i in 1..=m {
        for j in 1..=n {
            dp[i][j] = if a[i - 1] == b[j - 1] {
                dp[i - 1][j - 1] + 1
            } else {
                dp[i - 1][j].max(dp[i][j - 1])
            };
        }
    }

    let mut ops = Vec::with_capacity(m + n);
    let (mut i, mut j) = (m, n);
    while i > 0 && j > 0 {
        if a[i - 1] == b[j - 1] {
            ops.push(DiffOp::Equal(a[i - 1]));
            i -= 1;
            j -= 1;
        } else if dp[i - 1][j] >= dp[i][j - 1] {
            ops.push(DiffOp::LeftOnly(a[i - 1]));
            i -= 1;
        } else {
            ops.push(DiffOp::RightOnly(b[j - 1]));
            j -= 1;
        }
    }
    while i > 0 {
        ops.push(DiffOp::LeftOnly(a[i - 1]));
        i -= 1;
    }
    while j > 0 {
        ops.push(DiffOp::RightOnly(b[j - 1]));
        j -= 1;
    }
    ops.reverse();
    ops
}

/// Folds the op stream into display rows, pairing each run of
/// left-only lines with the right-only run that follows it so a
/// changed line renders as one `|` row instead of a `<`/`>` pair.
fn pair_rows<'a>(ops: &[DiffOp<'a>]) -> Vec<(&'a str, char, &'a str)> {
    let mut rows = Vec::with_capacity(ops.len());
    let mut idx = 0;
    while idx < ops.len() {
        if let DiffOp::Equal(line) = ops[idx] {
            rows.push((line, ' ', line));
            idx += 1;
            continue;
        }
        let mut left = Vec::new();
        let mut right = Vec::new();
        while idx < ops.len() {
            match ops[idx] {
                DiffOp::LeftOnly(line) => left.push(line),
                DiffOp::RightOnly(line) => right.push(line),
                DiffOp::Equal(_) => break,
            }
            idx += 1;
        }
        let paired = left.len().min(right.len());
        for k in 0..paired {
            rows.push((left[k], '|', right[k]));
        }
        for line in &left[paired..] {
            rows.push((line, '<', ""));
        }
        for line in &right[paired..] {
            rows.push(("", '>', line));
        }
    }
    rows
}
