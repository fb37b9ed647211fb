/*
 * pando is a decentralized, content-addressed version-control core
 * Copyright (C) 2026  Javier Lancha Vázquez <javier.lancha@gmail.com>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

//! Line-level three-way text merge, invoked by the merge engine once per
//! conflicting file. Deliberately conservative: two sides that touch the
//! same region differently are reported as a conflict rather than guessed
//! at, mirroring how a textual merge tool behaves at the line granularity.

const CONFLICT_START: &str = "<<<<<<< ours";
const CONFLICT_BASE: &str = "||||||| base";
const CONFLICT_SEP: &str = "=======";
const CONFLICT_END: &str = ">>>>>>> theirs";

/// Result of merging one file's three versions.
pub struct Merge3Result {
    /// Best-effort merged content. Identical to `annotated` when `conflict`
    /// is set; callers MUST NOT treat `bytes` as a real merge result in
    /// that case, only `annotated` (for display) and `conflict` matter.
    pub bytes: Vec<u8>,
    pub conflict: bool,
    pub annotated: Vec<u8>,
}

/// Splits into lines, keeping the trailing newline attached to each line so
/// the merge is byte-faithful (no implicit final-newline normalization).
fn split_lines(bytes: &[u8]) -> Vec<String> {
    let text = String::from_utf8_lossy(bytes);
    if text.is_empty() {
        return Vec::new();
    }
    let mut lines: Vec<String> = text.split_inclusive('\n').map(|s| s.to_string()).collect();
    if lines.is_empty() {
        lines.push(text.into_owned());
    }
    lines
}

/// Standard O(n*m) longest-common-subsequence table over two line slices.
fn lcs_table(a: &[String], b: &[String]) -> Vec<Vec<u32>> {
    let (n, m) = (a.len(), b.len());
    let mut table = vec![vec![0u32; m + 1]; n + 1];
    for i in 0..n {
        for j in 0..m {
            table[i + 1][j + 1] = if a[i] == b[j] {
                table[i][j] + 1
            } else {
                table[i][j + 1].max(table[i + 1][j])
            };
        }
    }
    table
}

/// Backtracks the LCS table into a monotonically increasing list of matched
/// `(a_index, b_index)` pairs of equal lines.
fn lcs_pairs(a: &[String], b: &[String]) -> Vec<(usize, usize)> {
    let table = lcs_table(a, b);
    let (mut i, mut j) = (a.len(), b.len());
    let mut pairs = Vec::new();
    while i > 0 && j > 0 {
        if a[i - 1] == b[j - 1] {
            pairs.push((i - 1, j - 1));
            i -= 1;
            j -= 1;
        } else if table[i - 1][j] >= table[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    pairs.reverse();
    pairs
}

/// Merges one "hunk" (a base range plus the origin/dest ranges aligned to
/// it). Appends to `result`/`annotated`; sets `*conflict` if the two sides
/// disagree on a non-trivial change.
fn merge_hunk(
    base_h: &[String],
    origin_h: &[String],
    dest_h: &[String],
    result: &mut Vec<String>,
    annotated: &mut Vec<String>,
    conflict: &mut bool,
) {
    if origin_h == dest_h {
        result.extend_from_slice(origin_h);
        annotated.extend_from_slice(origin_h);
    } else if origin_h == base_h {
        result.extend_from_slice(dest_h);
        annotated.extend_from_slice(dest_h);
    } else if dest_h == base_h {
        result.extend_from_slice(origin_h);
        annotated.extend_from_slice(origin_h);
    } else {
        *conflict = true;
        annotated.push(format!("{CONFLICT_START}\n"));
        annotated.extend_from_slice(origin_h);
        annotated.push(format!("{CONFLICT_BASE}\n"));
        annotated.extend_from_slice(base_h);
        annotated.push(format!("{CONFLICT_SEP}\n"));
        annotated.extend_from_slice(dest_h);
        annotated.push(format!("{CONFLICT_END}\n"));
        // `result` is best-effort only; favor the origin side so a caller
        // that ignores `conflict` still gets something plausible.
        result.extend_from_slice(origin_h);
    }
}

/// Three-way merges `origin` and `dest`, both derived from `base`. Walks
/// base lines that are unchanged on *both* sides as anchors, and resolves
/// the hunks between anchors per the classic diff3 rule: if only one side
/// touched a hunk, take it; if both made the identical change, take either;
/// otherwise conflict.
pub fn merge3(origin: &[u8], base: &[u8], dest: &[u8]) -> Merge3Result {
    let base_lines = split_lines(base);
    let origin_lines = split_lines(origin);
    let dest_lines = split_lines(dest);

    let bo_pairs = lcs_pairs(&base_lines, &origin_lines);
    let bd_pairs = lcs_pairs(&base_lines, &dest_lines);

    let mut orig_match = vec![None; base_lines.len()];
    for (b, o) in bo_pairs {
        orig_match[b] = Some(o);
    }
    let mut dest_match = vec![None; base_lines.len()];
    for (b, d) in bd_pairs {
        dest_match[b] = Some(d);
    }

    let anchors: Vec<usize> = (0..base_lines.len())
        .filter(|&i| orig_match[i].is_some() && dest_match[i].is_some())
        .collect();

    let mut result = Vec::new();
    let mut annotated = Vec::new();
    let mut conflict = false;

    let (mut prev_b, mut prev_o, mut prev_d) = (0usize, 0usize, 0usize);
    for anchor_b in anchors {
        let anchor_o = orig_match[anchor_b].unwrap();
        let anchor_d = dest_match[anchor_b].unwrap();

        merge_hunk(
            &base_lines[prev_b..anchor_b],
            &origin_lines[prev_o..anchor_o],
            &dest_lines[prev_d..anchor_d],
            &mut result,
            &mut annotated,
            &mut conflict,
        );

        result.push(base_lines[anchor_b].clone());
        annotated.push(base_lines[anchor_b].clone());

        prev_b = anchor_b + 1;
        prev_o = anchor_o + 1;
        prev_d = anchor_d + 1;
    }

    merge_hunk(
        &base_lines[prev_b..],
        &origin_lines[prev_o..],
        &dest_lines[prev_d..],
        &mut result,
        &mut annotated,
        &mut conflict,
    );

    Merge3Result {
        bytes: result.concat().into_bytes(),
        conflict,
        annotated: annotated.concat().into_bytes(),
    }
}
