// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::plate::Slot;

/// Pattern positions occupied by each query character, strictly increasing.
pub type Alignment = Vec<usize>;

/// Finds every order-preserving placement of `query` onto `slots`.
///
/// Pattern positions may be skipped freely, so separators and unused slots can sit
/// between or around the matched characters. The consume branch is explored before the
/// skip branch, which makes the first alignment the leftmost placement.
/// Returns an empty vector when nothing fits.
pub fn find_alignments(query: &str, slots: &[Slot], allowed: &[char]) -> Vec<Alignment> {
    let query: Vec<char> = query.chars().collect();
    let mut results = Vec::new();
    let mut current = Vec::with_capacity(query.len());

    if query.len() > slots.len() {
        return results;
    }

    backtrack(&query, slots, allowed, 0, 0, &mut current, &mut results);
    results
}

fn backtrack(
    query: &[char],
    slots: &[Slot],
    allowed: &[char],
    q_idx: usize,
    p_idx: usize,
    current: &mut Alignment,
    results: &mut Vec<Alignment>,
) {
    if q_idx == query.len() {
        results.push(current.clone());
        return;
    }
    // Not enough positions left for the rest of the query
    if slots.len() - p_idx < query.len() - q_idx {
        return;
    }

    if slots[p_idx].accepts(query[q_idx], allowed) {
        current.push(p_idx);
        backtrack(query, slots, allowed, q_idx + 1, p_idx + 1, current, results);
        current.pop();
    }

    backtrack(query, slots, allowed, q_idx, p_idx + 1, current, results);
}
