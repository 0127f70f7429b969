// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use std::collections::BTreeSet;

const MAX_SUGGESTIONS: usize = 5;

/// Letters that read like a digit on a plate.
fn lookalike(c: char) -> Option<char> {
    match c {
        'O' => Some('0'),
        'I' => Some('1'),
        'Z' => Some('2'),
        'E' => Some('3'),
        'S' => Some('5'),
        'B' => Some('8'),
        _ => None,
    }
}

/// Leetspeak variants of `query` (e.g. BOSS -> B0SS, 80SS), at most five, sorted.
///
/// Variants closest to the original (fewest substitutions) are kept first, so a long
/// query still gets its single-swap spellings before the fully rewritten ones.
pub fn suggest(query: &str) -> Vec<String> {
    let query = query.trim().to_uppercase();
    let chars: Vec<char> = query.chars().collect();
    let mut found = BTreeSet::new();
    let mut current = String::with_capacity(query.len());
    expand(&chars, 0, &mut current, &query, &mut found);

    let mut ranked: Vec<(usize, String)> = found
        .into_iter()
        .map(|variant| (substitutions(&query, &variant), variant))
        .collect();
    ranked.sort();

    let mut kept: Vec<String> = ranked
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, variant)| variant)
        .collect();
    kept.sort();
    kept
}

fn substitutions(original: &str, variant: &str) -> usize {
    original
        .chars()
        .zip(variant.chars())
        .filter(|(a, b)| a != b)
        .count()
}

fn expand(
    chars: &[char],
    idx: usize,
    current: &mut String,
    original: &str,
    found: &mut BTreeSet<String>,
) {
    if idx == chars.len() {
        if current != original {
            found.insert(current.clone());
        }
        return;
    }

    let c = chars[idx];
    current.push(c);
    expand(chars, idx + 1, current, original, found);
    current.pop();

    if let Some(sub) = lookalike(c) {
        current.push(sub);
        expand(chars, idx + 1, current, original, found);
        current.pop();
    }
}
