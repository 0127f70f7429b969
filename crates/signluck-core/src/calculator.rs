// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::matcher::{find_alignments, Alignment};
use crate::plate::{Coordinate, PlateFormat, Slot, ALPHABET};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

/// One pattern position as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualSymbol {
    pub value: char,
    /// Occupied by the query in the primary alignment
    pub is_fixed: bool,
    pub possible_query_indices: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExampleSymbol {
    pub value: char,
    pub is_query: bool,
}

pub type ExamplePlate = Vec<ExampleSymbol>;

pub fn render(example: &[ExampleSymbol]) -> String {
    example.iter().map(|s| s.value).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub country_name: String,
    pub country_code: String,
    pub coordinate: Coordinate,
    pub probability: f64,
    pub symbols: Vec<VisualSymbol>,
    pub allowed_letters: String,
    pub pattern: String,
    pub flag_glyph: Option<String>,
    pub examples: Vec<ExamplePlate>,
}

/// Turns the alignments of a query into a probability, a visual map and sample plates.
#[derive(Debug, Clone)]
pub struct PlateCalculator {
    pub example_target: usize,
    pub sample_budget: usize,
    pub max_examples: usize,
}

impl Default for PlateCalculator {
    fn default() -> Self {
        Self {
            example_target: 5,
            sample_budget: 10,
            max_examples: 10,
        }
    }
}

impl PlateCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates `query` against one format. `None` means the query cannot appear on
    /// that country's plates at all. The query is trimmed and uppercased first.
    pub fn evaluate<R: Rng + ?Sized>(
        &self,
        query: &str,
        format: &PlateFormat,
        rng: &mut R,
    ) -> Option<MatchResult> {
        let query = query.trim().to_uppercase();
        let slots = format.slots();
        let allowed = format.allowed();

        let alignments = find_alignments(&query, slots, allowed);
        if alignments.is_empty() {
            return None;
        }

        let total_space = format.total_space();
        // Overlapping alignments are counted once each
        let winning_space = alignments
            .iter()
            .fold(0u128, |acc, a| acc.saturating_add(free_space(a, slots, allowed)));

        let probability = if total_space == 0 {
            0.0
        } else {
            (winning_space as f64 / total_space as f64 * 100.0).clamp(0.0, 100.0)
        };

        let query: Vec<char> = query.chars().collect();
        let symbols = visualize(&query, slots, &alignments);
        let examples = self.generate_examples(&query, format, &alignments, winning_space, rng);

        log::debug!(
            "Evaluated query against {}: alignments={} total_space={} winning_space={} probability={:.4}",
            format.code,
            alignments.len(),
            total_space,
            winning_space,
            probability
        );

        Some(MatchResult {
            country_name: format.name.clone(),
            country_code: format.code.clone(),
            coordinate: format.coordinate,
            probability,
            symbols,
            allowed_letters: format.allowed_letters.clone(),
            pattern: format.pattern.clone(),
            flag_glyph: format.flag_glyph.clone(),
            examples,
        })
    }

    fn generate_examples<R: Rng + ?Sized>(
        &self,
        query: &[char],
        format: &PlateFormat,
        alignments: &[Alignment],
        winning_space: u128,
        rng: &mut R,
    ) -> Vec<ExamplePlate> {
        let mut examples: Vec<ExamplePlate> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        let mut push_unique = |example: ExamplePlate, examples: &mut Vec<ExamplePlate>| {
            if seen.insert(render(&example)) {
                examples.push(example);
            }
        };

        for alignment in alignments {
            if examples.len() >= self.example_target {
                break;
            }
            let example = random_example(query, format, alignment, rng);
            push_unique(example, &mut examples);
        }

        // Top up only when free slots leave room for variation
        if examples.len() < self.example_target && winning_space > alignments.len() as u128 {
            for _ in 0..self.sample_budget {
                if examples.len() >= self.example_target {
                    break;
                }
                let Some(alignment) = alignments.choose(rng) else {
                    break;
                };
                let example = random_example(query, format, alignment, rng);
                push_unique(example, &mut examples);
            }
        }

        examples.truncate(self.max_examples);
        examples
    }
}

/// Plates reachable when the aligned positions are pinned to the query.
fn free_space(alignment: &[usize], slots: &[Slot], allowed: &[char]) -> u128 {
    slots
        .iter()
        .enumerate()
        .filter(|(i, _)| !alignment.contains(i))
        .fold(1u128, |acc, (_, s)| acc.saturating_mul(s.options(allowed)))
}

fn visualize(query: &[char], slots: &[Slot], alignments: &[Alignment]) -> Vec<VisualSymbol> {
    let mut possible: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); slots.len()];
    for alignment in alignments {
        for (q_idx, &p_idx) in alignment.iter().enumerate() {
            possible[p_idx].insert(q_idx);
        }
    }

    let primary = &alignments[0];
    slots
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            let fixed = primary.iter().position(|&p| p == i);
            VisualSymbol {
                value: fixed.map_or(slot.template_char(), |k| query[k]),
                is_fixed: fixed.is_some(),
                possible_query_indices: possible[i].iter().copied().collect(),
            }
        })
        .collect()
}

fn random_example<R: Rng + ?Sized>(
    query: &[char],
    format: &PlateFormat,
    alignment: &[usize],
    rng: &mut R,
) -> ExamplePlate {
    let alphabet: Vec<char> = ALPHABET.chars().collect();
    let letters: &[char] = if format.allowed().is_empty() {
        &alphabet
    } else {
        format.allowed()
    };

    format
        .slots()
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            if let Some(k) = alignment.iter().position(|&p| p == i) {
                return ExampleSymbol {
                    value: query[k],
                    is_query: true,
                };
            }
            let value = match slot {
                Slot::Letter => *letters.choose(rng).unwrap_or(&'A'),
                Slot::Digit => char::from(b'0' + rng.gen_range(0..10u8)),
                Slot::Literal(c) => *c,
            };
            ExampleSymbol {
                value,
                is_query: false,
            }
        })
        .collect()
}
