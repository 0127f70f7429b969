// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Template character for a letter slot.
pub const LETTER_MARKER: char = 'A';
/// Template character for a digit slot.
pub const DIGIT_MARKER: char = '0';

pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS_COUNT: u128 = 10;

#[derive(Error, Debug, PartialEq)]
pub enum PlateError {
    #[error("Country code must be exactly 2 characters, got '{0}'")]
    InvalidCode(String),
}

/// A single position of a plate pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Letter,
    Digit,
    Literal(char),
}

impl Slot {
    pub fn from_template(c: char) -> Self {
        match c {
            LETTER_MARKER => Slot::Letter,
            DIGIT_MARKER => Slot::Digit,
            other => Slot::Literal(other),
        }
    }

    pub fn template_char(&self) -> char {
        match self {
            Slot::Letter => LETTER_MARKER,
            Slot::Digit => DIGIT_MARKER,
            Slot::Literal(c) => *c,
        }
    }

    /// Number of distinct values this slot can take on a real plate.
    pub fn options(&self, allowed: &[char]) -> u128 {
        match self {
            Slot::Letter if allowed.is_empty() => ALPHABET.len() as u128,
            Slot::Letter => allowed.len() as u128,
            Slot::Digit => DIGITS_COUNT,
            Slot::Literal(_) => 1,
        }
    }

    /// Whether a query character may occupy this slot. Literals never do.
    pub fn accepts(&self, c: char, allowed: &[char]) -> bool {
        match self {
            Slot::Letter => {
                c.is_alphabetic() && (allowed.is_empty() || allowed.contains(&c))
            }
            Slot::Digit => c.is_ascii_digit(),
            Slot::Literal(_) => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// One country's plate layout as loaded from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlateFormat {
    pub code: String,
    pub name: String,
    pub name_alt: Option<String>,
    pub pattern: String,
    pub allowed_letters: String,
    pub coordinate: Coordinate,
    pub flag_glyph: Option<String>,
    #[serde(skip)]
    slots: Vec<Slot>,
    #[serde(skip)]
    allowed: Vec<char>,
}

impl PlateFormat {
    /// Builds a format, normalizing case and rejecting codes that are not 2 characters.
    pub fn new(
        code: &str,
        name: &str,
        pattern: &str,
        allowed_letters: &str,
        coordinate: Coordinate,
    ) -> Result<Self, PlateError> {
        let code = code.trim().to_uppercase();
        if code.chars().count() != 2 {
            return Err(PlateError::InvalidCode(code));
        }

        let pattern = pattern.to_uppercase();
        let mut allowed: Vec<char> = Vec::new();
        for c in allowed_letters.trim().to_uppercase().chars() {
            if !allowed.contains(&c) {
                allowed.push(c);
            }
        }

        Ok(Self {
            slots: pattern.chars().map(Slot::from_template).collect(),
            allowed_letters: allowed.iter().collect(),
            flag_glyph: Some(flag_glyph(&code)),
            code,
            name: name.trim().to_string(),
            name_alt: None,
            pattern,
            coordinate,
            allowed,
        })
    }

    pub fn with_name_alt(mut self, name_alt: impl Into<String>) -> Self {
        let name_alt = name_alt.into();
        self.name_alt = if name_alt.trim().is_empty() {
            None
        } else {
            Some(name_alt.trim().to_string())
        };
        self
    }

    pub fn with_flag_glyph(mut self, glyph: impl Into<String>) -> Self {
        self.flag_glyph = Some(glyph.into());
        self
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Allowed letters as a slice; empty means any of A-Z.
    pub fn allowed(&self) -> &[char] {
        &self.allowed
    }

    /// Count of every plate this pattern can produce.
    pub fn total_space(&self) -> u128 {
        self.slots
            .iter()
            .fold(1u128, |acc, s| acc.saturating_mul(s.options(&self.allowed)))
    }
}

/// Regional indicator pair for a two-letter code, or a white flag otherwise.
pub fn flag_glyph(code: &str) -> String {
    let upper = code.to_uppercase();
    if upper.chars().count() != 2 || !upper.chars().all(|c| c.is_ascii_uppercase()) {
        return "\u{1F3F3}\u{FE0F}".to_string();
    }
    upper
        .chars()
        .filter_map(|c| char::from_u32(c as u32 + 0x1F1A5))
        .collect()
}
