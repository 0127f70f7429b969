// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::plate::PlateFormat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Label language. `Ru` uses the catalog's primary names, `En` the alternate ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ru,
    En,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Ru => "ru",
            Language::En => "en",
        }
    }
}

impl FromStr for Language {
    type Err = std::convert::Infallible;

    /// Anything other than "en" falls back to the primary language.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("en") {
            Ok(Language::En)
        } else {
            Ok(Language::Ru)
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Picks the label shown for a country.
pub trait NameResolver: Send + Sync {
    fn display_name<'a>(&self, language: Language, format: &'a PlateFormat) -> &'a str;
}

/// Alternate label for `En` when the catalog has one, primary label otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct AltNameResolver;

impl NameResolver for AltNameResolver {
    fn display_name<'a>(&self, language: Language, format: &'a PlateFormat) -> &'a str {
        match (language, format.name_alt.as_deref()) {
            (Language::En, Some(alt)) => alt,
            _ => &format.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plate::Coordinate;

    #[test]
    fn test_parse_language() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::En);
        assert_eq!("EN".parse::<Language>().unwrap(), Language::En);
        assert_eq!("ru".parse::<Language>().unwrap(), Language::Ru);
        assert_eq!("de".parse::<Language>().unwrap(), Language::Ru);
    }

    #[test]
    fn test_alt_name_resolution() {
        let ru = PlateFormat::new("RU", "Россия", "A 000 AA", "", Coordinate::new(0.0, 0.0))
            .unwrap()
            .with_name_alt("Russia");
        let bare = PlateFormat::new("XX", "Nowhere", "000", "", Coordinate::new(0.0, 0.0)).unwrap();

        let resolver = AltNameResolver;
        assert_eq!(resolver.display_name(Language::En, &ru), "Russia");
        assert_eq!(resolver.display_name(Language::Ru, &ru), "Россия");
        assert_eq!(resolver.display_name(Language::En, &bare), "Nowhere");
    }
}
