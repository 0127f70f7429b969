// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::calculator::{MatchResult, PlateCalculator};
use crate::catalog::Catalog;
use crate::language::{AltNameResolver, Language, NameResolver};
use crate::plate::{Coordinate, PlateFormat};
use crate::route::{self, TripSegment, DEFAULT_ROUTE_SIZE};
use crate::settings::Settings;
use crate::suggest::suggest;
use crate::SignluckError;
use rand::Rng;
use serde::Serialize;
use std::cmp::Ordering;
use std::sync::Arc;

/// Answer to a "check" request: ranked results plus summary figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckReport {
    pub results: Vec<MatchResult>,
    pub total_results: usize,
    pub max_probability: f64,
    pub suggestions: Vec<String>,
}

impl CheckReport {
    pub fn new(results: Vec<MatchResult>, suggestions: Vec<String>) -> Self {
        let max_probability = results
            .iter()
            .map(|r| r.probability)
            .fold(0.0, f64::max);
        Self {
            total_results: results.len(),
            max_probability,
            results,
            suggestions,
        }
    }
}

/// Runs plate evaluation over the whole catalog.
pub struct PlateService {
    catalog: Arc<Catalog>,
    calculator: PlateCalculator,
    resolver: Box<dyn NameResolver>,
    route_size: usize,
}

impl PlateService {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            calculator: PlateCalculator::default(),
            resolver: Box::new(AltNameResolver),
            route_size: DEFAULT_ROUTE_SIZE,
        }
    }

    pub fn with_settings(catalog: Arc<Catalog>, settings: &Settings) -> Self {
        Self {
            calculator: settings.calculator(),
            route_size: settings.route_size,
            ..Self::new(catalog)
        }
    }

    pub fn with_resolver(mut self, resolver: impl NameResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn countries(&self) -> Result<&[PlateFormat], SignluckError> {
        Ok(self.catalog.formats()?)
    }

    /// Countries whose plates can contain `query`, most likely first.
    pub fn rank(&self, query: &str, language: Language) -> Result<Vec<MatchResult>, SignluckError> {
        self.rank_with_rng(query, language, &mut rand::thread_rng())
    }

    pub fn rank_with_rng<R: Rng + ?Sized>(
        &self,
        query: &str,
        language: Language,
        rng: &mut R,
    ) -> Result<Vec<MatchResult>, SignluckError> {
        let formats = self.catalog.formats()?;

        let mut results: Vec<MatchResult> = formats
            .iter()
            .filter_map(|format| {
                let mut result = self.calculator.evaluate(query, format, rng)?;
                if result.probability <= 0.0 {
                    return None;
                }
                result.country_name = self.resolver.display_name(language, format).to_string();
                Some(result)
            })
            .collect();

        results.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.country_name.cmp(&b.country_name))
        });

        log::debug!(
            "Calculated {} valid results for query '{}': countries={}",
            results.len(),
            query,
            formats.len()
        );
        Ok(results)
    }

    pub fn check(&self, query: &str, language: Language) -> Result<CheckReport, SignluckError> {
        let results = self.rank(query, language)?;
        Ok(CheckReport::new(results, suggest(query)))
    }

    pub fn suggest(&self, query: &str) -> Vec<String> {
        suggest(query)
    }

    /// Ranks `query` and turns the best countries into a trip.
    pub fn build_route(
        &self,
        query: &str,
        language: Language,
        origin: Option<Coordinate>,
    ) -> Result<Vec<TripSegment>, SignluckError> {
        let ranked = self.rank(query, language)?;
        Ok(route::build_route(&ranked, origin, language, self.route_size))
    }
}
