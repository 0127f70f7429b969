// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::calculator::MatchResult;
use crate::language::Language;
use crate::plate::Coordinate;
use serde::Serialize;

const EARTH_RADIUS_KM: f64 = 6371.0;
const FLIGHTS_URL: &str = "https://www.google.com/travel/flights";
pub const DEFAULT_ROUTE_SIZE: usize = 5;

/// One leg of a luck trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripSegment {
    pub country_name: String,
    pub country_code: String,
    pub probability: f64,
    pub booking_url: String,
    pub coordinate: Coordinate,
}

/// Orders the best `route_size` results into an itinerary.
///
/// With an origin the order is a greedy nearest-neighbor tour starting from it; ties
/// go to the earlier (more probable) candidate. Without one, probability order is kept.
pub fn build_route(
    ranked: &[MatchResult],
    origin: Option<Coordinate>,
    language: Language,
    route_size: usize,
) -> Vec<TripSegment> {
    let candidates: Vec<&MatchResult> = ranked.iter().take(route_size).collect();

    let ordered = match origin {
        Some(start) => nearest_neighbor(candidates, start),
        None => candidates,
    };

    let mut segments = Vec::with_capacity(ordered.len());
    let mut prev: Option<&str> = None;
    for result in ordered {
        segments.push(TripSegment {
            country_name: result.country_name.clone(),
            country_code: result.country_code.clone(),
            probability: result.probability,
            booking_url: booking_url(prev, &result.country_name, language),
            coordinate: result.coordinate,
        });
        prev = Some(&result.country_name);
    }

    log::debug!(
        "Built luck route: segments={} optimized={}",
        segments.len(),
        origin.is_some()
    );
    segments
}

fn nearest_neighbor(mut pool: Vec<&MatchResult>, start: Coordinate) -> Vec<&MatchResult> {
    let mut ordered = Vec::with_capacity(pool.len());
    let mut current = start;

    while !pool.is_empty() {
        // min_by keeps the first of equal elements
        let nearest = pool
            .iter()
            .enumerate()
            .map(|(i, r)| (i, haversine_km(current, r.coordinate)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
            .unwrap_or(0);
        let next = pool.remove(nearest);
        current = next.coordinate;
        ordered.push(next);
    }

    ordered
}

/// Great-circle distance in kilometres.
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lon = (to.lng - from.lng).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Flight search deep link. The first leg departs from wherever the user is.
pub fn booking_url(prev: Option<&str>, destination: &str, language: Language) -> String {
    let dest = urlencoding::encode(destination);
    let query = match prev {
        Some(from) => format!("flights+from+{}+to+{}", urlencoding::encode(from), dest),
        None => match language {
            Language::En => format!("flights+to+{}", dest),
            Language::Ru => format!(
                "{}+{}+{}",
                urlencoding::encode("авиабилеты"),
                urlencoding::encode("в"),
                dest
            ),
        },
    };
    format!("{}?q={}&hl={}", FLIGHTS_URL, query, language.code())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, probability: f64, lat: f64, lng: f64) -> MatchResult {
        MatchResult {
            country_name: name.to_string(),
            country_code: name[..2].to_uppercase(),
            coordinate: Coordinate::new(lat, lng),
            probability,
            symbols: vec![],
            allowed_letters: String::new(),
            pattern: "0".to_string(),
            flag_glyph: None,
            examples: vec![],
        }
    }

    #[test]
    fn test_haversine_known_distance() {
        // Moscow to Saint Petersburg is roughly 635 km
        let d = haversine_km(Coordinate::new(55.75, 37.61), Coordinate::new(59.94, 30.31));
        assert!((d - 635.0).abs() < 15.0, "got {}", d);
        assert_eq!(haversine_km(Coordinate::new(1.0, 1.0), Coordinate::new(1.0, 1.0)), 0.0);
    }

    #[test]
    fn test_nearest_neighbor_order() {
        let ranked = vec![
            result("Far", 10.0, 10.0, 10.0),
            result("Near", 10.0, 1.0, 1.0),
            result("Mid", 10.0, 5.0, 5.0),
        ];
        let route = build_route(
            &ranked,
            Some(Coordinate::new(0.0, 0.0)),
            Language::En,
            DEFAULT_ROUTE_SIZE,
        );
        let names: Vec<&str> = route.iter().map(|s| s.country_name.as_str()).collect();
        assert_eq!(names, vec!["Near", "Mid", "Far"]);
    }

    #[test]
    fn test_without_origin_keeps_probability_order() {
        let ranked = vec![
            result("Alpha", 50.0, 10.0, 10.0),
            result("Beta", 40.0, 0.0, 0.0),
        ];
        let route = build_route(&ranked, None, Language::En, DEFAULT_ROUTE_SIZE);
        assert_eq!(route[0].country_name, "Alpha");
        assert_eq!(route[1].country_name, "Beta");
    }

    #[test]
    fn test_pool_is_capped() {
        let ranked: Vec<MatchResult> = (0..8)
            .map(|i| result(&format!("Country{}", i), 80.0 - i as f64, 0.0, i as f64))
            .collect();
        let route = build_route(&ranked, Some(Coordinate::new(0.0, 100.0)), Language::En, 5);
        assert_eq!(route.len(), 5);
        assert!(route.iter().all(|s| s.country_name != "Country7"));
    }

    #[test]
    fn test_ties_follow_pool_order() {
        let ranked = vec![result("First", 50.0, 1.0, 0.0), result("Second", 40.0, -1.0, 0.0)];
        let route = build_route(&ranked, Some(Coordinate::new(0.0, 0.0)), Language::En, 5);
        assert_eq!(route[0].country_name, "First");
    }

    #[test]
    fn test_booking_urls() {
        assert_eq!(
            booking_url(None, "United Kingdom", Language::En),
            "https://www.google.com/travel/flights?q=flights+to+United%20Kingdom&hl=en"
        );
        assert_eq!(
            booking_url(Some("France"), "Spain", Language::En),
            "https://www.google.com/travel/flights?q=flights+from+France+to+Spain&hl=en"
        );
        let ru = booking_url(None, "Spain", Language::Ru);
        assert!(ru.ends_with("+Spain&hl=ru"));
        assert!(!ru.contains("flights+to"));
    }

    #[test]
    fn test_segments_chain_previous_destination() {
        let ranked = vec![result("Alpha", 50.0, 0.0, 0.0), result("Beta", 40.0, 0.0, 1.0)];
        let route = build_route(&ranked, None, Language::En, 5);
        assert!(route[0].booking_url.contains("flights+to+Alpha"));
        assert!(route[1].booking_url.contains("flights+from+Alpha+to+Beta"));
    }
}
