// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use signluck_core::route::haversine_km;
use signluck_core::{
    Catalog, Coordinate, CsvCatalog, Language, MatchResult, PlateFormat, PlateService,
    SignluckError,
};
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;

const HEADER: &str = "country_code,country_name,country_name_en,pattern,allowed_letters,lat,lng\n";

fn country(code: &str, name: &str, pattern: &str, lat: f64, lng: f64) -> PlateFormat {
    PlateFormat::new(code, name, pattern, "", Coordinate::new(lat, lng)).unwrap()
}

fn service(formats: Vec<PlateFormat>) -> PlateService {
    PlateService::new(Arc::new(Catalog::from_formats(formats)))
}

#[test]
fn test_smaller_space_ranks_first() {
    // Same layout, but one country only issues two letters
    let small = PlateFormat::new("SS", "Smalland", "AA", "QZ", Coordinate::new(0.0, 0.0)).unwrap();
    let svc = service(vec![country("BB", "Bigland", "AA", 0.0, 0.0), small]);
    let results = svc.rank("QQ", Language::Ru).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].country_name, "Smalland");
    assert!(results[0].probability > results[1].probability);
}

fn strip(results: Vec<MatchResult>) -> Vec<(String, f64, String)> {
    results
        .into_iter()
        .map(|r| {
            let shown: String = r.symbols.iter().map(|s| s.value).collect();
            (r.country_code, r.probability, shown)
        })
        .collect()
}

#[test]
fn test_rank_is_idempotent() {
    let svc = PlateService::new(Arc::new(Catalog::builtin()));
    let first = strip(svc.rank("A77", Language::En).unwrap());
    let second = strip(svc.rank("A77", Language::En).unwrap());
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_rank_ignores_query_case() {
    let ru = PlateFormat::new(
        "RU",
        "Россия",
        "A 000 AA",
        "ABEKMHOPCTYX",
        Coordinate::new(55.75, 37.61),
    )
    .unwrap();
    let svc = service(vec![ru, country("KZ", "Казахстан", "000 AAA 00", 51.17, 71.45)]);

    let upper = strip(svc.rank("A777", Language::Ru).unwrap());
    let lower = strip(svc.rank("a777", Language::Ru).unwrap());
    assert!(upper.iter().any(|(code, _, _)| code == "RU"));
    assert_eq!(lower, upper);
    assert_eq!(svc.suggest("boss"), svc.suggest("BOSS"));
}

#[test]
fn test_route_visits_nearest_first() {
    let svc = service(vec![
        country("FF", "Far", "0", 10.0, 10.0),
        country("NN", "Near", "0", 1.0, 1.0),
        country("MM", "Mid", "0", 5.0, 5.0),
    ]);
    let origin = Coordinate::new(0.0, 0.0);
    let segments = svc.build_route("7", Language::En, Some(origin)).unwrap();

    let names: Vec<&str> = segments.iter().map(|s| s.country_name.as_str()).collect();
    assert_eq!(names, vec!["Near", "Mid", "Far"]);

    // Each step picks the closest remaining stop
    let mut current = origin;
    for (i, seg) in segments.iter().enumerate() {
        let d = haversine_km(current, seg.coordinate);
        for later in &segments[i + 1..] {
            assert!(d < haversine_km(current, later.coordinate));
        }
        current = seg.coordinate;
    }

    assert!(segments[0].booking_url.contains("google.com/travel/flights"));
    assert!(segments[0].booking_url.contains("flights+to+Near"));
    assert!(segments[1].booking_url.contains("flights+from+Near+to+Mid"));
    assert!(segments[2].booking_url.contains("flights+from+Mid+to+Far"));
    assert!(segments.iter().all(|s| s.booking_url.ends_with("&hl=en")));
}

#[test]
fn test_route_without_origin_uses_ranking() {
    let svc = service(vec![
        country("LO", "Low", "0", 0.0, 0.0),
        country("HI", "High", "000", 50.0, 50.0),
    ]);
    let segments = svc.build_route("1", Language::Ru, None).unwrap();
    assert_eq!(segments[0].country_code, "HI");
    assert_eq!(segments[1].country_code, "LO");
    assert!(segments[0].booking_url.ends_with("&hl=ru"));
}

#[test]
fn test_catalog_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("countries.csv");
    fs::write(
        &path,
        format!(
            "{}ru,Россия,Russia,A 000 AA,ABEKMHOPCTYX,55.75,37.61\nfi,Финляндия,Finland,AAA-000,,60.17,24.94\n",
            HEADER
        ),
    )
    .unwrap();

    let svc = PlateService::new(Arc::new(Catalog::new(CsvCatalog::from_path(&path))));
    assert_eq!(svc.countries().unwrap().len(), 2);

    let results = svc.rank("K777", Language::En).unwrap();
    let codes: Vec<&str> = results.iter().map(|r| r.country_code.as_str()).collect();
    assert!(codes.contains(&"RU"));
    assert!(codes.contains(&"FI"));
    assert!(results.iter().any(|r| r.country_name == "Finland"));
}

#[test]
fn test_missing_catalog_is_unavailable() {
    let dir = tempdir().unwrap();
    let svc = PlateService::new(Arc::new(Catalog::new(CsvCatalog::from_path(
        dir.path().join("missing.csv"),
    ))));

    assert!(matches!(
        svc.rank("777", Language::Ru),
        Err(SignluckError::CatalogUnavailable(_))
    ));
    assert!(svc.build_route("777", Language::Ru, None).is_err());
}

#[test]
fn test_malformed_catalog_is_unavailable() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("countries.csv");
    fs::write(
        &path,
        format!("{}RU,Россия,Russia,A 000 AA,,55.75,37.61\nRUS,Bad,Bad,000,,1,1\n", HEADER),
    )
    .unwrap();

    let svc = PlateService::new(Arc::new(Catalog::new(CsvCatalog::from_path(&path))));
    let err = svc.rank("777", Language::Ru).unwrap_err();
    assert!(err.to_string().contains("row 2"), "unexpected error: {}", err);
    assert!(!svc.catalog().is_loaded());
}

#[test]
fn test_suggestions_through_service() {
    let svc = service(vec![country("AA", "A", "0", 0.0, 0.0)]);
    let s = svc.suggest("BOSS");
    assert!(s.contains(&"B0SS".to_string()));
    assert!(s.contains(&"80SS".to_string()));
    assert!(!s.contains(&"BOSS".to_string()));
    assert!(s.len() <= 5);
}
