// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! License plate luck: how likely a combination is to show up on each country's
//! plates, and a trip through the luckiest ones.

pub mod calculator;
pub mod catalog;
pub mod engine;
pub mod language;
pub mod matcher;
pub mod plate;
pub mod route;
pub mod settings;
pub mod suggest;

pub use calculator::{ExamplePlate, ExampleSymbol, MatchResult, PlateCalculator, VisualSymbol};
pub use catalog::{Catalog, CatalogError, CatalogSource, CsvCatalog};
pub use engine::{CheckReport, PlateService};
pub use language::{AltNameResolver, Language, NameResolver};
pub use plate::{Coordinate, PlateError, PlateFormat, Slot};
pub use route::TripSegment;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SignluckError {
    #[error("Country catalog unavailable: {0}")]
    CatalogUnavailable(#[from] CatalogError),
}
