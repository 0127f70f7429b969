// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::plate::{Coordinate, PlateFormat};
use log::{debug, error, info};
use serde::Deserialize;
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

const BUILTIN_COUNTRIES: &str = include_str!("../data/countries.csv");

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog source not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Malformed catalog row {row}: {reason}")]
    Malformed { row: usize, reason: String },
    #[error("Catalog contains no countries")]
    Empty,
}

/// Anything that can produce the full list of plate formats.
pub trait CatalogSource: fmt::Debug + Send + Sync {
    fn load_all(&self) -> Result<Vec<PlateFormat>, CatalogError>;
}

#[derive(Debug, Deserialize)]
struct CountryRow {
    country_code: String,
    country_name: String,
    #[serde(default)]
    country_name_en: Option<String>,
    pattern: String,
    #[serde(default)]
    allowed_letters: Option<String>,
    lat: f64,
    lng: f64,
    #[serde(default)]
    flag_emoji: Option<String>,
}

impl CountryRow {
    fn into_format(self, row: usize) -> Result<PlateFormat, CatalogError> {
        if self.pattern.is_empty() {
            return Err(CatalogError::Malformed {
                row,
                reason: "empty pattern".to_string(),
            });
        }

        let mut format = PlateFormat::new(
            &self.country_code,
            &self.country_name,
            &self.pattern,
            self.allowed_letters.as_deref().unwrap_or(""),
            Coordinate::new(self.lat, self.lng),
        )
        .map_err(|e| CatalogError::Malformed {
            row,
            reason: e.to_string(),
        })?;

        if let Some(alt) = self.country_name_en {
            format = format.with_name_alt(alt);
        }
        if let Some(flag) = self.flag_emoji.filter(|f| !f.trim().is_empty()) {
            format = format.with_flag_glyph(flag);
        }
        Ok(format)
    }
}

enum CsvOrigin {
    File(PathBuf),
    Builtin,
}

/// Country rows in CSV, either from disk or the data set shipped with the crate.
pub struct CsvCatalog {
    origin: CsvOrigin,
}

impl CsvCatalog {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            origin: CsvOrigin::File(path.as_ref().to_path_buf()),
        }
    }

    pub fn builtin() -> Self {
        Self {
            origin: CsvOrigin::Builtin,
        }
    }

    /// Parses catalog rows from any reader. Row numbers in errors are 1-based data rows.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<PlateFormat>, CatalogError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let mut formats = Vec::new();
        for (i, record) in rdr.deserialize::<CountryRow>().enumerate() {
            let row = i + 1;
            let record = record.map_err(|e| {
                if e.is_io_error() {
                    CatalogError::Csv(e)
                } else {
                    CatalogError::Malformed {
                        row,
                        reason: e.to_string(),
                    }
                }
            })?;
            formats.push(record.into_format(row)?);
        }

        if formats.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(formats)
    }
}

impl CatalogSource for CsvCatalog {
    fn load_all(&self) -> Result<Vec<PlateFormat>, CatalogError> {
        match &self.origin {
            CsvOrigin::Builtin => Self::parse(BUILTIN_COUNTRIES.as_bytes()),
            CsvOrigin::File(path) => {
                if !path.exists() {
                    error!("Catalog source not found: path={}", path.display());
                    return Err(CatalogError::NotFound(path.clone()));
                }
                let file = std::fs::File::open(path)?;
                Self::parse(file).inspect_err(|e| {
                    error!("Failed to read catalog: path={} error={}", path.display(), e)
                })
            }
        }
    }
}

impl fmt::Debug for CsvCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.origin {
            CsvOrigin::File(path) => write!(f, "CsvCatalog({})", path.display()),
            CsvOrigin::Builtin => f.write_str("CsvCatalog(builtin)"),
        }
    }
}

/// Formats loaded once from a source and kept for the lifetime of the catalog.
///
/// Loading happens on first access. A failed load is returned to the caller and
/// retried on the next access; partial data is never cached.
pub struct Catalog {
    source: Box<dyn CatalogSource>,
    formats: OnceLock<Vec<PlateFormat>>,
}

impl Catalog {
    pub fn new(source: impl CatalogSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            formats: OnceLock::new(),
        }
    }

    /// Catalog backed by the built-in country list.
    pub fn builtin() -> Self {
        Self::new(CsvCatalog::builtin())
    }

    /// Already-loaded formats, e.g. for tests or callers with their own storage.
    pub fn from_formats(formats: Vec<PlateFormat>) -> Self {
        let catalog = Self::new(StaticSource);
        let _ = catalog.formats.set(formats);
        catalog
    }

    pub fn formats(&self) -> Result<&[PlateFormat], CatalogError> {
        if let Some(formats) = self.formats.get() {
            return Ok(formats);
        }

        debug!("Loading country catalog from {:?}", self.source);
        let loaded = self.source.load_all()?;
        info!("Country catalog loaded: countries={}", loaded.len());
        Ok(self.formats.get_or_init(|| loaded))
    }

    pub fn get(&self, code: &str) -> Result<Option<&PlateFormat>, CatalogError> {
        let code = code.trim().to_uppercase();
        Ok(self.formats()?.iter().find(|f| f.code == code))
    }

    pub fn is_loaded(&self) -> bool {
        self.formats.get().is_some()
    }
}

#[derive(Debug)]
struct StaticSource;

impl CatalogSource for StaticSource {
    fn load_all(&self) -> Result<Vec<PlateFormat>, CatalogError> {
        Err(CatalogError::Empty)
    }
}
