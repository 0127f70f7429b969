// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use signluck_core::calculator::render;
use signluck_core::settings::Settings;
use signluck_core::{
    AltNameResolver, Catalog, Coordinate, CsvCatalog, Language, NameResolver, PlateService,
};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const MAX_QUERY_LEN: usize = 10;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, env = "SIGNLUCK_CONFIG")]
    config: Option<PathBuf>,

    /// Country catalog CSV to use instead of the built-in one
    #[arg(long, env = "SIGNLUCK_CATALOG")]
    catalog: Option<PathBuf>,

    /// Label language: ru or en
    #[arg(short, long, env = "SIGNLUCK_LANG")]
    lang: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probability of a combination appearing on each country's plates
    Check { query: String },
    /// Look-alike spellings of a combination
    Suggest { query: String },
    /// Trip through the luckiest countries
    Route {
        query: String,
        /// Your latitude
        #[arg(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Your longitude
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<f64>,
    },
    /// List supported countries
    Countries,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let config = ConfigBuilder::new().set_time_level(LevelFilter::Off).build();
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

/// Trims and uppercases a query, rejecting empty or overlong input.
fn normalize_query(raw: &str) -> Result<String> {
    let query = raw.trim().to_uppercase();
    let len = query.chars().count();
    if len == 0 || len > MAX_QUERY_LEN {
        bail!(
            "Query must be 1 to {} characters long, got {}",
            MAX_QUERY_LEN,
            len
        );
    }
    Ok(query)
}

/// Catalog from the given CSV, or the built-in one.
fn open_catalog(path: Option<&Path>) -> Catalog {
    match path {
        Some(path) => {
            log::info!("Using country catalog: path={}", path.display());
            Catalog::new(CsvCatalog::from_path(path))
        }
        None => {
            log::info!("Using built-in country catalog");
            Catalog::builtin()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.clone().unwrap_or_else(Settings::default_path);
    let settings = Settings::load(&config_path)?;
    log::debug!("Settings resolved: path={} {:?}", config_path.display(), settings);

    let language = cli
        .lang
        .as_deref()
        .map(|l| l.parse::<Language>().unwrap_or_default())
        .unwrap_or(settings.language);

    let catalog = open_catalog(cli.catalog.as_deref().or(settings.catalog_path.as_deref()));
    let service = PlateService::with_settings(Arc::new(catalog), &settings);

    match &cli.command {
        Commands::Check { query } => {
            let query = normalize_query(query)?;
            let report = service.check(&query, language)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            println!(
                "{} countries, best chance {:.4}%",
                report.total_results, report.max_probability
            );
            for r in &report.results {
                let shown: String = r.symbols.iter().map(|s| s.value).collect();
                let examples: Vec<String> = r.examples.iter().map(|e| render(e)).collect();
                println!(
                    "{} {} [{}] {:>10.4}%  {}  e.g. {}",
                    r.flag_glyph.as_deref().unwrap_or(" "),
                    r.country_code,
                    r.country_name,
                    r.probability,
                    shown,
                    examples.join(", ")
                );
            }
            if !report.suggestions.is_empty() {
                println!("Also try: {}", report.suggestions.join(", "));
            }
        }
        Commands::Suggest { query } => {
            let query = normalize_query(query)?;
            let suggestions = service.suggest(&query);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&suggestions)?);
            } else if suggestions.is_empty() {
                println!("No look-alike spellings for '{}'", query);
            } else {
                for s in suggestions {
                    println!("{}", s);
                }
            }
        }
        Commands::Route { query, lat, lng } => {
            let query = normalize_query(query)?;
            let origin = match (lat, lng) {
                (Some(lat), Some(lng)) => Some(Coordinate::new(*lat, *lng)),
                _ => None,
            };
            let segments = service.build_route(&query, language, origin)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&segments)?);
                return Ok(());
            }

            if segments.is_empty() {
                println!("No country issues plates that can contain '{}'", query);
            }
            for (i, seg) in segments.iter().enumerate() {
                println!(
                    "{}. {} ({}) {:.4}%\n   {}",
                    i + 1,
                    seg.country_name,
                    seg.country_code,
                    seg.probability,
                    seg.booking_url
                );
            }
        }
        Commands::Countries => {
            let countries = service.countries()?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(countries)?);
                return Ok(());
            }
            for c in countries {
                let name = AltNameResolver.display_name(language, c);
                println!("{} {}  {:<12} {}", c.code, name, c.pattern, c.allowed_letters);
            }
        }
    }

    Ok(())
}
