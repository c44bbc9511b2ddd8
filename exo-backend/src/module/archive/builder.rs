use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use exo_common::{CatalogDocument, CatalogMetadata, ExoplanetRecord, Habitable, PlanetType};
use std::collections::HashSet;
use std::path::Path;
use tokio::fs;
use tracing::info;

use super::classify::{assess_habitability, classify_planet_type, describe, discovery_method};
use super::types::{ArchiveRow, or_zero};

const CATALOG_VERSION: &str = "1.0";
const ARCHIVE_SOURCE: &str = "NASA Exoplanet Archive";
const SEEDED_SOURCE: &str = "NASA Exoplanet Archive + Additional Sources";
const CATALOG_DESCRIPTION: &str = "Comprehensive exoplanet database for collaborative AI research";

/// Convert one archive row; `None` when the row has no usable name
pub fn record_from_row(row: &ArchiveRow) -> Option<ExoplanetRecord> {
    let name = row.name()?;

    let radius_earth = or_zero(row.pl_rade);
    let mass_earth = or_zero(row.pl_bmasse);
    let planet_type = classify_planet_type(radius_earth, or_zero(row.pl_massj));
    let habitable = assess_habitability(or_zero(row.pl_insol), radius_earth);

    let mut record = ExoplanetRecord::new(
        name,
        planet_type,
        habitable,
        describe(name, planet_type, habitable, radius_earth, mass_earth),
    );
    record.host_star = Some(
        row.hostname
            .clone()
            .unwrap_or_else(|| exo_common::UNKNOWN.to_string()),
    );
    record.radius_earth = row.pl_rade;
    record.mass_earth = row.pl_bmasse;
    record.mass_jupiter = row.pl_massj;
    record.radius_jupiter = row.pl_radj;
    record.orbital_period_days = row.pl_orbper;
    record.semi_major_axis_au = row.pl_a;
    record.equilibrium_temp_k = row.pl_eqt;
    record.insolation_earth = row.pl_insol;
    record.eccentricity = row.pl_orbeccen;
    record.inclination_deg = row.pl_orbincl;
    record.density_g_cm3 = row.pl_dens;
    record.surface_gravity_ms2 = row.pl_logg;
    record.transit_depth_ppm = row.pl_trandep;
    record.transit_duration_hours = row.pl_trandur;
    record.discovery_method = Some(discovery_method(row));
    Some(record)
}

struct SeedPlanet {
    name: &'static str,
    host_star: &'static str,
    planet_type: PlanetType,
    radius_earth: f64,
    mass_earth: f64,
    orbital_period_days: f64,
    semi_major_axis_au: f64,
    equilibrium_temp_k: f64,
    insolation_earth: f64,
    discovery_method: &'static str,
    description: &'static str,
}

const SEED_PLANETS: [SeedPlanet; 5] = [
    SeedPlanet {
        name: "Kepler-452b",
        host_star: "Kepler-452",
        planet_type: PlanetType::SuperEarth,
        radius_earth: 1.6,
        mass_earth: 5.0,
        orbital_period_days: 384.8,
        semi_major_axis_au: 1.046,
        equilibrium_temp_k: 265.0,
        insolation_earth: 1.11,
        discovery_method: "Transit",
        description: "Kepler-452b is a super-Earth exoplanet orbiting within the habitable zone of the Sun-like star Kepler-452, about 1,400 light-years from Earth.",
    },
    SeedPlanet {
        name: "Proxima Centauri b",
        host_star: "Proxima Centauri",
        planet_type: PlanetType::Terrestrial,
        radius_earth: 1.1,
        mass_earth: 1.3,
        orbital_period_days: 11.2,
        semi_major_axis_au: 0.0485,
        equilibrium_temp_k: 234.0,
        insolation_earth: 0.65,
        discovery_method: "Radial Velocity",
        description: "Proxima Centauri b is an exoplanet orbiting within the habitable zone of the red dwarf star Proxima Centauri, the closest star to the Sun.",
    },
    SeedPlanet {
        name: "TRAPPIST-1e",
        host_star: "TRAPPIST-1",
        planet_type: PlanetType::Terrestrial,
        radius_earth: 0.9,
        mass_earth: 0.6,
        orbital_period_days: 6.1,
        semi_major_axis_au: 0.029,
        equilibrium_temp_k: 251.0,
        insolation_earth: 0.65,
        discovery_method: "Transit",
        description: "TRAPPIST-1e is one of seven Earth-sized exoplanets orbiting the ultracool dwarf star TRAPPIST-1, located about 40 light-years away.",
    },
    SeedPlanet {
        name: "GJ 357 d",
        host_star: "GJ 357",
        planet_type: PlanetType::SuperEarth,
        radius_earth: 2.0,
        mass_earth: 6.1,
        orbital_period_days: 55.7,
        semi_major_axis_au: 0.204,
        equilibrium_temp_k: 219.0,
        insolation_earth: 0.38,
        discovery_method: "Transit",
        description: "GJ 357 d is a super-Earth exoplanet that orbits within the habitable zone of its star, located about 31 light-years away.",
    },
    SeedPlanet {
        name: "TOI-700 d",
        host_star: "TOI-700",
        planet_type: PlanetType::Terrestrial,
        radius_earth: 1.2,
        mass_earth: 1.7,
        orbital_period_days: 37.4,
        semi_major_axis_au: 0.163,
        equilibrium_temp_k: 268.0,
        insolation_earth: 0.86,
        discovery_method: "Transit",
        description: "TOI-700 d is an exoplanet, likely rocky, orbiting within the habitable zone of the red dwarf TOI-700, located about 100 light-years away.",
    },
];

/// Curated habitable-zone planets used when the archive returns nothing
pub fn seed_catalog() -> Vec<ExoplanetRecord> {
    SEED_PLANETS
        .iter()
        .map(|seed| {
            let mut record = ExoplanetRecord::new(
                seed.name,
                seed.planet_type,
                Habitable::Yes,
                seed.description,
            );
            record.host_star = Some(seed.host_star.to_string());
            record.radius_earth = Some(seed.radius_earth);
            record.mass_earth = Some(seed.mass_earth);
            record.orbital_period_days = Some(seed.orbital_period_days);
            record.semi_major_axis_au = Some(seed.semi_major_axis_au);
            record.equilibrium_temp_k = Some(seed.equilibrium_temp_k);
            record.insolation_earth = Some(seed.insolation_earth);
            record.discovery_method = Some(seed.discovery_method.to_string());
            record
        })
        .collect()
}

/// Accumulates catalog records, unique by name, first occurrence kept
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    records: Vec<ExoplanetRecord>,
    seen: HashSet<String>,
    seeded: bool,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, record: ExoplanetRecord) -> bool {
        if !self.seen.insert(record.name.clone()) {
            return false;
        }
        self.records.push(record);
        true
    }

    /// Returns how many new records were added
    pub fn add_rows(&mut self, rows: &[ArchiveRow]) -> usize {
        let mut added = 0;
        for record in rows.iter().filter_map(record_from_row) {
            if self.push(record) {
                added += 1;
            }
        }
        added
    }

    /// Add the curated planets when nothing else was collected
    pub fn seed_if_empty(&mut self) {
        if !self.records.is_empty() {
            return;
        }
        for record in seed_catalog() {
            self.push(record);
        }
        self.seeded = true;
        info!("Archive returned no planets, seeded {} curated records", self.records.len());
    }

    pub fn records(&self) -> &[ExoplanetRecord] {
        &self.records
    }

    pub fn into_document(self, scrape_date: DateTime<Utc>) -> CatalogDocument {
        let source = if self.seeded { SEEDED_SOURCE } else { ARCHIVE_SOURCE };
        CatalogDocument {
            metadata: Some(CatalogMetadata {
                total_exoplanets: self.records.len(),
                scrape_date,
                source: source.to_string(),
                version: CATALOG_VERSION.to_string(),
                description: Some(CATALOG_DESCRIPTION.to_string()),
            }),
            exoplanets: self.records,
        }
    }
}

/// Write a catalog document as pretty JSON, creating parent directories
pub async fn save_document(document: &CatalogDocument, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }

    let json = serde_json::to_string_pretty(document).context("Failed to serialize catalog")?;
    fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write catalog to {:?}", path))?;

    info!("Saved {} exoplanets to {:?}", document.exoplanets.len(), path);
    Ok(())
}
