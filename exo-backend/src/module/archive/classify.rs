//! Derived attributes for archive rows

use exo_common::{Habitable, PlanetType};

use super::types::{ArchiveRow, or_zero};

/// Size class from radius (Earth radii), else from mass (Jupiter masses)
pub fn classify_planet_type(radius_earth: f64, mass_jupiter: f64) -> PlanetType {
    if radius_earth > 0.0 {
        if radius_earth < 0.8 {
            PlanetType::SubEarth
        } else if radius_earth < 1.25 {
            PlanetType::Terrestrial
        } else if radius_earth < 2.0 {
            PlanetType::SuperEarth
        } else if radius_earth < 6.0 {
            PlanetType::MiniNeptune
        } else {
            PlanetType::GasGiant
        }
    } else if mass_jupiter > 0.0 {
        if mass_jupiter < 0.1 {
            PlanetType::SuperEarth
        } else if mass_jupiter < 0.5 {
            PlanetType::NeptuneLike
        } else {
            PlanetType::JupiterLike
        }
    } else {
        PlanetType::Unknown
    }
}

/// Rough habitable-zone test: Earth-like insolation and a rocky size
pub fn assess_habitability(insolation: f64, radius_earth: f64) -> Habitable {
    let temperate = insolation > 0.0 && (0.3..=1.7).contains(&insolation);
    let rocky = radius_earth > 0.0 && (0.5..=2.0).contains(&radius_earth);
    Habitable::from_bool(temperate && rocky)
}

/// Methods implied by which columns are populated
pub fn discovery_method(row: &ArchiveRow) -> String {
    let mut methods = Vec::new();
    if or_zero(row.pl_trandep) > 0.0 {
        methods.push("Transit");
    }
    if or_zero(row.pl_orbvel) > 0.0 {
        methods.push("Radial Velocity");
    }
    if or_zero(row.pl_imppar) > 0.0 {
        methods.push("Microlensing");
    }

    if methods.is_empty() {
        exo_common::UNKNOWN.to_string()
    } else {
        methods.join(", ")
    }
}

pub fn describe(
    name: &str,
    planet_type: PlanetType,
    habitable: Habitable,
    radius_earth: f64,
    mass_earth: f64,
) -> String {
    let mut parts = vec![format!(
        "{} is a {} exoplanet",
        name,
        planet_type.as_str().to_lowercase()
    )];

    if radius_earth > 0.0 {
        parts.push(format!("with a radius of {:.2} Earth radii", radius_earth));
    }
    if mass_earth > 0.0 {
        parts.push(format!("and a mass of {:.2} Earth masses", mass_earth));
    }
    parts.push(match habitable {
        Habitable::Yes => "located within the habitable zone of its star".to_string(),
        Habitable::No => "located outside the habitable zone".to_string(),
    });

    parts.join(". ") + "."
}
