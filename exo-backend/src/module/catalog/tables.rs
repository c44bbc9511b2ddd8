//! Fixed lookup tables for scraped-text extraction

use exo_common::PlanetType;

/// Planet names searched for in scraped paragraphs, in output order
pub const PLANET_KEYWORDS: [&str; 12] = [
    "Kepler-452b",
    "Proxima Centauri b",
    "TRAPPIST-1e",
    "GJ 357 d",
    "TOI-700 d",
    "HD 209458 b",
    "51 Pegasi b",
    "HD 189733 b",
    "Kepler-22b",
    "Gliese 581 g",
    "Wolf 1061c",
    "Ross 128 b",
];

/// Planets shown as habitable on the extractor and fallback paths
pub const HABITABLE_PLANETS: [&str; 5] = [
    "Kepler-452b",
    "Proxima Centauri b",
    "TRAPPIST-1e",
    "GJ 357 d",
    "TOI-700 d",
];

/// Lowercase needle → classification, checked in order; first hit wins
pub const TYPE_RULES: [(&str, PlanetType); 4] = [
    ("super earth", PlanetType::SuperEarth),
    ("terrestrial", PlanetType::Terrestrial),
    ("hot jupiter", PlanetType::HotJupiter),
    ("gas giant", PlanetType::GasGiant),
];

/// Exact, case-sensitive membership in [`HABITABLE_PLANETS`]
pub fn is_habitable(name: &str) -> bool {
    HABITABLE_PLANETS.contains(&name)
}
