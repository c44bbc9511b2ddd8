//! Built-in catalog used when no data resource is available

use exo_common::{ExoplanetRecord, Habitable, PlanetType};

struct FallbackEntry {
    name: &'static str,
    planet_type: PlanetType,
    distance: &'static str,
    year: &'static str,
    mass: &'static str,
    radius: &'static str,
    temperature: &'static str,
    habitable: Habitable,
    description: &'static str,
}

const FALLBACK_ENTRIES: [FallbackEntry; 8] = [
    FallbackEntry {
        name: "Kepler-452b",
        planet_type: PlanetType::SuperEarth,
        distance: "1400 ly",
        year: "2015",
        mass: "5.0 M⊕",
        radius: "1.6 R⊕",
        temperature: "265 K",
        habitable: Habitable::Yes,
        description: "Kepler-452b is an exoplanet orbiting the Sun-like star Kepler-452 about 1,400 light-years from Earth in the constellation Cygnus.",
    },
    FallbackEntry {
        name: "Proxima Centauri b",
        planet_type: PlanetType::Terrestrial,
        distance: "4.2 ly",
        year: "2016",
        mass: "1.3 M⊕",
        radius: "1.1 R⊕",
        temperature: "234 K",
        habitable: Habitable::Yes,
        description: "Proxima Centauri b is an exoplanet orbiting within the habitable zone of the red dwarf star Proxima Centauri.",
    },
    FallbackEntry {
        name: "TRAPPIST-1e",
        planet_type: PlanetType::Terrestrial,
        distance: "40 ly",
        year: "2017",
        mass: "0.6 M⊕",
        radius: "0.9 R⊕",
        temperature: "251 K",
        habitable: Habitable::Yes,
        description: "TRAPPIST-1e is one of seven Earth-sized exoplanets orbiting the ultracool dwarf star TRAPPIST-1.",
    },
    FallbackEntry {
        name: "GJ 357 d",
        planet_type: PlanetType::SuperEarth,
        distance: "31 ly",
        year: "2019",
        mass: "6.1 M⊕",
        radius: "2.0 R⊕",
        temperature: "219 K",
        habitable: Habitable::Yes,
        description: "GJ 357 d is a super-Earth exoplanet that orbits within the habitable zone of its star.",
    },
    FallbackEntry {
        name: "TOI-700 d",
        planet_type: PlanetType::Terrestrial,
        distance: "100 ly",
        year: "2020",
        mass: "1.7 M⊕",
        radius: "1.2 R⊕",
        temperature: "268 K",
        habitable: Habitable::Yes,
        description: "TOI-700 d is an exoplanet, likely rocky, orbiting within the habitable zone of the red dwarf TOI-700.",
    },
    FallbackEntry {
        name: "HD 209458 b",
        planet_type: PlanetType::HotJupiter,
        distance: "150 ly",
        year: "1999",
        mass: "0.7 MJ",
        radius: "1.4 RJ",
        temperature: "1130 K",
        habitable: Habitable::No,
        description: "HD 209458 b is an exoplanet that orbits the solar analog HD 209458 in the constellation Pegasus.",
    },
    FallbackEntry {
        name: "51 Pegasi b",
        planet_type: PlanetType::HotJupiter,
        distance: "50 ly",
        year: "1995",
        mass: "0.5 MJ",
        radius: "1.2 RJ",
        temperature: "1200 K",
        habitable: Habitable::No,
        description: "51 Pegasi b was the first exoplanet discovered orbiting a main-sequence star.",
    },
    FallbackEntry {
        name: "HD 189733 b",
        planet_type: PlanetType::HotJupiter,
        distance: "63 ly",
        year: "2005",
        mass: "1.1 MJ",
        radius: "1.1 RJ",
        temperature: "1200 K",
        habitable: Habitable::No,
        description: "HD 189733 b is an exoplanet approximately 64.5 light-years away from the Solar System.",
    },
];

/// Number of records in the built-in catalog
pub const FALLBACK_LEN: usize = FALLBACK_ENTRIES.len();

impl FallbackEntry {
    fn to_record(&self) -> ExoplanetRecord {
        let mut record =
            ExoplanetRecord::new(self.name, self.planet_type, self.habitable, self.description);
        record.distance = Some(self.distance.to_string());
        record.year = Some(self.year.to_string());
        record.mass = Some(self.mass.to_string());
        record.radius = Some(self.radius.to_string());
        record.temperature = Some(self.temperature.to_string());
        record
    }
}

/// The eight well-known planets shown when nothing else loads.
/// Same values in the same order on every call.
pub fn fallback_catalog() -> Vec<ExoplanetRecord> {
    FALLBACK_ENTRIES.iter().map(FallbackEntry::to_record).collect()
}
