//! Pattern-based extraction of planet records from scraped paragraphs
//!
//! Each attribute is found by an independent scan of the first paragraph
//! that mentions a known planet. Nothing here is cross-checked: a year
//! match can come from an unrelated date, a temperature match from any
//! number followed by a "k".

use exo_common::{ExoplanetRecord, Habitable, PlanetType, ScrapedContent, UNKNOWN};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::tables::{PLANET_KEYWORDS, TYPE_RULES, is_habitable};

/// Characters of the source paragraph kept in a description
pub const DESCRIPTION_LIMIT: usize = 200;
pub const DESCRIPTION_SUFFIX: &str = "...";

/// How unit suffixes are written into the display strings.
///
/// `Historical` always writes "ly", "M⊕", "R⊕" and "K" whatever unit was
/// matched (a parsec distance still reads "ly"). `Matched` writes the unit
/// token found in the text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitLabels {
    #[default]
    Historical,
    Matched,
}

/// A number and the unit token that followed it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitMatch {
    pub value: String,
    pub unit: String,
}

impl UnitMatch {
    fn label(&self, historical: &str, labels: UnitLabels) -> String {
        match labels {
            UnitLabels::Historical => format!("{} {}", self.value, historical),
            UnitLabels::Matched => format!("{} {}", self.value, self.unit),
        }
    }
}

fn label_or_unknown(found: Option<UnitMatch>, historical: &str, labels: UnitLabels) -> String {
    found
        .map(|m| m.label(historical, labels))
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Compiled patterns plus output options
#[derive(Debug, Clone)]
pub struct Extractor {
    distance: Regex,
    year: Regex,
    mass: Regex,
    radius: Regex,
    temperature: Regex,
    labels: UnitLabels,
}

impl Extractor {
    pub fn new(labels: UnitLabels) -> Result<Self, regex::Error> {
        Ok(Self {
            distance: Regex::new(r"(?i)([0-9]+(?:\.[0-9]+)?)\s*(light years?|ly|parsecs?|pc)")?,
            year: Regex::new(r"(19|20)[0-9]{2}")?,
            mass: Regex::new(r"(?i)([0-9]+(?:\.[0-9]+)?)\s*(M⊕|M☉|MJ)")?,
            radius: Regex::new(r"(?i)([0-9]+(?:\.[0-9]+)?)\s*(R⊕|R☉|RJ)")?,
            temperature: Regex::new(r"(?i)([0-9]+(?:\.[0-9]+)?)\s*(K|°C|°F)")?,
            labels,
        })
    }

    /// One record per keyword that appears in some paragraph, in keyword
    /// order. Empty when no keyword matches.
    pub fn extract_records(&self, content: &ScrapedContent) -> Vec<ExoplanetRecord> {
        let lowered: Vec<String> = content.paragraphs.iter().map(|p| p.to_lowercase()).collect();

        let mut records = Vec::new();
        for name in PLANET_KEYWORDS {
            let needle = name.to_lowercase();
            let Some(index) = lowered.iter().position(|p| p.contains(&needle)) else {
                continue;
            };

            debug!("Keyword '{}' matched paragraph {}", name, index);
            records.push(self.build_record(name, &content.paragraphs[index]));
        }

        records
    }

    fn build_record(&self, name: &str, paragraph: &str) -> ExoplanetRecord {
        let mut record = ExoplanetRecord::new(
            name,
            classify_text(paragraph),
            Habitable::from_bool(is_habitable(name)),
            truncate_description(paragraph),
        );
        record.distance = Some(label_or_unknown(self.distance(paragraph), "ly", self.labels));
        record.year = Some(self.year(paragraph).unwrap_or_else(|| UNKNOWN.to_string()));
        record.mass = Some(label_or_unknown(self.mass(paragraph), "M⊕", self.labels));
        record.radius = Some(label_or_unknown(self.radius(paragraph), "R⊕", self.labels));
        record.temperature = Some(label_or_unknown(self.temperature(paragraph), "K", self.labels));
        record
    }

    pub fn distance(&self, text: &str) -> Option<UnitMatch> {
        capture_unit(&self.distance, text)
    }

    /// First "19xx"/"20xx" run anywhere in the text
    pub fn year(&self, text: &str) -> Option<String> {
        self.year.find(text).map(|m| m.as_str().to_string())
    }

    pub fn mass(&self, text: &str) -> Option<UnitMatch> {
        capture_unit(&self.mass, text)
    }

    pub fn radius(&self, text: &str) -> Option<UnitMatch> {
        capture_unit(&self.radius, text)
    }

    pub fn temperature(&self, text: &str) -> Option<UnitMatch> {
        capture_unit(&self.temperature, text)
    }
}

fn capture_unit(re: &Regex, text: &str) -> Option<UnitMatch> {
    let caps = re.captures(text)?;
    Some(UnitMatch {
        value: caps.get(1)?.as_str().to_string(),
        unit: caps.get(2)?.as_str().to_string(),
    })
}

/// Classification from free text using [`TYPE_RULES`]
pub fn classify_text(text: &str) -> PlanetType {
    let lowered = text.to_lowercase();
    TYPE_RULES
        .iter()
        .find(|(needle, _)| lowered.contains(needle))
        .map(|(_, planet_type)| *planet_type)
        .unwrap_or(PlanetType::Unknown)
}

/// First [`DESCRIPTION_LIMIT`] characters plus the ellipsis suffix.
/// The suffix is appended even when nothing was cut.
pub fn truncate_description(paragraph: &str) -> String {
    let mut description: String = paragraph.chars().take(DESCRIPTION_LIMIT).collect();
    description.push_str(DESCRIPTION_SUFFIX);
    description
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> Extractor {
        Extractor::new(UnitLabels::Historical).unwrap()
    }

    fn content(paragraphs: &[&str]) -> ScrapedContent {
        ScrapedContent {
            paragraphs: paragraphs.iter().map(|p| p.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_kepler_452b_paragraph() {
        let scraped = content(&[
            "Astronomers keep finding new worlds.",
            "Kepler-452b is a Super Earth discovered in 2015, located 1400 light years away.",
        ]);
        let records = extractor().extract_records(&scraped);
        assert_eq!(records.len(), 1);

        let r = &records[0];
        assert_eq!(r.name, "Kepler-452b");
        assert_eq!(r.planet_type, PlanetType::SuperEarth);
        assert_eq!(r.year.as_deref(), Some("2015"));
        assert_eq!(r.distance.as_deref(), Some("1400 ly"));
        assert_eq!(r.mass.as_deref(), Some("Unknown"));
        assert_eq!(r.radius.as_deref(), Some("Unknown"));
        assert_eq!(r.habitable, Habitable::Yes);
    }

    #[test]
    fn test_no_keywords_yields_nothing() {
        let scraped = content(&["Nothing to see here.", "Mars is red."]);
        assert!(extractor().extract_records(&scraped).is_empty());
        assert!(extractor().extract_records(&ScrapedContent::default()).is_empty());
    }

    #[test]
    fn test_output_follows_keyword_order() {
        let scraped = content(&[
            "Ross 128 b orbits a quiet red dwarf.",
            "51 Pegasi b is a hot jupiter.",
            "kepler-452B in lowercase still counts.",
        ]);
        let names: Vec<_> = extractor()
            .extract_records(&scraped)
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Kepler-452b", "51 Pegasi b", "Ross 128 b"]);
    }

    #[test]
    fn test_first_matching_paragraph_wins() {
        let scraped = content(&[
            "TRAPPIST-1e was announced in 2017.",
            "TRAPPIST-1e is a gas giant from 1999.",
        ]);
        let records = extractor().extract_records(&scraped);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].year.as_deref(), Some("2017"));
        assert_eq!(records[0].planet_type, PlanetType::Unknown);
    }

    #[test]
    fn test_shared_paragraph_feeds_every_keyword() {
        let scraped = content(&["HD 209458 b and HD 189733 b are both hot jupiters."]);
        let records = extractor().extract_records(&scraped);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].description, records[1].description);
        assert!(records.iter().all(|r| r.planet_type == PlanetType::HotJupiter));
        assert!(records.iter().all(|r| r.habitable == Habitable::No));
    }

    #[test]
    fn test_type_rule_order() {
        assert_eq!(classify_text("a terrestrial super earth"), PlanetType::SuperEarth);
        assert_eq!(classify_text("Terrestrial and a Gas Giant"), PlanetType::Terrestrial);
        assert_eq!(classify_text("gas giant, or hot jupiter"), PlanetType::HotJupiter);
        assert_eq!(classify_text("a GAS GIANT"), PlanetType::GasGiant);
        assert_eq!(classify_text("an ice world"), PlanetType::Unknown);
    }

    #[test]
    fn test_distance_units_relabelled() {
        let ex = extractor();
        let m = ex.distance("about 12.5 parsecs from here").unwrap();
        assert_eq!(m.value, "12.5");
        assert_eq!(m.unit, "parsecs");
        assert_eq!(label_or_unknown(Some(m), "ly", UnitLabels::Historical), "12.5 ly");
        assert_eq!(ex.distance("4.2ly").unwrap().value, "4.2");
        assert_eq!(ex.distance("40 Light Years").unwrap().value, "40");
        // hyphenated "light-years" is not a recognised unit
        assert!(ex.distance("1,400 light-years").is_none());
        assert!(ex.distance("far away").is_none());
    }

    #[test]
    fn test_year_is_first_19xx_or_20xx() {
        let ex = extractor();
        assert_eq!(ex.year("found in 1995, confirmed 1997").as_deref(), Some("1995"));
        assert_eq!(ex.year("catalogue id 12019").as_deref(), Some("2019"));
        assert_eq!(ex.year("in 1850 and 2150"), None);
    }

    #[test]
    fn test_mass_radius_temperature() {
        let ex = extractor();
        let text = "It has 5.0 M⊕, a radius of 1.6 R⊕ and sits at 265 K.";
        assert_eq!(ex.mass(text).unwrap().value, "5.0");
        assert_eq!(ex.radius(text).unwrap().value, "1.6");
        assert_eq!(ex.temperature(text).unwrap().value, "265");

        let jovian = "0.7 MJ and 1.4 RJ at 1130 °F";
        assert_eq!(ex.mass(jovian).unwrap().unit, "MJ");
        assert_eq!(ex.radius(jovian).unwrap().unit, "RJ");
        let temp = ex.temperature(jovian).unwrap();
        assert_eq!(label_or_unknown(Some(temp), "K", UnitLabels::Historical), "1130 K");
    }

    #[test]
    fn test_matched_labels_keep_true_unit() {
        let ex = Extractor::new(UnitLabels::Matched).unwrap();
        let scraped = content(&["Wolf 1061c lies 4.3 pc away with 3.4 M☉ and 20 °C."]);
        let r = &ex.extract_records(&scraped)[0];
        assert_eq!(r.distance.as_deref(), Some("4.3 pc"));
        assert_eq!(r.mass.as_deref(), Some("3.4 M☉"));
        assert_eq!(r.temperature.as_deref(), Some("20 °C"));
        assert_eq!(r.radius.as_deref(), Some("Unknown"));
    }

    #[test]
    fn test_description_truncation() {
        let long = format!("Gliese 581 g {}", "x".repeat(400));
        let scraped = content(&[&long]);
        let r = &extractor().extract_records(&scraped)[0];
        assert!(r.description.ends_with("..."));
        assert_eq!(r.description.chars().count(), DESCRIPTION_LIMIT + 3);
        assert_eq!(&r.description[..13], "Gliese 581 g ");

        assert_eq!(truncate_description("short"), "short...");
    }

    #[test]
    fn test_description_counts_characters_not_bytes() {
        let text = "⊕".repeat(250);
        let description = truncate_description(&text);
        assert_eq!(description.chars().count(), DESCRIPTION_LIMIT + 3);
    }
}
