use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Display value used for any attribute that could not be determined
pub const UNKNOWN: &str = "Unknown";

/// Planet classification, serialized with its display string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanetType {
    #[serde(rename = "Terrestrial")]
    Terrestrial,
    #[serde(rename = "Super Earth")]
    SuperEarth,
    #[serde(rename = "Hot Jupiter")]
    HotJupiter,
    #[serde(rename = "Gas Giant")]
    GasGiant,
    #[serde(rename = "Sub-Earth")]
    SubEarth,
    #[serde(rename = "Mini Neptune")]
    MiniNeptune,
    #[serde(rename = "Neptune-like")]
    NeptuneLike,
    #[serde(rename = "Jupiter-like")]
    JupiterLike,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl PlanetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanetType::Terrestrial => "Terrestrial",
            PlanetType::SuperEarth => "Super Earth",
            PlanetType::HotJupiter => "Hot Jupiter",
            PlanetType::GasGiant => "Gas Giant",
            PlanetType::SubEarth => "Sub-Earth",
            PlanetType::MiniNeptune => "Mini Neptune",
            PlanetType::NeptuneLike => "Neptune-like",
            PlanetType::JupiterLike => "Jupiter-like",
            PlanetType::Unknown => UNKNOWN,
        }
    }
}

impl fmt::Display for PlanetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Habitability flag. Derived, never measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Habitable {
    Yes,
    No,
}

impl Habitable {
    pub fn from_bool(habitable: bool) -> Self {
        if habitable { Habitable::Yes } else { Habitable::No }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Habitable::Yes => "Yes",
            Habitable::No => "No",
        }
    }
}

impl fmt::Display for Habitable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One exoplanet as shown on the site.
///
/// The extractor and fallback paths fill the display strings
/// (`distance`, `year`, `mass`, `radius`, `temperature`); catalog documents
/// carry the numeric archive columns instead. Absent fields are skipped on
/// serialization so each path keeps its own shape. Fields this type does
/// not name are kept in `extra` and written back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExoplanetRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub planet_type: PlanetType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<String>,

    pub habitable: Habitable,
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_star: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_earth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass_earth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass_jupiter: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_jupiter: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orbital_period_days: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semi_major_axis_au: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equilibrium_temp_k: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insolation_earth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eccentricity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inclination_deg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density_g_cm3: Option<f64>,
    /// log10 of surface gravity as reported by the archive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_gravity_ms2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transit_depth_ppm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transit_duration_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discovery_method: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExoplanetRecord {
    /// A record with only the identifying fields set
    pub fn new(
        name: impl Into<String>,
        planet_type: PlanetType,
        habitable: Habitable,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            planet_type,
            distance: None,
            year: None,
            mass: None,
            radius: None,
            temperature: None,
            habitable,
            description: description.into(),
            host_star: None,
            radius_earth: None,
            mass_earth: None,
            mass_jupiter: None,
            radius_jupiter: None,
            orbital_period_days: None,
            semi_major_axis_au: None,
            equilibrium_temp_k: None,
            insolation_earth: None,
            eccentricity: None,
            inclination_deg: None,
            density_g_cm3: None,
            surface_gravity_ms2: None,
            transit_depth_ppm: None,
            transit_duration_hours: None,
            discovery_method: None,
            extra: Map::new(),
        }
    }

    /// Display string for a field, "Unknown" when absent
    pub fn display_or_unknown(field: &Option<String>) -> &str {
        field.as_deref().unwrap_or(UNKNOWN)
    }
}

/// A heading from a scraped page.
///
/// Older scrape files store headings as bare strings, newer ones as
/// `{ "tag": "h2", "text": "..." }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Heading {
    Tagged { tag: String, text: String },
    Plain(String),
}

impl Heading {
    pub fn text(&self) -> &str {
        match self {
            Heading::Tagged { text, .. } => text,
            Heading::Plain(text) => text,
        }
    }
}

/// An image on a scraped page; `src` is absolute when the page URL allowed it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageImage {
    pub src: String,
    #[serde(default)]
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLink {
    #[serde(default)]
    pub text: String,
    pub href: String,
}

/// Unstructured text scraped from an exoplanet overview page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrapedContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub headings: Vec<Heading>,
    #[serde(default)]
    pub paragraphs: Vec<String>,
    #[serde(default)]
    pub images: Vec<PageImage>,
    #[serde(default)]
    pub links: Vec<PageLink>,
}

/// Provenance block written at the top of a catalog document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogMetadata {
    pub total_exoplanets: usize,
    pub scrape_date: DateTime<Utc>,
    pub source: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The comprehensive catalog resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<CatalogMetadata>,
    pub exoplanets: Vec<ExoplanetRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planet_type_serializes_display_string() {
        let json = serde_json::to_string(&PlanetType::SuperEarth).unwrap();
        assert_eq!(json, "\"Super Earth\"");
        let parsed: PlanetType = serde_json::from_str("\"Neptune-like\"").unwrap();
        assert_eq!(parsed, PlanetType::NeptuneLike);
        assert!(serde_json::from_str::<PlanetType>("\"Ice Giant\"").is_err());
    }

    #[test]
    fn test_habitable_rejects_other_values() {
        assert_eq!(serde_json::from_str::<Habitable>("\"Yes\"").unwrap(), Habitable::Yes);
        assert!(serde_json::from_str::<Habitable>("\"Unknown\"").is_err());
        assert_eq!(Habitable::from_bool(false), Habitable::No);
    }

    #[test]
    fn test_record_skips_absent_fields() {
        let record = ExoplanetRecord::new("51 Pegasi b", PlanetType::HotJupiter, Habitable::No, "first");
        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object["type"], "Hot Jupiter");
        assert!(!object.contains_key("distance"));
        assert!(!object.contains_key("host_star"));
    }

    #[test]
    fn test_scraped_content_accepts_both_heading_shapes() {
        let json = r#"{
            "headings": ["Overview", {"tag": "h2", "text": "Discoveries"}],
            "paragraphs": ["one", "two"]
        }"#;
        let content: ScrapedContent = serde_json::from_str(json).unwrap();
        assert_eq!(content.headings.len(), 2);
        assert_eq!(content.headings[0].text(), "Overview");
        assert_eq!(content.headings[1].text(), "Discoveries");
        assert_eq!(content.paragraphs, vec!["one", "two"]);
    }

    #[test]
    fn test_scraped_content_defaults_missing_lists() {
        let content: ScrapedContent = serde_json::from_str("{}").unwrap();
        assert!(content.headings.is_empty());
        assert!(content.paragraphs.is_empty());
        assert!(content.images.is_empty());
        assert!(content.links.is_empty());
    }

    #[test]
    fn test_unnamed_fields_round_trip() {
        let json = serde_json::json!({
            "name": "HD 209458 b",
            "type": "Hot Jupiter",
            "habitable": "No",
            "description": "d",
            "eccentricity": 0.01,
            "transit_depth_ppm": 14600.0,
            "pl_custom_flag": true,
            "notes": {"source": "archive"}
        });
        let record: ExoplanetRecord = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(record.eccentricity, Some(0.01));
        assert_eq!(record.transit_depth_ppm, Some(14600.0));
        assert_eq!(record.extra.len(), 2);
        assert_eq!(record.extra["pl_custom_flag"], true);
        assert_eq!(serde_json::to_value(&record).unwrap(), json);
    }

    #[test]
    fn test_catalog_document_without_metadata() {
        let json = r#"{"exoplanets": [
            {"name": "Kepler-22b", "type": "Super Earth", "habitable": "No",
             "description": "d", "host_star": "Kepler-22", "radius_earth": 2.4}
        ]}"#;
        let doc: CatalogDocument = serde_json::from_str(json).unwrap();
        assert!(doc.metadata.is_none());
        assert_eq!(doc.exoplanets[0].host_star.as_deref(), Some("Kepler-22"));
        assert_eq!(doc.exoplanets[0].radius_earth, Some(2.4));
        assert!(doc.exoplanets[0].distance.is_none());
    }
}
