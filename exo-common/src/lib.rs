//! Data types shared by the exoplanet backend and the site server.

pub mod types;

pub use types::{
    CatalogDocument, CatalogMetadata, ExoplanetRecord, Habitable, Heading, PageImage, PageLink,
    PlanetType, ScrapedContent, UNKNOWN,
};
