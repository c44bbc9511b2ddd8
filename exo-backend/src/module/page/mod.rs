//! Exoplanet overview page scraper
//!
//! Produces the scraped-content resource (title, headings, paragraphs)
//! that the record loader mines for planet mentions.

pub mod fetcher;
pub mod parser;
pub mod robots;

pub use fetcher::PageScraper;
pub use parser::parse_page;
pub use robots::allowed_by_robots;
