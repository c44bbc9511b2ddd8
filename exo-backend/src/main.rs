use exo_backend::config;
use exo_backend::module::archive::{ArchiveClient, CatalogBuilder, save_document};
use exo_backend::module::catalog::{RecordLoader, RecordStore};
use exo_backend::module::page::PageScraper;

use anyhow::Result;
use clap::{Parser, Subcommand};
use exo_common::ExoplanetRecord;

#[derive(Parser)]
#[command(
    name = "exo-backend",
    version,
    about = "Exoplanet catalog loader and data builders",
    long_about = None
)]
struct Cli {
    /// Path to the TOML config file
    #[arg(short, long, global = true, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load records through the source chain and list them
    Load {
        /// Case-insensitive name filter
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Query the NASA Exoplanet Archive and write the comprehensive catalog
    BuildCatalog,

    /// Scrape the exoplanet overview page and write the scraped content
    ScrapePage,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::read_config(&cli.config)?;

    let _logging_guard = exo_backend::logging::init_logging(
        &config.log_dir,
        "exo-backend",
        &config.log_level,
        config.log_retention_days,
    );

    tracing::info!("Exoplanet backend starting...");

    match cli.command.unwrap_or(Commands::Load { search: None }) {
        Commands::Load { search } => {
            let loader = RecordLoader::from_config(&config.sources, &config.extractor)?;
            tracing::info!("Source chain: {}", loader.source_names().join(" -> "));

            let store = RecordStore::load(&loader).await;
            tracing::info!("Loaded {} exoplanets ({})", store.len(), store.origin());

            let page = store.display_page(search.as_deref().unwrap_or(""));
            print_table(&page);
            println!("Showing {} of {} exoplanets ({})", page.len(), store.len(), store.origin());
        }
        Commands::BuildCatalog => {
            let client = ArchiveClient::new()?;
            let rows = client.fetch_all().await;

            let mut builder = CatalogBuilder::new();
            let added = builder.add_rows(&rows);
            tracing::info!("Processed {} archive rows into {} unique exoplanets", rows.len(), added);
            builder.seed_if_empty();

            let document = builder.into_document(chrono::Utc::now());
            save_document(&document, &config.archive.output).await?;
        }
        Commands::ScrapePage => {
            let scraper = PageScraper::new()?;
            let content = scraper.scrape(&config.page.url).await?;
            PageScraper::save(&content, &config.page.output).await?;
        }
    }

    Ok(())
}

fn print_table(records: &[&ExoplanetRecord]) {
    println!(
        "{:<28} {:<14} {:<14} {:<6} {:<9}",
        "NAME", "TYPE", "DISTANCE", "YEAR", "HABITABLE"
    );
    for record in records {
        println!(
            "{:<28} {:<14} {:<14} {:<6} {:<9}",
            record.name,
            record.planet_type.as_str(),
            ExoplanetRecord::display_or_unknown(&record.distance),
            ExoplanetRecord::display_or_unknown(&record.year),
            record.habitable.as_str(),
        );
    }
}
