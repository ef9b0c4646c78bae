use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::error;

use cruise_catalog::config::Config;
use cruise_catalog::logging;
use cruise_catalog::{ParsedShip, ShipCatalog};

#[derive(Parser)]
#[command(name = "cruise_catalog")]
#[command(about = "Ship and cabin catalog reconciler")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file (defaults to ./config.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every ship with its cabin statistics
    Ships {
        /// Print the enriched ships as JSON
        #[arg(long)]
        json: bool,
    },
    /// Ships whose destinations or name contain the query
    Search {
        query: String,
        #[arg(long)]
        json: bool,
    },
    /// Unique destination names, sorted
    Destinations,
    /// Show one ship by slug as JSON
    Ship { slug: String },
}

fn format_price(price: i64) -> String {
    if price == 0 {
        "-".to_string()
    } else {
        format!("IDR {price}")
    }
}

fn print_ships(ships: &[ParsedShip], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(ships)?);
        return Ok(());
    }

    println!("🚢 {} ships", ships.len());
    for ship in ships {
        println!(
            "   {} ({}) | {} days | {} cabins | {} - {} | {}",
            ship.name,
            ship.slug,
            ship.trip,
            ship.cabin_count,
            format_price(ship.lowest_price),
            format_price(ship.highest_price),
            ship.destinations
        );
    }
    Ok(())
}

async fn run(cli: Cli, config: Config) -> Result<()> {
    let catalog = ShipCatalog::from_config(&config).context("Failed to build HTTP client")?;

    match cli.command {
        Commands::Ships { json } => {
            let ships = catalog.fetch_ships().await.context("Failed to load ships")?;
            print_ships(&ships, json)?;
        }
        Commands::Search { query, json } => {
            let ships = catalog
                .search_ships(&query)
                .await
                .context("Failed to load ships")?;
            print_ships(&ships, json)?;
        }
        Commands::Destinations => {
            let destinations = catalog
                .list_destinations()
                .await
                .context("Failed to load ships")?;
            for destination in destinations {
                println!("{destination}");
            }
        }
        Commands::Ship { slug } => match catalog.ship_by_slug(&slug).await? {
            Some(ship) => println!("{}", serde_json::to_string_pretty(&ship)?),
            None => anyhow::bail!("No ship with slug '{slug}'"),
        },
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    let _guard = logging::init_logging(&config.logging);

    if let Err(e) = run(cli, config).await {
        error!("{:#}", e);
        return Err(e);
    }
    Ok(())
}
