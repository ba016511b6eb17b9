#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the Dharma Gates directory.
//!
//! ```text
//! dharma_gates geocode "Spirit Rock, Woodacre, CA"
//! dharma_gates reverse 38.0 -122.6
//! dharma_gates parse "16201 Tomki Rd, Redwood Valley, CA 95470"
//! dharma_gates group --centers data/centers.json [--pinned auto]
//! dharma_gates facets --centers data/centers.json
//! dharma_gates serve
//! ```
//!
//! Geocoding uses the same configuration and environment overrides as
//! the server.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use dharma_gates_address::resolve_location;
use dharma_gates_center_models::{Center, Facet};
use dharma_gates_directory::{CountryOrder, FilterOptions, group_by_location};
use dharma_gates_geocoder::NominatimClient;

#[derive(Parser)]
#[command(
    name = "dharma_gates",
    about = "Geocode, parse and group Buddhist center listings"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up the coordinates of an address
    Geocode {
        /// Free-text address
        address: String,
    },
    /// Look up the address at a coordinate pair
    Reverse {
        /// Latitude in degrees
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        /// Longitude in degrees
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },
    /// Resolve a stored address to its country and state
    Parse {
        /// Composite or free-text address
        address: String,
    },
    /// Print the country / state listing of a center list
    Group {
        /// JSON file holding an array of centers
        #[arg(long)]
        centers: PathBuf,
        /// Country listed first, or "auto" for the most frequent one
        #[arg(long, default_value = "United States")]
        pinned: String,
    },
    /// Print the filter options of a center list
    Facets {
        /// JSON file holding an array of centers
        #[arg(long)]
        centers: PathBuf,
        /// Print the options as JSON
        #[arg(long)]
        json: bool,
    },
    /// Start the API server
    Serve,
}

fn read_centers(path: &Path) -> Result<Vec<Center>, Box<dyn std::error::Error>> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let centers: Vec<Center> = serde_json::from_str(&data)?;
    log::debug!("Read {} centers from {}", centers.len(), path.display());
    Ok(centers)
}

fn print_grouped(centers: &[Center], order: &CountryOrder) {
    let grouped = group_by_location(centers);

    for section in grouped.sections(order) {
        println!("{}", section.country);
        for state in section.states {
            println!("  {} ({})", state.state, state.entries.len());
            for center in state.entries {
                println!("    {}", center.sort_name());
            }
        }
    }

    if !grouped.unparseable.is_empty() {
        println!("Unparseable ({})", grouped.unparseable.len());
        for center in &grouped.unparseable {
            println!(
                "    {} [{}]",
                center.sort_name(),
                center.address.as_deref().unwrap_or("no address")
            );
        }
    }
}

fn print_facets(options: &FilterOptions) {
    for facet in Facet::all() {
        let values = options.options(*facet);
        println!("{facet} ({})", values.len());
        for value in values {
            println!("  {value}");
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Geocode { address } => {
            let client = NominatimClient::from_env()?;
            let place = client.forward(&address).await?;
            println!("{}", serde_json::to_string_pretty(&place)?);
        }
        Commands::Reverse {
            latitude,
            longitude,
        } => {
            let client = NominatimClient::from_env()?;
            let place = client.reverse(latitude, longitude).await?;
            println!("{}", serde_json::to_string_pretty(&place)?);
        }
        Commands::Parse { address } => match resolve_location(Some(address.as_str())) {
            Some(location) => println!("{} / {}", location.country, location.state),
            None => println!("unparseable"),
        },
        Commands::Group { centers, pinned } => {
            let centers = read_centers(&centers)?;
            print_grouped(&centers, &CountryOrder::from_setting(&pinned));
        }
        Commands::Facets { centers, json } => {
            let options = FilterOptions::from_centers(&read_centers(&centers)?);
            if json {
                println!("{}", serde_json::to_string_pretty(&options)?);
            } else {
                print_facets(&options);
            }
        }
        Commands::Serve => {
            // The server uses actix-web's runtime, so run it on its own
            // thread instead of nesting it inside tokio's.
            tokio::task::spawn_blocking(|| {
                actix_web::rt::System::new().block_on(dharma_gates_server::run_server())
            })
            .await??;
        }
    }

    Ok(())
}
