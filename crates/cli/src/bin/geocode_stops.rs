//! geocode-stops entry point.
//!
//! Reads `stops.csv`, resolves each address through the SQLite cache and
//! writes `geocoded_stops.csv`.

use anyhow::Result;
use clap::Parser;
use routeprep_cli::commands::geocode::{self, GeocodeArgs};
use routeprep_cli::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = GeocodeArgs::parse();
    logging::init(args.log_json);

    let summary = geocode::run(&args).await?;

    println!("Geocoded {} stops -> {}", summary.stops, args.output.display());

    Ok(())
}
