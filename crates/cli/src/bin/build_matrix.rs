//! build-matrix entry point.
//!
//! Reads coordinates from `geocoded_stops.csv`, asks OSRM for the full
//! duration table and writes `travel_matrix.json`.

use anyhow::Result;
use clap::Parser;
use routeprep_cli::commands::matrix::{self, MatrixArgs};
use routeprep_cli::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = MatrixArgs::parse();
    logging::init(args.log_json);

    let matrix = matrix::run(&args).await?;

    println!("Generated travel time matrix for {} stops -> {}", matrix.len(), args.output.display());

    Ok(())
}
