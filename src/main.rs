use anyhow::{Error, Result};
use clap::Parser;
use prep_data::{
    cli::{Cli, DatasetChoice},
    materialize_array, materialize_flights, materialize_weather,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    let config = cli.config();
    let size = cli.size();

    println!("Setting up data directory");
    println!("-------------------------");

    if cli.dataset.includes(DatasetChoice::Flights) {
        materialize_flights(&config, size).await?;
    }
    if cli.dataset.includes(DatasetChoice::Array) {
        materialize_array(&config, size)?;
    }
    if cli.dataset.includes(DatasetChoice::Weather) {
        materialize_weather(&config, size).await?;
    }

    println!("Finished!");

    Ok(())
}
