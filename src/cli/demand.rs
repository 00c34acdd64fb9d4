use std::path::PathBuf;

use clap::Parser;

use crate::{demand::DemandProfile, prelude::*, quantity::power::Kilowatts};

#[derive(Parser)]
pub struct DemandArgs {
    /// Comma-separated power demand per time step in kilowatts.
    #[clap(
        long,
        value_delimiter = ',',
        allow_negative_numbers = true,
        env = "DEMAND",
        conflicts_with = "demand_file",
        required_unless_present = "demand_file"
    )]
    pub demand: Vec<Kilowatts>,

    /// JSON or TOML file with the `demand` array.
    #[clap(long, env = "DEMAND_FILE")]
    pub demand_file: Option<PathBuf>,

    /// Expected number of time steps, including the terminal one.
    #[clap(long, env = "HORIZON")]
    pub horizon: Option<usize>,
}

impl DemandArgs {
    pub fn load(&self) -> Result<Vec<Kilowatts>> {
        match &self.demand_file {
            Some(path) => Ok(DemandProfile::read_from(path)?.demand),
            None => Ok(self.demand.clone()),
        }
    }
}
