//! Powertrain and discretization CLI arguments.

use clap::Parser;

use crate::{
    core::{
        grid::{EnginePowers, SocGrid},
        powertrain::Powertrain,
    },
    prelude::*,
    quantity::{power::Kilowatts, soc::StateOfCharge},
};

#[must_use]
#[derive(Copy, Clone, Parser)]
pub struct PowertrainArgs {
    /// Minimum battery state of charge, `0..=1`.
    #[clap(long, default_value = "0.2", env = "MIN_SOC")]
    pub min_soc: StateOfCharge,

    /// Maximum battery state of charge, `0..=1`.
    #[clap(long, default_value = "0.8", env = "MAX_SOC")]
    pub max_soc: StateOfCharge,

    /// Initial battery state of charge, defaults to the middle of the allowed range.
    #[clap(long, env = "INITIAL_SOC")]
    pub initial_soc: Option<StateOfCharge>,

    /// Minimum engine power in kilowatts.
    #[clap(long, default_value = "0", env = "MIN_ENGINE_POWER")]
    pub min_engine_power: Kilowatts,

    /// Maximum engine power in kilowatts.
    #[clap(long, default_value = "70", env = "MAX_ENGINE_POWER")]
    pub max_engine_power: Kilowatts,

    /// Maximum battery charging power in kilowatts, negative.
    #[clap(
        long,
        default_value = "-50",
        env = "MIN_BATTERY_POWER",
        allow_negative_numbers = true
    )]
    pub min_battery_power: Kilowatts,

    /// Maximum battery discharging power in kilowatts.
    #[clap(long, default_value = "50", env = "MAX_BATTERY_POWER")]
    pub max_battery_power: Kilowatts,

    #[clap(long, default_value = "0.35", env = "ENGINE_EFFICIENCY")]
    pub engine_efficiency: f64,

    #[clap(long, default_value = "0.85", env = "CHARGING_EFFICIENCY")]
    pub charging_efficiency: f64,

    #[clap(long, default_value = "0.9", env = "DISCHARGING_EFFICIENCY")]
    pub discharging_efficiency: f64,

    /// Cost per kilowatt of battery power, penalizes the battery wear.
    #[clap(long, default_value = "0.01", env = "BATTERY_USAGE_WEIGHT")]
    pub battery_usage_weight: f64,

    /// Number of the SOC grid levels.
    #[clap(long, default_value = "101", env = "N_SOC_LEVELS")]
    pub n_soc_levels: usize,

    /// Number of the engine power candidates.
    #[clap(long, default_value = "11", env = "N_ENGINE_POWERS")]
    pub n_engine_powers: usize,
}

impl PowertrainArgs {
    pub fn powertrain(&self) -> Result<Powertrain> {
        Powertrain::builder()
            .min_soc(self.min_soc)
            .max_soc(self.max_soc)
            .min_battery_power(self.min_battery_power)
            .max_battery_power(self.max_battery_power)
            .engine_efficiency(self.engine_efficiency)
            .charging_efficiency(self.charging_efficiency)
            .discharging_efficiency(self.discharging_efficiency)
            .battery_usage_weight(self.battery_usage_weight)
            .build()
            .context("invalid powertrain parameters")
    }

    pub fn soc_grid(&self) -> Result<SocGrid> {
        SocGrid::try_new(self.min_soc, self.max_soc, self.n_soc_levels)
            .context("invalid SOC grid")
    }

    pub fn engine_powers(&self) -> Result<EnginePowers> {
        EnginePowers::try_new(self.min_engine_power, self.max_engine_power, self.n_engine_powers)
            .context("invalid engine power candidates")
    }

    pub fn initial_soc(&self) -> Result<StateOfCharge> {
        let initial_soc =
            self.initial_soc.unwrap_or_else(|| StateOfCharge::midpoint(self.min_soc, self.max_soc));
        ensure!(
            initial_soc >= self.min_soc && initial_soc <= self.max_soc,
            "initial SOC ({initial_soc}) must be within {}..={}",
            self.min_soc,
            self.max_soc,
        );
        Ok(initial_soc)
    }
}
