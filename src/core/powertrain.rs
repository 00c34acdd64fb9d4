use bon::bon;

use crate::{
    prelude::*,
    quantity::{cost::Cost, power::Kilowatts, soc::StateOfCharge},
};

/// Battery power which changes the state of charge by one whole unit within a single step.
const KILOWATTS_PER_SOC_UNIT: f64 = 1000.0;

/// Transition and cost model of a single-engine, single-battery hybrid powertrain.
#[must_use]
#[derive(Copy, Clone, Debug)]
pub struct Powertrain {
    pub min_soc: StateOfCharge,
    pub max_soc: StateOfCharge,

    /// Maximum charging power, negative.
    pub min_battery_power: Kilowatts,

    /// Maximum discharging power.
    pub max_battery_power: Kilowatts,

    /// Engine efficiency, `0..=1`.
    pub engine_efficiency: f64,

    /// Battery charging efficiency, `0..=1`.
    pub charging_efficiency: f64,

    /// Battery discharging efficiency, `0..=1`.
    pub discharging_efficiency: f64,

    /// Cost per kilowatt of battery power in either direction.
    pub battery_usage_weight: f64,
}

#[bon]
impl Powertrain {
    #[builder]
    pub fn new(
        min_soc: StateOfCharge,
        max_soc: StateOfCharge,
        min_battery_power: Kilowatts,
        max_battery_power: Kilowatts,
        #[builder(default = 0.35)] engine_efficiency: f64,
        #[builder(default = 0.85)] charging_efficiency: f64,
        #[builder(default = 0.9)] discharging_efficiency: f64,
        #[builder(default = 0.01)] battery_usage_weight: f64,
    ) -> Result<Self> {
        ensure!(min_soc.is_finite() && max_soc.is_finite(), "SOC bounds must be finite");
        ensure!(min_soc < max_soc, "minimum SOC ({min_soc}) must be below the maximum ({max_soc})");
        ensure!(
            min_battery_power.is_finite() && max_battery_power.is_finite(),
            "battery power bounds must be finite",
        );
        ensure!(
            min_battery_power <= max_battery_power,
            "minimum battery power ({min_battery_power}) must not exceed \
             the maximum ({max_battery_power})",
        );
        for (name, efficiency) in [
            ("engine", engine_efficiency),
            ("battery charging", charging_efficiency),
            ("battery discharging", discharging_efficiency),
        ] {
            if !(efficiency > 0.0 && efficiency <= 1.0) {
                bail!("invalid {name} efficiency: {efficiency}");
            }
        }
        if !(battery_usage_weight.is_finite() && battery_usage_weight >= 0.0) {
            bail!("invalid battery usage weight: {battery_usage_weight}");
        }
        Ok(Self {
            min_soc,
            max_soc,
            min_battery_power,
            max_battery_power,
            engine_efficiency,
            charging_efficiency,
            discharging_efficiency,
            battery_usage_weight,
        })
    }
}

impl Powertrain {
    /// Power the battery has to cover when the engine delivers the specified power.
    pub fn battery_power(demand: Kilowatts, engine_power: Kilowatts) -> Kilowatts {
        demand - engine_power
    }

    /// State of charge after one step with the specified battery power.
    ///
    /// Discharging drains more than delivered, charging stores less than supplied.
    pub fn next_soc(&self, soc: StateOfCharge, battery_power: Kilowatts) -> StateOfCharge {
        let delta = if battery_power > Kilowatts::ZERO {
            battery_power.0 / KILOWATTS_PER_SOC_UNIT / self.discharging_efficiency
        } else {
            battery_power.0 * self.charging_efficiency / KILOWATTS_PER_SOC_UNIT
        };
        StateOfCharge(soc.0 - delta)
    }

    /// Fuel-equivalent engine power plus the battery usage penalty.
    pub fn instantaneous_cost(&self, engine_power: Kilowatts, battery_power: Kilowatts) -> Cost {
        self.fuel_cost(engine_power) + self.battery_penalty(battery_power)
    }

    pub fn fuel_cost(&self, engine_power: Kilowatts) -> Cost {
        Cost(engine_power.0 / self.engine_efficiency)
    }

    /// Penalty for using the battery in either direction.
    pub fn battery_penalty(&self, battery_power: Kilowatts) -> Cost {
        Cost(battery_power.abs().0 * self.battery_usage_weight)
    }

    /// Apply the engine power to the state, and return the transition if it is feasible.
    ///
    /// # Returns
    ///
    /// - [`Some`] [`Transition`], if both the battery power and the next state of charge
    ///   stay within their bounds.
    /// - [`None`], if the action is infeasible.
    pub fn transition(
        &self,
        soc: StateOfCharge,
        demand: Kilowatts,
        engine_power: Kilowatts,
    ) -> Option<Transition> {
        let battery_power = Self::battery_power(demand, engine_power);
        if battery_power < self.min_battery_power || battery_power > self.max_battery_power {
            return None;
        }
        let soc_after = self.next_soc(soc, battery_power);
        if soc_after < self.min_soc || soc_after > self.max_soc {
            return None;
        }
        Some(Transition {
            engine_power,
            battery_power,
            soc_after,
            cost: self.instantaneous_cost(engine_power, battery_power),
        })
    }
}

/// Feasible single-step transition.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub engine_power: Kilowatts,
    pub battery_power: Kilowatts,
    pub soc_after: StateOfCharge,
    pub cost: Cost,
}
