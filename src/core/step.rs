use serde::Serialize;

use crate::quantity::{cost::Cost, power::Kilowatts, soc::StateOfCharge};

/// Single time step of the replayed plan.
#[must_use]
#[derive(Copy, Clone, Debug, Serialize)]
pub struct Step {
    pub time_step: usize,

    pub demand: Kilowatts,
    pub engine_power: Kilowatts,

    /// Always `demand - engine_power`.
    pub battery_power: Kilowatts,

    pub soc_before: StateOfCharge,
    pub soc_after: StateOfCharge,

    pub fuel_cost: Cost,
    pub battery_penalty: Cost,

    /// Cost-to-go of the grid state the step was snapped to, as planned by the solver.
    pub planned_cost_to_go: Cost,
}

impl Step {
    /// Cost within this single step.
    pub fn cost(&self) -> Cost {
        self.fuel_cost + self.battery_penalty
    }

    pub fn is_charging(&self) -> bool {
        self.battery_power < Kilowatts::ZERO
    }

    pub fn is_discharging(&self) -> bool {
        self.battery_power > Kilowatts::ZERO
    }
}
