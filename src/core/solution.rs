use crate::{
    core::{
        grid::SocGrid,
        powertrain::Powertrain,
        solution_space::{CostToGo, SolutionSpace},
        step::Step,
    },
    prelude::*,
    quantity::{power::Kilowatts, soc::StateOfCharge},
};

/// Solved tables together with the inputs they were solved for.
#[must_use]
pub struct Solution<'a> {
    powertrain: &'a Powertrain,
    soc_grid: &'a SocGrid,
    demand: &'a [Kilowatts],
    space: SolutionSpace,
}

impl<'a> Solution<'a> {
    pub(super) const fn new(
        powertrain: &'a Powertrain,
        soc_grid: &'a SocGrid,
        demand: &'a [Kilowatts],
        space: SolutionSpace,
    ) -> Self {
        Self { powertrain, soc_grid, demand, space }
    }

    pub const fn space(&self) -> &SolutionSpace {
        &self.space
    }

    pub const fn soc_grid(&self) -> &SocGrid {
        self.soc_grid
    }

    /// Planned cost-to-go from the state of charge at the specified time step.
    pub fn cost_to_go(&self, time_step: usize, soc: StateOfCharge) -> CostToGo {
        self.space.cost_to_go(time_step, self.soc_grid.nearest(soc))
    }

    /// Replay the policy against the demand, starting from the initial state of charge.
    ///
    /// The actual state of charge is tracked exactly, and only snapped to the grid to look up
    /// the policy. Feasibility is not re-checked.
    ///
    /// # Errors
    ///
    /// Fails when the initial state of charge is out of bounds, or when the replay arrives at
    /// a state for which the solver found no feasible action.
    #[instrument(skip_all, fields(initial_soc = %initial_soc))]
    pub fn backtrack(&self, initial_soc: StateOfCharge) -> Result<Vec<Step>> {
        ensure!(
            initial_soc >= self.powertrain.min_soc && initial_soc <= self.powertrain.max_soc,
            "initial SOC ({initial_soc}) is out of bounds ({}..={})",
            self.powertrain.min_soc,
            self.powertrain.max_soc,
        );

        let n_steps = self.space.horizon() - 1;
        let mut steps = Vec::with_capacity(n_steps);
        let mut soc = initial_soc;

        for (time_step, demand) in self.demand.iter().copied().enumerate().take(n_steps) {
            let level = self.soc_grid.nearest(soc);
            let CostToGo::Reachable(planned_cost_to_go) = self.space.cost_to_go(time_step, level)
            else {
                bail!(
                    "no feasible engine power at step #{time_step} (demand: {demand}, SOC: {soc}), \
                     the demand cannot be covered from this state",
                );
            };
            let engine_power = self.space.policy(time_step, level);
            trace!(time_step, %soc, snapped = %self.soc_grid.get(level), %engine_power);
            let battery_power = Powertrain::battery_power(demand, engine_power);
            let soc_after = self.powertrain.next_soc(soc, battery_power);
            steps.push(Step {
                time_step,
                demand,
                engine_power,
                battery_power,
                soc_before: soc,
                soc_after,
                fuel_cost: self.powertrain.fuel_cost(engine_power),
                battery_penalty: self.powertrain.battery_penalty(battery_power),
                planned_cost_to_go,
            });
            soc = soc_after;
        }

        info!(n_steps = steps.len(), final_soc = %soc, "backtracked");
        Ok(steps)
    }
}
