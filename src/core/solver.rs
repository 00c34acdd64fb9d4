use std::time::Instant;

use bon::Builder;

use crate::{
    core::{
        grid::{EnginePowers, SocGrid},
        powertrain::Powertrain,
        solution::Solution,
        solution_space::SolutionSpace,
    },
    prelude::*,
    quantity::{cost::Cost, power::Kilowatts, soc::StateOfCharge},
};

#[derive(Builder)]
#[builder(finish_fn(vis = ""))]
pub struct Solver<'a> {
    powertrain: &'a Powertrain,
    soc_grid: &'a SocGrid,
    engine_powers: &'a EnginePowers,

    /// Power demand per time step.
    ///
    /// The last entry belongs to the terminal step and is never acted upon.
    demand: &'a [Kilowatts],

    /// Expected number of time steps, if it is configured separately from the demand.
    horizon: Option<usize>,
}

impl<'a, S: solver_builder::IsComplete> SolverBuilder<'a, S> {
    pub fn solve(self) -> Result<Solution<'a>> {
        self.build().solve()
    }
}

impl<'a> Solver<'a> {
    /// Fill in the cost-to-go and policy tables.
    ///
    /// Works backwards from the horizon end to the present, computing the minimum cost
    /// at each `(time step, SOC level)` state. The next state is snapped to the nearest level.
    ///
    /// The [DP][1] state space:
    ///
    /// - Time dimension: each demand entry, the last one being the terminal state with no cost
    /// - SOC dimension: the uniform SOC grid
    ///
    /// [1]: https://en.wikipedia.org/wiki/Dynamic_programming
    #[instrument(skip_all)]
    fn solve(self) -> Result<Solution<'a>> {
        self.validate()?;

        let start_instant = Instant::now();
        let horizon = self.demand.len();
        info!(
            horizon,
            n_levels = self.soc_grid.len(),
            soc_spacing = %self.soc_grid.spacing(),
            n_engine_powers = self.engine_powers.len(),
            "optimizing…",
        );

        let mut space = SolutionSpace::new(horizon, self.soc_grid.len());

        // Going backwards, skipping the terminal step:
        for (time_step, demand) in self.demand.iter().copied().enumerate().rev().skip(1) {
            for (level, soc) in self.soc_grid.iter() {
                let solution = self.optimize_state(&space, time_step, soc, demand);
                if let Some((cost, engine_power)) = solution {
                    space.insert(time_step, level, cost, engine_power);
                }
            }
            let n_reachable = space.n_reachable(time_step);
            if n_reachable == 0 {
                warn!(time_step, %demand, "no state is reachable");
            } else {
                debug!(time_step, %demand, n_reachable, "solved");
            }
        }

        info!(elapsed = ?start_instant.elapsed(), "optimized");
        Ok(Solution::new(self.powertrain, self.soc_grid, self.demand, space))
    }

    /// Find the cheapest feasible engine power for the state.
    ///
    /// # Returns
    ///
    /// - [`Some`] total cost and engine power, if a solution exists. On a tie, the lowest
    ///   engine power wins.
    /// - [`None`], if there is no solution.
    fn optimize_state(
        &self,
        space: &SolutionSpace,
        time_step: usize,
        soc: StateOfCharge,
        demand: Kilowatts,
    ) -> Option<(Cost, Kilowatts)> {
        self.engine_powers
            .iter()
            .filter_map(|engine_power| {
                let transition = self.powertrain.transition(soc, demand, engine_power)?;
                let next_level = self.soc_grid.nearest(transition.soc_after);
                // Note that the next state may be unreachable, hence the question mark:
                let future_cost = space.cost_to_go(time_step + 1, next_level).cost()?;
                Some((transition.cost + future_cost, engine_power))
            })
            .min_by_key(|(cost, _)| *cost)
    }

    fn validate(&self) -> Result {
        ensure!(!self.demand.is_empty(), "the demand sequence is empty");
        if let Some(horizon) = self.horizon {
            ensure!(
                self.demand.len() == horizon,
                "the demand sequence has {} entries, but the horizon is {horizon}",
                self.demand.len(),
            );
        }
        if let Some((time_step, demand)) =
            self.demand.iter().enumerate().find(|(_, demand)| !demand.is_finite())
        {
            bail!("invalid demand at step #{time_step}: {demand}");
        }
        ensure!(
            self.engine_powers.min() >= Kilowatts::ZERO,
            "engine power candidates must not be negative, got {}",
            self.engine_powers.min(),
        );
        ensure!(
            self.soc_grid.min() == self.powertrain.min_soc
                && self.soc_grid.max() == self.powertrain.max_soc,
            "the SOC grid ({}..={}) does not match the powertrain SOC bounds ({}..={})",
            self.soc_grid.min(),
            self.soc_grid.max(),
            self.powertrain.min_soc,
            self.powertrain.max_soc,
        );
        Ok(())
    }
}
