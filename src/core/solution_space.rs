use crate::{
    core::grid::SocLevel,
    quantity::{cost::Cost, power::Kilowatts},
};

/// Minimal cumulative cost from a state till the end of the horizon.
#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CostToGo {
    /// No feasible sequence of actions leads from the state to the horizon end.
    Unreachable,

    Reachable(Cost),
}

impl CostToGo {
    pub const fn cost(self) -> Option<Cost> {
        match self {
            Self::Reachable(cost) => Some(cost),
            Self::Unreachable => None,
        }
    }

    pub const fn is_reachable(self) -> bool {
        matches!(self, Self::Reachable(_))
    }
}

/// Cost-to-go and policy tables indexed by `(time step, SOC level)`.
pub struct SolutionSpace {
    /// Time dimension size, including the terminal step.
    horizon: usize,

    /// State dimension size.
    n_levels: usize,

    /// Flattened `horizon × n_levels` cost-to-go matrix.
    costs: Vec<CostToGo>,

    /// Flattened `(horizon - 1) × n_levels` matrix of the chosen engine power.
    ///
    /// Only meaningful where the cost-to-go is reachable, zero elsewhere.
    policy: Vec<Kilowatts>,
}

impl SolutionSpace {
    /// Allocate the tables: everything is unreachable except for the terminal step,
    /// which has no future cost.
    pub fn new(horizon: usize, n_levels: usize) -> Self {
        assert!(horizon >= 1, "the horizon must include at least the terminal step");
        let mut costs = vec![CostToGo::Unreachable; horizon * n_levels];
        costs[(horizon - 1) * n_levels..].fill(CostToGo::Reachable(Cost::ZERO));
        let policy = vec![Kilowatts::ZERO; (horizon - 1) * n_levels];
        Self { horizon, n_levels, costs, policy }
    }

    pub const fn horizon(&self) -> usize {
        self.horizon
    }

    pub fn cost_to_go(&self, time_step: usize, level: SocLevel) -> CostToGo {
        self.costs[self.flat_index(time_step, level)]
    }

    /// Engine power chosen for the state.
    ///
    /// Zero for unreachable states.
    pub fn policy(&self, time_step: usize, level: SocLevel) -> Kilowatts {
        debug_assert!(time_step + 1 < self.horizon, "no policy at the terminal step");
        self.policy[self.flat_index(time_step, level)]
    }

    /// Record the optimal cost-to-go and the action achieving it.
    ///
    /// Each cell is written at most once.
    pub fn insert(&mut self, time_step: usize, level: SocLevel, cost: Cost, engine_power: Kilowatts) {
        debug_assert!(time_step + 1 < self.horizon, "the terminal step is fixed");
        let flat_index = self.flat_index(time_step, level);
        debug_assert!(!self.costs[flat_index].is_reachable(), "the cell is already solved");
        self.costs[flat_index] = CostToGo::Reachable(cost);
        self.policy[flat_index] = engine_power;
    }

    /// Number of reachable states at the time step.
    pub fn n_reachable(&self, time_step: usize) -> usize {
        let start = self.flat_index(time_step, SocLevel(0));
        self.costs[start..start + self.n_levels].iter().filter(|cost| cost.is_reachable()).count()
    }

    /// Convert the indices into the respective index in the flattened arrays.
    #[must_use]
    fn flat_index(&self, time_step: usize, level: SocLevel) -> usize {
        debug_assert!(time_step < self.horizon, "time step is out of bounds ({time_step})");
        debug_assert!(level.0 < self.n_levels, "SOC level is out of bounds ({level:?})");
        time_step * self.n_levels + level.0
    }
}
