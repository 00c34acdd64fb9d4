use std::fmt::{Debug, Formatter};

use itertools::Itertools;

use crate::{
    prelude::*,
    quantity::{power::Kilowatts, soc::StateOfCharge},
};

/// Discrete state-of-charge level: index into the [`SocGrid`].
#[must_use]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SocLevel(pub usize);

impl Debug for SocLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Uniformly spaced state-of-charge values, both bounds included.
#[must_use]
#[derive(Clone, Debug)]
pub struct SocGrid(Vec<StateOfCharge>);

impl SocGrid {
    pub fn try_new(min: StateOfCharge, max: StateOfCharge, n_levels: usize) -> Result<Self> {
        ensure!(n_levels >= 2, "the SOC grid needs at least 2 levels, got {n_levels}");
        ensure!(min.is_finite() && max.is_finite(), "SOC bounds must be finite");
        ensure!(min < max, "minimum SOC ({min}) must be below the maximum SOC ({max})");
        let levels = linspace(min.0, max.0, n_levels).map(StateOfCharge).collect_vec();
        ensure!(
            levels.iter().tuple_windows().all(|(lhs, rhs)| lhs < rhs),
            "the SOC grid is too fine to be strictly increasing",
        );
        Ok(Self(levels))
    }

    pub const fn len(&self) -> usize {
        self.0.len()
    }

    pub fn min(&self) -> StateOfCharge {
        self.0[0]
    }

    pub fn max(&self) -> StateOfCharge {
        self.0[self.0.len() - 1]
    }

    pub fn spacing(&self) -> StateOfCharge {
        self.0[1] - self.0[0]
    }

    pub fn get(&self, level: SocLevel) -> StateOfCharge {
        self.0[level.0]
    }

    /// Iterate over `(level, state of charge)` from the lowest to the highest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (SocLevel, StateOfCharge)> + '_ {
        self.0.iter().copied().enumerate().map(|(index, soc)| (SocLevel(index), soc))
    }

    /// Snap the state of charge to the nearest grid level.
    ///
    /// On a tie, the lower level wins. This is exactly the first minimum of `|grid[k] - soc|`
    /// over the whole grid, found with a binary search instead of a scan.
    pub fn nearest(&self, soc: StateOfCharge) -> SocLevel {
        let upper = self.0.partition_point(|level| *level < soc);
        if upper == 0 {
            return SocLevel(0);
        }
        let distance = |index: usize| (self.0[index] - soc).abs();
        let mut index = if upper == self.0.len() || distance(upper - 1) <= distance(upper) {
            upper - 1
        } else {
            upper
        };

        // Rounding may produce equal distances further down the grid:
        while index > 0 && distance(index - 1) == distance(index) {
            index -= 1;
        }
        SocLevel(index)
    }
}

/// Engine power candidates, uniformly spaced, both bounds included.
#[must_use]
#[derive(Clone, Debug)]
pub struct EnginePowers(Vec<Kilowatts>);

impl EnginePowers {
    pub fn try_new(min: Kilowatts, max: Kilowatts, n_candidates: usize) -> Result<Self> {
        ensure!(n_candidates >= 1, "at least one engine power candidate is required");
        ensure!(min.is_finite() && max.is_finite(), "engine power bounds must be finite");
        ensure!(
            min <= max,
            "minimum engine power ({min}) must not exceed the maximum engine power ({max})",
        );
        Ok(Self(linspace(min.0, max.0, n_candidates).map(Kilowatts).collect()))
    }

    pub const fn len(&self) -> usize {
        self.0.len()
    }

    pub fn min(&self) -> Kilowatts {
        self.0[0]
    }

    pub fn max(&self) -> Kilowatts {
        self.0[self.0.len() - 1]
    }

    pub fn iter(&self) -> impl Iterator<Item = Kilowatts> + '_ {
        self.0.iter().copied()
    }
}

/// `n` evenly spaced numbers over `[start, end]`, the last one being exactly `end`.
#[expect(clippy::cast_precision_loss)]
fn linspace(start: f64, end: f64, n: usize) -> impl Iterator<Item = f64> {
    let step = if n > 1 { (end - start) / (n - 1) as f64 } else { 0.0 };
    (0..n).map(move |index| if n > 1 && index == n - 1 { end } else { start + step * index as f64 })
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use ordered_float::OrderedFloat;

    use super::*;

    fn naive_nearest(grid: &SocGrid, soc: StateOfCharge) -> SocLevel {
        let index = grid.0.iter().position_min_by_key(|level| OrderedFloat((level.0 - soc.0).abs()));
        SocLevel(index.unwrap())
    }

    fn default_grid() -> SocGrid {
        SocGrid::try_new(StateOfCharge(0.2), StateOfCharge(0.8), 101).unwrap()
    }

    #[test]
    fn grid_bounds_ok() {
        let grid = default_grid();
        assert_eq!(grid.len(), 101);
        assert_eq!(grid.min(), StateOfCharge(0.2));
        assert_eq!(grid.max(), StateOfCharge(0.8));
        assert_abs_diff_eq!(grid.spacing().0, 0.006, epsilon = 1e-12);
        assert!(grid.0.iter().tuple_windows().all(|(lhs, rhs)| lhs < rhs));
    }

    #[test]
    fn grid_rejects_degenerate_configuration() {
        assert!(SocGrid::try_new(StateOfCharge(0.2), StateOfCharge(0.8), 1).is_err());
        assert!(SocGrid::try_new(StateOfCharge(0.8), StateOfCharge(0.2), 11).is_err());
        assert!(SocGrid::try_new(StateOfCharge(0.5), StateOfCharge(0.5), 11).is_err());
        assert!(SocGrid::try_new(StateOfCharge(f64::NAN), StateOfCharge(0.5), 11).is_err());
    }

    #[test]
    fn engine_powers_ok() {
        let powers = EnginePowers::try_new(Kilowatts(0.0), Kilowatts(70.0), 11).unwrap();
        assert_eq!(powers.len(), 11);
        assert_eq!(powers.min(), Kilowatts(0.0));
        assert_eq!(powers.max(), Kilowatts(70.0));
        assert_abs_diff_eq!(powers.0[3].0, 21.0, epsilon = 1e-12);
    }

    #[test]
    fn single_engine_power_ok() {
        let powers = EnginePowers::try_new(Kilowatts(10.0), Kilowatts(70.0), 1).unwrap();
        assert_eq!(powers.iter().collect_vec(), vec![Kilowatts(10.0)]);
    }

    #[test]
    fn engine_powers_reject_degenerate_configuration() {
        assert!(EnginePowers::try_new(Kilowatts(0.0), Kilowatts(70.0), 0).is_err());
        assert!(EnginePowers::try_new(Kilowatts(70.0), Kilowatts(0.0), 11).is_err());
    }

    #[test]
    fn nearest_exact_levels() {
        let grid = default_grid();
        for (level, soc) in grid.iter() {
            assert_eq!(grid.nearest(soc), level);
        }
    }

    #[test]
    fn nearest_tie_picks_lower_level() {
        let grid = SocGrid::try_new(StateOfCharge(0.0), StateOfCharge(1.0), 5).unwrap();
        assert_eq!(grid.nearest(StateOfCharge(0.125)), SocLevel(0));
        assert_eq!(grid.nearest(StateOfCharge(0.375)), SocLevel(1));
        assert_eq!(grid.nearest(StateOfCharge(0.875)), SocLevel(3));
    }

    #[test]
    fn nearest_clamps_outside_the_grid() {
        let grid = default_grid();
        assert_eq!(grid.nearest(StateOfCharge(-1.0)), SocLevel(0));
        assert_eq!(grid.nearest(StateOfCharge(0.1)), SocLevel(0));
        assert_eq!(grid.nearest(StateOfCharge(0.95)), SocLevel(100));
    }

    #[test]
    fn nearest_matches_naive_scan() {
        let grids = [
            default_grid(),
            SocGrid::try_new(StateOfCharge(0.0), StateOfCharge(1.0), 5).unwrap(),
            SocGrid::try_new(StateOfCharge(0.2), StateOfCharge(0.8), 3).unwrap(),
            SocGrid::try_new(StateOfCharge(0.1), StateOfCharge(0.9), 7).unwrap(),
        ];
        for grid in &grids {
            for step in 0..=2000 {
                let soc = StateOfCharge(-0.1 + f64::from(step) * 0.0006);
                assert_eq!(grid.nearest(soc), naive_nearest(grid, soc), "query: {soc:?}");
                assert_eq!(grid.nearest(soc), grid.nearest(soc));
            }
        }
    }

    #[test]
    fn nearest_within_half_spacing() {
        let grid = default_grid();
        let half_spacing = grid.spacing().0 / 2.0;
        for step in 0..=1000 {
            let soc = StateOfCharge(0.2 + f64::from(step) * 0.0006);
            let snapped = grid.get(grid.nearest(soc));
            assert!((snapped - soc).abs().0 <= half_spacing + 1e-12, "query: {soc:?}");
        }
    }
}
