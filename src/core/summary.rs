use std::fmt::{Display, Formatter};

use comfy_table::{Attribute, Cell, Color, Table, modifiers, presets};
use serde::Serialize;

use crate::{
    core::step::Step,
    quantity::{cost::Cost, power::Kilowatts, soc::StateOfCharge},
};

/// Totals over the replayed plan.
#[must_use]
#[derive(Copy, Clone, Debug, Serialize)]
pub struct PlanSummary {
    pub n_steps: usize,

    pub fuel_cost: Cost,
    pub battery_penalty: Cost,

    /// Cost-to-go of the initial state, as planned by the solver.
    ///
    /// It may deviate from the actual total cost because of the grid snapping.
    pub planned_cost: Option<Cost>,

    /// Sum of the charging power over the steps, positive.
    pub charged: Kilowatts,

    /// Sum of the discharging power over the steps.
    pub discharged: Kilowatts,

    pub initial_soc: StateOfCharge,
    pub final_soc: StateOfCharge,
}

impl PlanSummary {
    pub fn new(initial_soc: StateOfCharge, steps: &[Step]) -> Self {
        let mut summary = Self {
            n_steps: steps.len(),
            fuel_cost: Cost::ZERO,
            battery_penalty: Cost::ZERO,
            planned_cost: steps.first().map(|step| step.planned_cost_to_go),
            charged: Kilowatts::ZERO,
            discharged: Kilowatts::ZERO,
            initial_soc,
            final_soc: steps.last().map_or(initial_soc, |step| step.soc_after),
        };
        for step in steps {
            summary.fuel_cost += step.fuel_cost;
            summary.battery_penalty += step.battery_penalty;
            if step.is_charging() {
                summary.charged -= step.battery_power;
            } else if step.is_discharging() {
                summary.discharged += step.battery_power;
            }
        }
        summary
    }

    pub fn total_cost(&self) -> Cost {
        self.fuel_cost + self.battery_penalty
    }

    pub fn soc_swing(&self) -> StateOfCharge {
        self.final_soc - self.initial_soc
    }
}

impl Display for PlanSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL_CONDENSED)
            .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
            .enforce_styling()
            .set_header(vec![
                Cell::from("Steps"),
                Cell::from("Total cost"),
                Cell::from("Planned"),
                Cell::from("Fuel"),
                Cell::from("Battery"),
                Cell::from("Charged"),
                Cell::from("Discharged"),
                Cell::from("Final SOC"),
                Cell::from("Swing"),
            ])
            .add_row(vec![
                Cell::from(self.n_steps),
                Cell::from(self.total_cost()).add_attribute(Attribute::Bold),
                self.planned_cost.map_or_else(
                    || Cell::from("n/a").add_attribute(Attribute::Dim),
                    Cell::from,
                ),
                Cell::from(self.fuel_cost),
                Cell::from(self.battery_penalty),
                Cell::from(self.charged).fg(Color::Green),
                Cell::from(self.discharged).fg(Color::Red),
                Cell::from(self.final_soc),
                Cell::from(self.soc_swing()).fg(if self.soc_swing() >= StateOfCharge::ZERO {
                    Color::Green
                } else {
                    Color::Red
                }),
            ]);
        write!(f, "{table}")
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn step(time_step: usize, engine_power: f64, battery_power: f64, soc_after: f64) -> Step {
        Step {
            time_step,
            demand: Kilowatts(engine_power + battery_power),
            engine_power: Kilowatts(engine_power),
            battery_power: Kilowatts(battery_power),
            soc_before: StateOfCharge(0.5),
            soc_after: StateOfCharge(soc_after),
            fuel_cost: Cost(engine_power),
            battery_penalty: Cost(battery_power.abs() / 100.0),
            planned_cost_to_go: Cost(42.0),
        }
    }

    #[test]
    fn new_ok() {
        let steps = [step(0, 10.0, 20.0, 0.48), step(1, 35.0, -5.0, 0.49), step(2, 30.0, 0.0, 0.49)];
        let summary = PlanSummary::new(StateOfCharge(0.5), &steps);
        assert_eq!(summary.n_steps, 3);
        assert_eq!(summary.fuel_cost, Cost(75.0));
        assert_abs_diff_eq!(summary.battery_penalty.0, 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(summary.total_cost().0, 75.25, epsilon = 1e-12);
        assert_eq!(summary.planned_cost, Some(Cost(42.0)));
        assert_eq!(summary.charged, Kilowatts(5.0));
        assert_eq!(summary.discharged, Kilowatts(20.0));
        assert_eq!(summary.final_soc, StateOfCharge(0.49));
        assert_abs_diff_eq!(summary.soc_swing().0, -0.01, epsilon = 1e-12);
    }

    #[test]
    fn empty_ok() {
        let summary = PlanSummary::new(StateOfCharge(0.5), &[]);
        assert_eq!(summary.total_cost(), Cost::ZERO);
        assert_eq!(summary.planned_cost, None);
        assert_eq!(summary.final_soc, StateOfCharge(0.5));
    }

    #[test]
    fn display_ok() {
        let summary = PlanSummary::new(StateOfCharge(0.5), &[step(0, 10.0, 20.0, 0.48)]);
        let rendered = summary.to_string();
        assert!(rendered.contains("Total cost"), "{rendered}");
        assert!(rendered.contains("20.00 kW"), "{rendered}");
    }
}
