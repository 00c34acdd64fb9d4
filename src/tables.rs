use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::{grid::SocGrid, solution_space::SolutionSpace, step::Step},
    quantity::power::Kilowatts,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

pub fn build_steps_table(steps: &[Step], max_battery_power: Kilowatts) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Step", "Demand", "Engine", "Battery", "Before", "After", "Fuel", "Penalty", "Cost",
        "Planned",
    ]);
    for step in steps {
        table.add_row(vec![
            Cell::new(step.time_step).add_attribute(Attribute::Dim),
            Cell::new(step.demand).set_alignment(CellAlignment::Right),
            Cell::new(step.engine_power).set_alignment(CellAlignment::Right),
            Cell::new(step.battery_power).set_alignment(CellAlignment::Right).fg(
                if step.is_charging() {
                    Color::Green
                } else if step.battery_power >= max_battery_power {
                    Color::Red
                } else if step.is_discharging() {
                    Color::DarkYellow
                } else {
                    Color::Reset
                },
            ),
            Cell::new(step.soc_before).set_alignment(CellAlignment::Right),
            Cell::new(step.soc_after).set_alignment(CellAlignment::Right),
            Cell::new(step.fuel_cost).set_alignment(CellAlignment::Right),
            Cell::new(step.battery_penalty).set_alignment(CellAlignment::Right),
            Cell::new(step.cost()).set_alignment(CellAlignment::Right).add_attribute(Attribute::Bold),
            Cell::new(step.planned_cost_to_go)
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
        ]);
    }
    table
}

/// Cost-to-go and policy of every SOC level at the time step, highest SOC on top.
pub fn build_cost_to_go_table(space: &SolutionSpace, soc_grid: &SocGrid, time_step: usize) -> Table {
    let is_terminal = time_step + 1 == space.horizon();
    let mut table = new_table();
    table.set_header(vec!["Level", "SOC", "Cost-to-go", "Engine"]);
    for (level, soc) in soc_grid.iter().rev() {
        let cost_cell = space.cost_to_go(time_step, level).cost().map_or_else(
            || Cell::new("unreachable").fg(Color::Red),
            |cost| Cell::new(cost).set_alignment(CellAlignment::Right),
        );
        let engine_cell = if is_terminal || !space.cost_to_go(time_step, level).is_reachable() {
            Cell::new("–").add_attribute(Attribute::Dim)
        } else {
            Cell::new(space.policy(time_step, level)).set_alignment(CellAlignment::Right)
        };
        table.add_row(vec![
            Cell::new(format!("{level:?}")).add_attribute(Attribute::Dim),
            Cell::new(soc),
            cost_cell,
            engine_cell,
        ]);
    }
    table
}
