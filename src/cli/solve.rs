use clap::Parser;
use serde::Serialize;

use crate::{
    cli::{demand::DemandArgs, powertrain::PowertrainArgs},
    core::{solver::Solver, step::Step, summary::PlanSummary},
    prelude::*,
    tables::build_steps_table,
};

#[derive(Parser)]
pub struct SolveArgs {
    #[clap(flatten)]
    pub powertrain: PowertrainArgs,

    #[clap(flatten)]
    pub demand: DemandArgs,

    /// Print the plan as JSON instead of the tables.
    #[clap(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct Plan<'a> {
    steps: &'a [Step],
    summary: PlanSummary,
}

#[instrument(skip_all)]
pub fn solve(args: &SolveArgs) -> Result {
    let powertrain = args.powertrain.powertrain()?;
    let soc_grid = args.powertrain.soc_grid()?;
    let engine_powers = args.powertrain.engine_powers()?;
    let demand = args.demand.load()?;
    let initial_soc = args.powertrain.initial_soc()?;

    let solution = Solver::builder()
        .powertrain(&powertrain)
        .soc_grid(&soc_grid)
        .engine_powers(&engine_powers)
        .demand(&demand)
        .maybe_horizon(args.demand.horizon)
        .solve()?;
    debug!(cost_to_go = ?solution.cost_to_go(0, initial_soc), %initial_soc, "planned");
    let steps = solution.backtrack(initial_soc).context("failed to extract the plan")?;
    let summary = PlanSummary::new(initial_soc, &steps);
    info!(total_cost = %summary.total_cost(), final_soc = %summary.final_soc, "solved");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&Plan { steps: &steps, summary })?);
    } else {
        println!("{}", build_steps_table(&steps, powertrain.max_battery_power));
        println!("{summary}");
    }
    Ok(())
}
