use clap::Parser;

use crate::{
    cli::{demand::DemandArgs, powertrain::PowertrainArgs},
    core::solver::Solver,
    prelude::*,
    tables::build_cost_to_go_table,
};

#[derive(Parser)]
pub struct InspectArgs {
    #[clap(flatten)]
    pub powertrain: PowertrainArgs,

    #[clap(flatten)]
    pub demand: DemandArgs,

    /// Time step to inspect.
    #[clap(long, default_value = "0", env = "TIME_STEP")]
    pub time_step: usize,
}

#[instrument(skip_all, fields(time_step = args.time_step))]
pub fn inspect(args: &InspectArgs) -> Result {
    let powertrain = args.powertrain.powertrain()?;
    let soc_grid = args.powertrain.soc_grid()?;
    let engine_powers = args.powertrain.engine_powers()?;
    let demand = args.demand.load()?;
    ensure!(
        args.time_step < demand.len(),
        "time step #{} is beyond the horizon ({})",
        args.time_step,
        demand.len(),
    );

    let solution = Solver::builder()
        .powertrain(&powertrain)
        .soc_grid(&soc_grid)
        .engine_powers(&engine_powers)
        .demand(&demand)
        .maybe_horizon(args.demand.horizon)
        .solve()?;
    let space = solution.space();
    info!(n_reachable = space.n_reachable(args.time_step), "inspecting…");
    println!("{}", build_cost_to_go_table(space, solution.soc_grid(), args.time_step));
    Ok(())
}
