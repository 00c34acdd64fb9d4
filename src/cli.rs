mod demand;
mod inspect;
mod powertrain;
mod solve;

use clap::{Parser, Subcommand};

pub use self::{inspect::inspect, solve::solve};
use crate::cli::{inspect::InspectArgs, solve::SolveArgs};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: optimize the engine and battery split, and print the plan.
    #[clap(name = "solve")]
    Solve(Box<SolveArgs>),

    /// Print the cost-to-go and policy of every SOC state at a single time step.
    #[clap(name = "inspect")]
    Inspect(Box<InspectArgs>),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;
    use crate::quantity::soc::StateOfCharge;

    #[test]
    fn verify_args() {
        Args::command().debug_assert();
    }

    #[test]
    fn parse_solve_ok() {
        let args = Args::try_parse_from([
            "powersplit",
            "solve",
            "--demand",
            "30,42.5,0",
            "--min-battery-power",
            "-40",
            "--json",
        ])
        .unwrap();
        let Command::Solve(args) = args.command else {
            panic!("expected the `solve` command");
        };
        assert!(args.json);
        assert_eq!(args.powertrain.min_battery_power.0, -40.0);
        assert_eq!(args.demand.demand.len(), 3);
    }

    #[test]
    fn parse_inspect_ok() {
        let args =
            Args::try_parse_from(["powersplit", "inspect", "--demand", "30,30", "--time-step", "1"])
                .unwrap();
        let Command::Inspect(args) = args.command else {
            panic!("expected the `inspect` command");
        };
        assert_eq!(args.time_step, 1);
    }

    #[test]
    fn initial_soc_defaults_to_midpoint() {
        let args = Args::try_parse_from(["powersplit", "solve", "--demand", "30"]).unwrap();
        let Command::Solve(args) = args.command else {
            panic!("expected the `solve` command");
        };
        assert_eq!(args.powertrain.initial_soc().unwrap(), StateOfCharge(0.5));
    }

    #[test]
    fn initial_soc_out_of_bounds_is_rejected() {
        let args =
            Args::try_parse_from(["powersplit", "solve", "--demand", "30", "--initial-soc", "0.9"])
                .unwrap();
        let Command::Solve(args) = args.command else {
            panic!("expected the `solve` command");
        };
        assert!(args.powertrain.initial_soc().is_err());
    }
}
