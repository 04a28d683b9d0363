use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "platoon-sim", about = "Runs the convoy abandon-maneuver scenario")]
pub struct Cli {
    /// Scenario config file; built-in defaults are used when absent.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// How long to run the simulation, in seconds.
    #[arg(short, long, default_value_t = 10)]
    pub run_for: u64,

    /// Write the default config to the given path and exit.
    #[arg(long)]
    pub init: Option<PathBuf>,
}
