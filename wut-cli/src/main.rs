//! WUT CLI - Command line tool for the household water usage chart.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "wut-cli",
    version,
    about = "Household water usage chart toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: wut_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("Starting wut-cli");
    wut_cmd::run(cli.command)
}
