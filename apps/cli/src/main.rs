mod commands;
mod config;
mod main_lib;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use commands::{run_accounts, run_goals, AccountsArgs, GoalsArgs};
use config::Config;
use main_lib::{build_client, init_tracing};

/// Command-line client for Cashly accounts and goals.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List linked accounts, filtered and sorted
    Accounts(AccountsArgs),
    /// Show progress toward savings goals
    Goals(GoalsArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    let client = Arc::new(build_client(&config)?);
    let output = match &cli.command {
        Command::Accounts(args) => run_accounts(client.as_ref(), args).await?,
        Command::Goals(args) => run_goals(client.as_ref(), client.clone(), args).await?,
    };
    print!("{}", output);
    Ok(())
}
