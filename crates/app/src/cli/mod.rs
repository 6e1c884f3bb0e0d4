use clap::{Parser, Subcommand};
use rebate_app::{config::LoggingConfig, observability};

mod db;
mod resolve;
mod response;

#[derive(Debug, Parser)]
#[command(name = "rebate-app", about = "Rebate discount resolution CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve a discount or gift card code and print the result as JSON
    Resolve(resolve::ResolveArgs),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        observability::init_logging(&self.logging).map_err(|error| error.to_string())?;

        match self.command {
            Commands::Resolve(args) => resolve::run(args).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}
