use clap::Subcommand;

use crate::cli::{utils, OutputFormat};
use crate::config;
use crate::database::DatabaseManager;

#[derive(Subcommand)]
pub enum DbCommands {
    #[command(about = "Create the tables if they do not exist yet")]
    Migrate,

    #[command(about = "Check that the database answers")]
    Ping,
}

pub async fn handle(cmd: DbCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let pool = DatabaseManager::from_config(&config::config().database).await?;

    match cmd {
        DbCommands::Migrate => {
            DatabaseManager::migrate(&pool).await?;
            utils::output_success(&output_format, "Database schema is up to date", None)
        }
        DbCommands::Ping => {
            DatabaseManager::health_check(&pool).await?;
            utils::output_success(&output_format, "Database is reachable", None)
        }
    }
}
