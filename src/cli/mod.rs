pub mod client;
pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "kanban")]
#[command(about = "Kanban CLI - command-line client for the column JSON-RPC API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(
        long,
        global = true,
        env = "KANBAN_API_URL",
        default_value = "http://127.0.0.1:3000",
        help = "Base URL of the API server"
    )]
    pub url: String,

    #[arg(long, global = true, env = "KANBAN_API_TOKEN", hide_env_values = true, help = "Bearer token")]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Mint a JWT signed with the configured secret")]
    Token {
        #[command(flatten)]
        args: commands::token::TokenArgs,
    },

    #[command(about = "Manage the columns of a project")]
    Columns {
        #[command(subcommand)]
        cmd: commands::columns::ColumnCommands,
    },

    #[command(about = "Database maintenance")]
    Db {
        #[command(subcommand)]
        cmd: commands::db::DbCommands,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Token { args } => commands::token::handle(args, output_format),
        Commands::Columns { cmd } => {
            let client = client::RpcClient::new(&cli.url, cli.token)?;
            commands::columns::handle(cmd, &client, output_format).await
        }
        Commands::Db { cmd } => commands::db::handle(cmd, output_format).await,
    }
}
