use clap::Subcommand;
use serde_json::json;

use crate::cli::client::RpcClient;
use crate::cli::{utils, OutputFormat};
use crate::database::Column;

#[derive(Subcommand)]
pub enum ColumnCommands {
    #[command(about = "List the columns of a project in board order")]
    List {
        #[arg(help = "Project ID")]
        project_id: i64,
    },

    #[command(about = "Show a single column")]
    Get {
        #[arg(help = "Column ID")]
        column_id: i64,
    },

    #[command(about = "Append a column to a project's board")]
    Add {
        #[arg(help = "Project ID")]
        project_id: i64,
        #[arg(help = "Column title")]
        title: String,
        #[arg(long, default_value_t = 0, help = "Maximum number of tasks (0 = unlimited)")]
        task_limit: i32,
        #[arg(long, default_value = "", help = "Column description")]
        description: String,
    },

    #[command(about = "Replace a column's title, task limit and description")]
    Update {
        #[arg(help = "Column ID")]
        column_id: i64,
        #[arg(help = "Column title")]
        title: String,
        #[arg(long, default_value_t = 0, help = "Maximum number of tasks (0 = unlimited)")]
        task_limit: i32,
        #[arg(long, default_value = "", help = "Column description")]
        description: String,
    },

    #[command(about = "Remove a column and all of its tasks")]
    Remove {
        #[arg(help = "Column ID")]
        column_id: i64,
    },

    #[command(about = "Move a column to a new 1-based position")]
    Move {
        #[arg(help = "Project ID")]
        project_id: i64,
        #[arg(help = "Column ID")]
        column_id: i64,
        #[arg(help = "New position")]
        position: i32,
    },
}

pub async fn handle(cmd: ColumnCommands, client: &RpcClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ColumnCommands::List { project_id } => {
            let columns: Vec<Column> = client.call("getColumns", json!({ "project_id": project_id })).await?;
            utils::output_columns(&output_format, &columns)
        }
        ColumnCommands::Get { column_id } => {
            let column: Option<Column> = client.call("getColumn", json!({ "column_id": column_id })).await?;
            utils::output_column(&output_format, column.as_ref())
        }
        ColumnCommands::Add {
            project_id,
            title,
            task_limit,
            description,
        } => {
            let column_id: i64 = client
                .call(
                    "addColumn",
                    json!({
                        "project_id": project_id,
                        "title": title,
                        "task_limit": task_limit,
                        "description": description,
                    }),
                )
                .await?;
            utils::output_success(
                &output_format,
                &format!("Column '{}' created with id {}", title, column_id),
                Some(json!({ "column_id": column_id })),
            )
        }
        ColumnCommands::Update {
            column_id,
            title,
            task_limit,
            description,
        } => {
            let updated: bool = client
                .call(
                    "updateColumn",
                    json!({
                        "column_id": column_id,
                        "title": title,
                        "task_limit": task_limit,
                        "description": description,
                    }),
                )
                .await?;
            report(&output_format, updated, &format!("Column {} updated", column_id), "Column not updated")
        }
        ColumnCommands::Remove { column_id } => {
            let removed: bool = client.call("removeColumn", json!({ "column_id": column_id })).await?;
            report(&output_format, removed, &format!("Column {} removed", column_id), "Column not removed")
        }
        ColumnCommands::Move {
            project_id,
            column_id,
            position,
        } => {
            let moved: bool = client
                .call(
                    "changeColumnPosition",
                    json!({
                        "project_id": project_id,
                        "column_id": column_id,
                        "position": position,
                    }),
                )
                .await?;
            report(
                &output_format,
                moved,
                &format!("Column {} moved to position {}", column_id, position),
                "Column not moved (unknown column or position out of range)",
            )
        }
    }
}

fn report(output_format: &OutputFormat, ok: bool, success: &str, failure: &str) -> anyhow::Result<()> {
    if ok {
        utils::output_success(output_format, success, None)
    } else {
        utils::output_failure(output_format, failure)
    }
}
