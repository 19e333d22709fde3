use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::database::Column;

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(data_value) = data {
                response["data"] = data_value;
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output a failed boolean procedure (the server answered `false`)
pub fn output_failure(output_format: &OutputFormat, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "success": false,
                    "error": message
                }))?
            );
        }
        OutputFormat::Text => {
            eprintln!("✗ {}", message);
        }
    }
    Ok(())
}

/// Output a list of columns as a table or JSON array
pub fn output_columns(output_format: &OutputFormat, columns: &[Column]) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ "columns": columns }))?);
        }
        OutputFormat::Text => {
            if columns.is_empty() {
                println!("No columns");
                return Ok(());
            }
            println!("{:>4}  {:>6}  {:<24}  {:>5}  DESCRIPTION", "POS", "ID", "TITLE", "LIMIT");
            for column in columns {
                println!("{}", column_row(column));
            }
        }
    }
    Ok(())
}

pub fn output_column(output_format: &OutputFormat, column: Option<&Column>) -> anyhow::Result<()> {
    match (output_format, column) {
        (OutputFormat::Json, _) => {
            println!("{}", serde_json::to_string_pretty(&json!({ "column": column }))?);
        }
        (OutputFormat::Text, Some(column)) => {
            println!("Column {}: {}", column.id, column.title);
            println!("Project: {}", column.project_id);
            println!("Position: {}", column.position);
            println!("Task limit: {}", format_limit(column.task_limit));
            if !column.description.is_empty() {
                println!("Description: {}", column.description);
            }
        }
        (OutputFormat::Text, None) => {
            println!("Column not found");
        }
    }
    Ok(())
}

fn column_row(column: &Column) -> String {
    format!(
        "{:>4}  {:>6}  {:<24}  {:>5}  {}",
        column.position,
        column.id,
        column.title,
        format_limit(column.task_limit),
        column.description
    )
}

fn format_limit(task_limit: i32) -> String {
    if task_limit == 0 {
        "-".to_string()
    } else {
        task_limit.to_string()
    }
}
