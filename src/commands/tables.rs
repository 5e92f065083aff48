// ABOUTME: Tables command: lists the database's tables with basic stats
// ABOUTME: Useful for deciding what to include or exclude before an export

use crate::catalog;
use crate::mysql::MysqlConnection;
use anyhow::{Context, Result};

/// List every table in the connected database with column and row counts.
pub async fn tables(url: &str) -> Result<()> {
    let mut conn = MysqlConnection::connect(url)
        .await
        .context("Failed to connect to MySQL")?;
    let database = conn.database().to_string();

    let names = catalog::list_tables(&mut conn).await?;

    if names.is_empty() {
        println!("Database '{}' has no tables", database);
    } else {
        let infos = catalog::describe_tables(&mut conn, &names).await?;

        println!("Tables in '{}':", database);
        for info in &infos {
            println!(
                "  {} ({} columns, ~{} rows)",
                info.name, info.column_count, info.row_count
            );
        }
        println!();
        println!("{} table(s)", infos.len());
    }

    if let Err(e) = conn.disconnect().await {
        tracing::debug!("Error closing connection: {}", e);
    }

    Ok(())
}
