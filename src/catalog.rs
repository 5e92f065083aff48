// ABOUTME: Live-schema table catalog built on top of a Connection
// ABOUTME: Lists tables in server order and describes their shape on demand

use crate::connection::Connection;
use crate::error::Result;

/// Snapshot of one table's shape, derived from the live schema at call time.
/// Never persisted; row counts are whatever the server reports right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    pub name: String,
    pub column_count: usize,
    pub row_count: u64,
}

/// Lists the tables visible on the connection, in server order.
///
/// An empty database is an empty list; callers decide whether that is fatal
/// (the selector does, once filters are applied).
pub async fn list_tables<C>(conn: &mut C) -> Result<Vec<String>>
where
    C: Connection + ?Sized,
{
    let tables = conn.list_tables().await?;
    tracing::debug!("Discovered {} table(s)", tables.len());
    Ok(tables)
}

/// Describes every named table: column count and approximate row count.
pub async fn describe_tables<C>(conn: &mut C, names: &[String]) -> Result<Vec<TableInfo>>
where
    C: Connection + ?Sized,
{
    let mut infos = Vec::with_capacity(names.len());
    for name in names {
        infos.push(conn.table_info(name).await?);
    }
    Ok(infos)
}
