// ABOUTME: Database collaborator contract consumed by the dump and restore engines
// ABOUTME: Covers table listing, DDL capture, row streaming, and statement execution

use crate::catalog::TableInfo;
use crate::error::Result;
use crate::job::RowFilter;
use async_trait::async_trait;

/// A single result row. Cells arrive in column order; `None` is SQL NULL,
/// everything else carries the server's text rendering of the value.
pub type Row = Vec<Option<String>>;

/// One live database session.
///
/// Every method takes `&mut self`: a session serves exactly one job at a
/// time, and the borrow checker enforces what the server would otherwise
/// punish with interleaved result sets.
#[async_trait]
pub trait Connection: Send {
    /// Lists the tables of the connected database, in the order the server
    /// reports them. An empty database yields an empty list, not an error.
    async fn list_tables(&mut self) -> Result<Vec<String>>;

    /// Returns the server's own CREATE statement for `table`, without a
    /// trailing terminator.
    async fn create_statement(&mut self, table: &str) -> Result<String>;

    /// Column and approximate row counts for `table`.
    async fn table_info(&mut self, table: &str) -> Result<TableInfo>;

    /// Opens a pull cursor over the rows of `table`, honoring the WHERE and
    /// LIMIT pieces of `filter` when present. The session stays exclusively
    /// borrowed until the cursor is dropped.
    async fn open_rows<'a>(
        &'a mut self,
        table: &str,
        filter: Option<&RowFilter>,
    ) -> Result<Box<dyn RowCursor + Send + 'a>>;

    /// Executes one statement. A server-side rejection comes back as
    /// [`BackupError::Statement`]; a broken session as
    /// [`BackupError::Connection`].
    ///
    /// [`BackupError::Statement`]: crate::error::BackupError::Statement
    /// [`BackupError::Connection`]: crate::error::BackupError::Connection
    async fn execute(&mut self, statement: &str) -> Result<()>;

    /// Human-readable server version string for the dump banner.
    async fn server_version(&mut self) -> Result<String>;
}

/// Pull-based row stream; rows are fetched only as the caller asks for them.
#[async_trait]
pub trait RowCursor {
    /// Next row, or `None` once the result set is exhausted.
    async fn next_row(&mut self) -> Result<Option<Row>>;
}
