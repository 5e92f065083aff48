// ABOUTME: Parses export configuration files for selection and row filters
// ABOUTME: Converts TOML settings into the pieces an export job is built from

use crate::error::{BackupError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Export settings read from a TOML file. Command-line flags override
/// anything set here.
#[derive(Debug, Deserialize, Default)]
pub struct ExportConfig {
    pub chunk_size: Option<usize>,
    pub include_tables: Option<Vec<String>>,
    pub exclude_tables: Option<Vec<String>>,
    #[serde(default)]
    pub table_filters: Vec<TableFilterConfig>,
}

/// Per-table row restriction from the config file.
#[derive(Debug, Deserialize)]
pub struct TableFilterConfig {
    pub table: String,
    #[serde(rename = "where")]
    pub predicate: Option<String>,
    pub limit: Option<u64>,
}

pub fn load_export_config(path: &Path) -> Result<ExportConfig> {
    let raw = fs::read_to_string(path).map_err(|e| {
        BackupError::invalid_job(format!(
            "Failed to read config file at {}: {}",
            path.display(),
            e
        ))
    })?;
    let parsed: ExportConfig = toml::from_str(&raw).map_err(|e| {
        BackupError::invalid_job(format!(
            "Failed to parse TOML config at {}: {}",
            path.display(),
            e
        ))
    })?;
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn parse_sample_config() {
        let mut tmp = NamedTempFile::new().unwrap();
        let contents = r#"
            chunk_size = 250
            exclude_tables = ["sessions", "cache"]

            [[table_filters]]
            table = "posts"
            where = "type = 'post'"
            limit = 1000

            [[table_filters]]
            table = "logs"
            limit = 500
        "#;
        use std::io::Write;
        write!(tmp, "{}", contents).unwrap();

        let config = load_export_config(tmp.path()).unwrap();
        assert_eq!(config.chunk_size, Some(250));
        assert_eq!(
            config.exclude_tables,
            Some(vec!["sessions".to_string(), "cache".to_string()])
        );
        assert!(config.include_tables.is_none());
        assert_eq!(config.table_filters.len(), 2);
        assert_eq!(config.table_filters[0].table, "posts");
        assert_eq!(
            config.table_filters[0].predicate.as_deref(),
            Some("type = 'post'")
        );
        assert_eq!(config.table_filters[0].limit, Some(1000));
        assert!(config.table_filters[1].predicate.is_none());
    }

    #[test]
    fn empty_config_yields_defaults() {
        let tmp = NamedTempFile::new().unwrap();

        let config = load_export_config(tmp.path()).unwrap();
        assert!(config.chunk_size.is_none());
        assert!(config.include_tables.is_none());
        assert!(config.exclude_tables.is_none());
        assert!(config.table_filters.is_empty());
    }

    #[test]
    fn invalid_toml_is_rejected_with_path() {
        let mut tmp = NamedTempFile::new().unwrap();
        use std::io::Write;
        write!(tmp, "chunk_size = [not toml").unwrap();

        let err = load_export_config(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML config"));
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let err = load_export_config(Path::new("/nonexistent/backup.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/backup.toml"));
    }
}
