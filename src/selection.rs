// ABOUTME: Table selection rules for backup jobs
// ABOUTME: Resolves include/exclude intents against the live catalog

use crate::error::{BackupError, Result};
use std::collections::BTreeSet;

/// Which tables a job covers.
///
/// Include and exclude are mutually exclusive intents; the job builder
/// rejects configurations carrying both, so a resolved selection always has
/// one unambiguous meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TableSelection {
    /// Every table in the catalog.
    #[default]
    All,
    /// Only the named tables, kept in catalog order.
    Include(Vec<String>),
    /// Every table except the named ones.
    Exclude(Vec<String>),
}

impl TableSelection {
    /// Resolves the selection against the catalog listing.
    ///
    /// The output preserves catalog order and is de-duplicated. Include
    /// names missing from the catalog are dropped silently. An empty result
    /// is [`BackupError::NoTablesSelected`]: no dump or restore may start
    /// without at least one table.
    pub fn resolve(&self, catalog: &[String]) -> Result<Vec<String>> {
        let selected = match self {
            TableSelection::All => dedup_in_order(catalog.iter()),
            TableSelection::Include(names) => {
                let wanted: BTreeSet<&str> = names.iter().map(String::as_str).collect();
                dedup_in_order(catalog.iter().filter(|t| wanted.contains(t.as_str())))
            }
            TableSelection::Exclude(names) => {
                let unwanted: BTreeSet<&str> = names.iter().map(String::as_str).collect();
                dedup_in_order(catalog.iter().filter(|t| !unwanted.contains(t.as_str())))
            }
        };

        if selected.is_empty() {
            return Err(BackupError::NoTablesSelected);
        }
        Ok(selected)
    }

    pub fn is_all(&self) -> bool {
        matches!(self, TableSelection::All)
    }
}

fn dedup_in_order<'a, I>(names: I) -> Vec<String>
where
    I: Iterator<Item = &'a String>,
{
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for name in names {
        if seen.insert(name.as_str()) {
            out.push(name.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<String> {
        vec![
            "users".to_string(),
            "orders".to_string(),
            "logs".to_string(),
        ]
    }

    #[test]
    fn all_keeps_the_whole_catalog_in_order() {
        let resolved = TableSelection::All.resolve(&catalog()).unwrap();
        assert_eq!(resolved, vec!["users", "orders", "logs"]);
    }

    #[test]
    fn include_keeps_catalog_order_not_request_order() {
        let selection =
            TableSelection::Include(vec!["logs".to_string(), "users".to_string()]);
        let resolved = selection.resolve(&catalog()).unwrap();
        assert_eq!(resolved, vec!["users", "logs"]);
    }

    #[test]
    fn include_drops_names_missing_from_the_catalog() {
        let selection =
            TableSelection::Include(vec!["users".to_string(), "ghost".to_string()]);
        let resolved = selection.resolve(&catalog()).unwrap();
        assert_eq!(resolved, vec!["users"]);
    }

    #[test]
    fn include_with_no_catalog_match_is_an_error() {
        let selection = TableSelection::Include(vec!["ghost".to_string()]);
        let err = selection.resolve(&catalog()).unwrap_err();
        assert!(matches!(err, BackupError::NoTablesSelected));
    }

    #[test]
    fn exclude_removes_only_the_named_tables() {
        let selection = TableSelection::Exclude(vec!["logs".to_string()]);
        let resolved = selection.resolve(&catalog()).unwrap();
        assert_eq!(resolved, vec!["users", "orders"]);
    }

    #[test]
    fn exclude_of_everything_is_an_error() {
        let selection = TableSelection::Exclude(catalog());
        let err = selection.resolve(&catalog()).unwrap_err();
        assert!(matches!(err, BackupError::NoTablesSelected));
    }

    #[test]
    fn empty_catalog_is_an_error_even_for_all() {
        let err = TableSelection::All.resolve(&[]).unwrap_err();
        assert!(matches!(err, BackupError::NoTablesSelected));
    }

    #[test]
    fn duplicate_include_names_resolve_once() {
        let selection =
            TableSelection::Include(vec!["users".to_string(), "users".to_string()]);
        let resolved = selection.resolve(&catalog()).unwrap();
        assert_eq!(resolved, vec!["users"]);
    }
}
