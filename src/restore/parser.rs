// ABOUTME: Line-oriented statement splitting and CREATE TABLE discovery
// ABOUTME: Tolerates comments, blank lines, and CRLF endings in dump documents

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

static CREATE_TABLE_RE: OnceLock<Regex> = OnceLock::new();

fn create_table_re() -> &'static Regex {
    // Line-anchored, case-insensitive, and `.` spans newlines so a name on
    // the line after CREATE TABLE is still captured.
    CREATE_TABLE_RE
        .get_or_init(|| Regex::new(r"(?ims)^CREATE TABLE.*?`([^`]+)`").expect("valid pattern"))
}

/// Splits a dump document into executable statements.
///
/// Works line by line: empty lines and `--` comment lines are skipped,
/// anything else accumulates into the current statement, and a buffer whose
/// trimmed text ends in `;` completes one statement. Deliberately naive: it
/// does not understand semicolons inside string literals or block comments.
/// The generator never emits those (cell newlines and quotes are escaped),
/// but hand-edited documents can confuse it. Trailing text without a
/// terminator is dropped with a warning.
pub fn split_statements(document: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut buffer = String::new();

    for raw_line in document.lines() {
        let line = raw_line.trim_end_matches('\r');
        if line.is_empty() || line.starts_with("--") {
            continue;
        }
        if !buffer.is_empty() {
            buffer.push('\n');
        }
        buffer.push_str(line);
        if buffer.trim_end().ends_with(';') {
            statements.push(std::mem::take(&mut buffer));
        }
    }

    if !buffer.trim().is_empty() {
        tracing::warn!(
            "Discarding {} byte(s) of unterminated trailing SQL",
            buffer.len()
        );
    }

    statements
}

/// Finds every table name the document creates, in first-occurrence order,
/// de-duplicated. Matches both the plain and `IF NOT EXISTS` forms, with the
/// backticked name on the same or a following line.
pub fn created_table_names(document: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut names = Vec::new();
    for capture in create_table_re().captures_iter(document) {
        let name = capture[1].to_string();
        if seen.insert(name.clone()) {
            names.push(name);
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_single_line_statements() {
        let doc = "SET NAMES 'utf8';\nDROP TABLE x;\n";
        assert_eq!(
            split_statements(doc),
            vec!["SET NAMES 'utf8';", "DROP TABLE x;"]
        );
    }

    #[test]
    fn accumulates_multi_line_statements() {
        let doc = "CREATE TABLE `t` (\n  `id` int\n);\n";
        assert_eq!(
            split_statements(doc),
            vec!["CREATE TABLE `t` (\n  `id` int\n);"]
        );
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let doc = "-- banner\n--\n\nSELECT 1;\n\n-- trailer\n";
        assert_eq!(split_statements(doc), vec!["SELECT 1;"]);
    }

    #[test]
    fn comment_lines_inside_a_statement_are_dropped() {
        let doc = "INSERT INTO t VALUES\n-- noise\n(\"1\");\n";
        assert_eq!(split_statements(doc), vec!["INSERT INTO t VALUES\n(\"1\");"]);
    }

    #[test]
    fn handles_crlf_line_endings() {
        let doc = "SET NAMES 'utf8';\r\nDROP TABLE x;\r\n";
        assert_eq!(
            split_statements(doc),
            vec!["SET NAMES 'utf8';", "DROP TABLE x;"]
        );
    }

    #[test]
    fn unterminated_trailing_text_is_discarded() {
        let doc = "SELECT 1;\nSELECT 2 FROM t";
        assert_eq!(split_statements(doc), vec!["SELECT 1;"]);
    }

    #[test]
    fn unterminated_set_merges_into_the_next_statement() {
        // Legacy header shape: the SET line lacks a terminator and rides
        // into the first real statement instead of crashing the splitter.
        let doc = "SET time_zone = \"+00:00\"\nCREATE TABLE `t` (`id` int);\n";
        let statements = split_statements(doc);
        assert_eq!(statements.len(), 1);
        assert!(statements[0].starts_with("SET time_zone"));
        assert!(statements[0].ends_with(");"));
    }

    #[test]
    fn finds_created_tables_in_order() {
        let doc = "\
CREATE TABLE IF NOT EXISTS `users` (\n  `id` int\n);\n\n\
CREATE TABLE `logs` (`id` int);\n";
        assert_eq!(created_table_names(doc), vec!["users", "logs"]);
    }

    #[test]
    fn create_matching_is_case_insensitive() {
        let doc = "create table `lower` (`id` int);\n";
        assert_eq!(created_table_names(doc), vec!["lower"]);
    }

    #[test]
    fn name_on_a_following_line_is_captured() {
        let doc = "CREATE TABLE\n`wrapped` (`id` int);\n";
        assert_eq!(created_table_names(doc), vec!["wrapped"]);
    }

    #[test]
    fn duplicate_creates_yield_one_name() {
        let doc = "CREATE TABLE `t` (`id` int);\nCREATE TABLE `t` (`id` int);\n";
        assert_eq!(created_table_names(doc), vec!["t"]);
    }

    #[test]
    fn create_table_text_inside_data_lines_is_ignored() {
        let doc = "INSERT INTO t VALUES\n(\"CREATE TABLE `evil` (x int)\");\n";
        assert!(created_table_names(doc).is_empty());
    }
}
