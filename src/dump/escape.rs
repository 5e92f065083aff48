// ABOUTME: Cell escaping and SQL text helpers for dump generation
// ABOUTME: Keeps emitted documents line-delimited and safe to replay

/// Escapes one raw cell for embedding in a double-quoted SQL string literal.
///
/// Backslashes, both quote kinds, and NUL bytes gain a leading backslash;
/// literal newlines become the two-character `\n` sequence so the emitted
/// document stays line-delimited. The server undoes all of this when the
/// statement is replayed.
///
/// # Examples
///
/// ```
/// # use mysql_simple_backup::dump::escape::escape_cell;
/// assert_eq!(escape_cell(r"C:\tmp"), r"C:\\tmp");
/// assert_eq!(escape_cell("say \"hi\""), "say \\\"hi\\\"");
/// assert_eq!(escape_cell("line1\nline2"), "line1\\nline2");
/// ```
pub fn escape_cell(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\'' => out.push_str("\\'"),
            '\0' => out.push_str("\\0"),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}

/// Renders one row as an INSERT tuple.
///
/// Every cell is double-quoted, including numbers; the server coerces them
/// back on replay. NULL renders as an empty quoted string, which loses the
/// NULL-ness on purpose: that is the documented shape of the format.
pub fn render_tuple(row: &[Option<String>]) -> String {
    let cells: Vec<String> = row
        .iter()
        .map(|cell| match cell {
            Some(value) => format!("\"{}\"", escape_cell(value)),
            None => "\"\"".to_string(),
        })
        .collect();
    format!("({})", cells.join(","))
}

/// Rewrites a native CREATE statement into its idempotent form.
///
/// `SHOW CREATE TABLE` emits `CREATE TABLE` without `IF NOT EXISTS`; dumps
/// carry the latter so a replay over a half-populated database cannot fail
/// on the schema step. Statements already in idempotent form pass through
/// untouched.
pub fn idempotent_create(create_statement: &str) -> String {
    let trimmed = create_statement.trim_start();
    let lowered = trimmed.to_ascii_lowercase();
    if lowered.starts_with("create table if not exists") {
        return trimmed.to_string();
    }
    if lowered.starts_with("create table") {
        let rest = &trimmed["create table".len()..];
        return format!("CREATE TABLE IF NOT EXISTS{}", rest);
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_backslashes_before_anything_else_sees_them() {
        assert_eq!(escape_cell(r"a\b"), r"a\\b");
        assert_eq!(escape_cell(r"a\nb"), r"a\\nb");
    }

    #[test]
    fn escapes_both_quote_kinds() {
        assert_eq!(escape_cell("it's \"here\""), "it\\'s \\\"here\\\"");
    }

    #[test]
    fn newlines_become_two_character_sequences() {
        let escaped = escape_cell("first\nsecond");
        assert_eq!(escaped, "first\\nsecond");
        assert!(!escaped.contains('\n'));
    }

    #[test]
    fn nul_bytes_are_escaped() {
        assert_eq!(escape_cell("a\0b"), "a\\0b");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(escape_cell("hello world"), "hello world");
        assert_eq!(escape_cell(""), "");
    }

    #[test]
    fn tuples_quote_every_cell() {
        let row = vec![
            Some("1".to_string()),
            Some("alice".to_string()),
            Some("a@example.com".to_string()),
        ];
        assert_eq!(render_tuple(&row), r#"("1","alice","a@example.com")"#);
    }

    #[test]
    fn null_cells_render_as_empty_strings() {
        let row = vec![Some("1".to_string()), None];
        assert_eq!(render_tuple(&row), r#"("1","")"#);
    }

    #[test]
    fn create_statements_gain_if_not_exists() {
        let create = "CREATE TABLE `users` (\n  `id` int NOT NULL\n)";
        assert_eq!(
            idempotent_create(create),
            "CREATE TABLE IF NOT EXISTS `users` (\n  `id` int NOT NULL\n)"
        );
    }

    #[test]
    fn idempotent_creates_are_left_alone() {
        let create = "CREATE TABLE IF NOT EXISTS `users` (`id` int)";
        assert_eq!(idempotent_create(create), create);
    }

    #[test]
    fn lowercase_create_is_recognized() {
        let create = "create table `t` (`id` int)";
        assert_eq!(
            idempotent_create(create),
            "CREATE TABLE IF NOT EXISTS `t` (`id` int)"
        );
    }

    #[test]
    fn non_create_statements_pass_through() {
        assert_eq!(idempotent_create("CREATE VIEW v AS SELECT 1"), "CREATE VIEW v AS SELECT 1");
    }
}
