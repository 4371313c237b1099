use tokio_postgres::Row;

/// Builds a `%filter%` LIKE pattern from raw user input. LIKE wildcards in
/// the input are escaped so the filter stays a literal substring match;
/// PostgreSQL's default escape character is the backslash.
pub fn like_pattern(filter: &str) -> String {
    let escaped = filter
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

pub fn first_row_or_not_found<T, E, F>(
    rows: &[Row], mapper: F, not_found_error: E,
) -> Result<T, E>
where
    F: FnOnce(&Row) -> T,
{
    rows.first().map(mapper).ok_or(not_found_error)
}
