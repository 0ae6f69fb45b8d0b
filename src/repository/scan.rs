//! Row scanning helpers.
//!
//! Every multi-row read goes through [`scan_rows`]: rows are decoded in
//! order and the first failure discards everything decoded so far. A driver
//! error before the first row means the query itself failed; a driver error
//! after it is reported as a scan failure of the entity being read.

use sqlx::{postgres::PgRow, FromRow};
use tokio_stream::{Stream, StreamExt};

use crate::error::{AppError, AppResult};

/// Decode a sequence of driver rows with `decode`, failing closed.
pub fn scan_rows<R, T, I, F>(rows: I, entity: &'static str, mut decode: F) -> AppResult<Vec<T>>
where
    I: IntoIterator<Item = Result<R, sqlx::Error>>,
    F: FnMut(&R) -> Result<T, sqlx::Error>,
{
    let mut records = Vec::new();

    for (index, row) in rows.into_iter().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(e) if index == 0 => return Err(AppError::Database(e)),
            Err(source) => return Err(AppError::Scan { entity, source }),
        };
        let record = decode(&row).map_err(|source| AppError::Scan { entity, source })?;
        records.push(record);
    }

    Ok(records)
}

/// Drain a row stream from the pool and decode it into `T`
pub async fn fetch_records<T, S>(rows: S, entity: &'static str) -> AppResult<Vec<T>>
where
    S: Stream<Item = Result<PgRow, sqlx::Error>> + Unpin,
    T: for<'r> FromRow<'r, PgRow>,
{
    let rows: Vec<Result<PgRow, sqlx::Error>> = rows.collect().await;
    scan_rows(rows, entity, |row| T::from_row(row))
}

/// Decode an optional single row
pub fn scan_one<T>(row: Option<PgRow>, entity: &'static str) -> AppResult<Option<T>>
where
    T: for<'r> FromRow<'r, PgRow>,
{
    row.map(|row| T::from_row(&row))
        .transpose()
        .map_err(|source| AppError::Scan { entity, source })
}

/// Build an `ILIKE` pattern matching `text` anywhere, with LIKE
/// metacharacters taken literally.
pub fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    type FakeRow = (&'static str, &'static str);

    fn decode(row: &FakeRow) -> Result<(i32, String), sqlx::Error> {
        let id = row.0.parse::<i32>().map_err(|e| sqlx::Error::ColumnDecode {
            index: "id".to_string(),
            source: Box::new(e),
        })?;
        Ok((id, row.1.to_string()))
    }

    #[test]
    fn test_scan_rows_preserves_order() {
        let rows: Vec<Result<FakeRow, sqlx::Error>> = vec![Ok(("2", "Smith")), Ok(("1", "Doe"))];
        let records = scan_rows(rows, "authors", decode).unwrap();
        assert_eq!(records, vec![(2, "Smith".to_string()), (1, "Doe".to_string())]);
    }

    #[test]
    fn test_scan_rows_empty() {
        let rows: Vec<Result<FakeRow, sqlx::Error>> = vec![];
        assert!(scan_rows(rows, "authors", decode).unwrap().is_empty());
    }

    #[test]
    fn test_scan_rows_conversion_error_discards_results() {
        let rows: Vec<Result<FakeRow, sqlx::Error>> =
            vec![Ok(("1", "Doe")), Ok(("invalid_id", "Smith"))];
        let err = scan_rows(rows, "authors", decode).unwrap_err();
        assert!(matches!(err, AppError::Scan { entity: "authors", .. }));
    }

    #[test]
    fn test_scan_rows_error_after_iteration() {
        let rows: Vec<Result<FakeRow, sqlx::Error>> = vec![
            Ok(("1", "Doe")),
            Err(sqlx::Error::Protocol("iteration error".to_string())),
        ];
        let err = scan_rows(rows, "authors", decode).unwrap_err();
        assert!(matches!(err, AppError::Scan { entity: "authors", .. }));
    }

    #[test]
    fn test_scan_rows_error_before_first_row_is_query_error() {
        let rows: Vec<Result<FakeRow, sqlx::Error>> =
            vec![Err(sqlx::Error::Protocol("connection reset".to_string()))];
        let err = scan_rows(rows, "books", decode).unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn test_like_pattern() {
        assert_eq!(like_pattern("John"), "%John%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b\\c"), "%a\\_b\\\\c%");
        assert_eq!(like_pattern(""), "%%");
    }
}
