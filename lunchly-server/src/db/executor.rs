//! Query execution interface
//!
//! The record managers never see a connection pool. They hand a parameterized
//! statement plus positional arguments to a [`QueryExecutor`] and get back
//! plain rows keyed by column name. `SqlitePool` is the production executor;
//! tests can substitute anything that implements the trait.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row as _, SqlitePool, TypeInfo, ValueRef};

use super::repository::{RepoError, RepoResult};

/// Storage format for timestamps (SQLite TEXT column). Fractional seconds
/// are written only when non-zero, so whole-second values stay `HH:MM:SS`.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Shared executor handle passed into each repository
pub type SharedExecutor = Arc<dyn QueryExecutor>;

/// Executes one parameterized statement (`?1`, `?2`, ... placeholders)
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, sql: &str, args: &[SqlValue]) -> RepoResult<Vec<Row>>;
}

/// A single bound argument or column value
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Integer(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Real(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<NaiveDateTime> for SqlValue {
    fn from(v: NaiveDateTime) -> Self {
        SqlValue::Text(v.format(DATETIME_FORMAT).to_string())
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(SqlValue::Null)
    }
}

/// One result row, columns in select order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, SqlValue)>,
}

impl Row {
    pub fn new(columns: Vec<(String, SqlValue)>) -> Self {
        Self { columns }
    }

    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    fn require(&self, column: &str) -> RepoResult<&SqlValue> {
        self.get(column)
            .ok_or_else(|| RepoError::Database(format!("Missing column: {column}")))
    }

    pub fn i64(&self, column: &str) -> RepoResult<i64> {
        match self.require(column)? {
            SqlValue::Integer(v) => Ok(*v),
            other => Err(unexpected(column, "integer", other)),
        }
    }

    pub fn string(&self, column: &str) -> RepoResult<String> {
        match self.require(column)? {
            SqlValue::Text(v) => Ok(v.clone()),
            other => Err(unexpected(column, "text", other)),
        }
    }

    pub fn opt_string(&self, column: &str) -> RepoResult<Option<String>> {
        match self.require(column)? {
            SqlValue::Null => Ok(None),
            SqlValue::Text(v) => Ok(Some(v.clone())),
            other => Err(unexpected(column, "text or null", other)),
        }
    }

    /// Accepts the storage format and its ISO-8601 `T` variant
    pub fn datetime(&self, column: &str) -> RepoResult<NaiveDateTime> {
        let text = self.string(column)?;
        NaiveDateTime::parse_from_str(&text, DATETIME_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(&text, "%Y-%m-%dT%H:%M:%S%.f"))
            .map_err(|e| RepoError::Database(format!("Invalid timestamp in {column}: {text} ({e})")))
    }
}

impl FromIterator<(String, SqlValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, SqlValue)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

fn unexpected(column: &str, expected: &str, got: &SqlValue) -> RepoError {
    RepoError::Database(format!("Column {column}: expected {expected}, got {got:?}"))
}

#[async_trait]
impl QueryExecutor for SqlitePool {
    async fn execute(&self, sql: &str, args: &[SqlValue]) -> RepoResult<Vec<Row>> {
        let mut query = sqlx::query(sql);
        for arg in args {
            query = match arg {
                SqlValue::Null => query.bind(None::<String>),
                SqlValue::Integer(v) => query.bind(*v),
                SqlValue::Real(v) => query.bind(*v),
                SqlValue::Text(v) => query.bind(v.clone()),
            };
        }
        let rows = query.fetch_all(self).await?;
        rows.iter().map(decode_row).collect()
    }
}

fn decode_row(row: &SqliteRow) -> RepoResult<Row> {
    let mut columns = Vec::with_capacity(row.columns().len());
    for column in row.columns() {
        let idx = column.ordinal();
        let raw = row.try_get_raw(idx)?;
        let value = if raw.is_null() {
            SqlValue::Null
        } else {
            let type_name = raw.type_info().name().to_string();
            match type_name.as_str() {
                "INTEGER" | "BOOLEAN" => SqlValue::Integer(row.try_get::<i64, _>(idx)?),
                "REAL" => SqlValue::Real(row.try_get::<f64, _>(idx)?),
                "BLOB" => {
                    let bytes = row.try_get::<Vec<u8>, _>(idx)?;
                    SqlValue::Text(String::from_utf8_lossy(&bytes).into_owned())
                }
                _ => SqlValue::Text(row.try_get::<String, _>(idx)?),
            }
        };
        columns.push((column.name().to_string(), value));
    }
    Ok(Row::new(columns))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_sqlite_executor_binds_and_decodes() {
        let pool = test_pool().await;
        pool.execute(
            "CREATE TABLE t (id INTEGER PRIMARY KEY, name TEXT, score REAL, note TEXT)",
            &[],
        )
        .await
        .unwrap();

        let inserted = pool
            .execute(
                "INSERT INTO t (name, score, note) VALUES (?1, ?2, ?3) RETURNING id",
                &["Ada".into(), 9.5f64.into(), SqlValue::Null],
            )
            .await
            .unwrap();
        assert_eq!(inserted.len(), 1);
        assert_eq!(inserted[0].i64("id").unwrap(), 1);

        let rows = pool
            .execute("SELECT id, name, score, note FROM t WHERE name = ?1", &["Ada".into()])
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].string("name").unwrap(), "Ada");
        assert_eq!(rows[0].get("score"), Some(&SqlValue::Real(9.5)));
        assert_eq!(rows[0].opt_string("note").unwrap(), None);
    }

    #[tokio::test]
    async fn test_sqlite_executor_reports_bad_sql() {
        let pool = test_pool().await;
        let err = pool
            .execute("UPDATE nowhere SET a = ?1, WHERE id = ?2", &[1i64.into(), 2i64.into()])
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Database(_)));
    }

    #[test]
    fn test_datetime_round_trips_through_storage_format() {
        let dt = NaiveDate::from_ymd_opt(2024, 4, 1)
            .unwrap()
            .and_hms_opt(19, 30, 0)
            .unwrap();
        let value = SqlValue::from(dt);
        assert_eq!(value, SqlValue::Text("2024-04-01 19:30:00".into()));

        let row = Row::new(vec![("start_at".into(), value)]);
        assert_eq!(row.datetime("start_at").unwrap(), dt);
    }

    #[test]
    fn test_row_accessors_reject_wrong_types() {
        let row: Row = [
            ("id".to_string(), SqlValue::Text("x".into())),
            ("start_at".to_string(), SqlValue::Text("yesterday".into())),
        ]
        .into_iter()
        .collect();
        assert!(matches!(row.i64("id"), Err(RepoError::Database(_))));
        assert!(matches!(row.datetime("start_at"), Err(RepoError::Database(_))));
        assert!(matches!(row.string("missing"), Err(RepoError::Database(_))));
    }

    #[test]
    fn test_option_maps_to_null() {
        assert_eq!(SqlValue::from(None::<String>), SqlValue::Null);
        assert_eq!(
            SqlValue::from(Some("555-0100".to_string())),
            SqlValue::Text("555-0100".into())
        );
    }
}
