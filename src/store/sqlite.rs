//! SQLite record store / SQLite 存储
//!
//! Properties are kept as a JSON document. Boolean and numeric predicates
//! are pushed into SQL through `json_extract`; substring containment runs
//! in memory over the candidates because SQLite's `lower()` only folds ASCII.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite};

use super::{RecordStore, StoreResult};
use crate::db;
use crate::error::StoreError;
use crate::filter;
use crate::models::{FilterSpec, Properties, Record};

#[derive(Debug, sqlx::FromRow)]
struct StringRow {
    id: String,
    value: String,
    properties: String,
    created_at: String,
}

impl StringRow {
    fn into_record(self) -> StoreResult<Record> {
        let properties: Properties = serde_json::from_str(&self.properties)?;
        if properties.content_hash != self.id {
            return Err(StoreError::Corrupt {
                id: self.id,
                reason: "properties hash does not match id".to_string(),
            });
        }
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| StoreError::Corrupt {
                id: self.id.clone(),
                reason: format!("bad created_at: {}", e),
            })?
            .with_timezone(&Utc);

        Ok(Record {
            id: self.id,
            value: self.value,
            properties,
            created_at,
        })
    }
}

fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) a database and run migrations
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        sqlx::query("PRAGMA journal_mode=WAL").execute(&pool).await?;
        sqlx::query("PRAGMA busy_timeout=10000").execute(&pool).await?;

        tracing::info!("SQLite store opened: {}", database_url);
        Self::from_pool(pool).await
    }

    /// Private in-memory database; a single connection keeps it alive
    pub async fn in_memory() -> anyhow::Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> anyhow::Result<Self> {
        db::run_migrations(&pool).await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn insert(&self, record: Record) -> StoreResult<()> {
        let properties = serde_json::to_string(&record.properties)?;

        let result = sqlx::query(
            "INSERT INTO strings (id, value, properties, created_at) VALUES (?, ?, ?, ?) \
             ON CONFLICT(id) DO NOTHING",
        )
        .bind(&record.id)
        .bind(&record.value)
        .bind(&properties)
        .bind(record.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        // Zero rows means the primary key already existed
        if result.rows_affected() == 0 {
            return Err(StoreError::Conflict(record.id));
        }
        Ok(())
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Record>> {
        let row = sqlx::query_as::<_, StringRow>(
            "SELECT id, value, properties, created_at FROM strings WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(StringRow::into_record).transpose()
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM strings WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn scan(&self, spec: &FilterSpec) -> StoreResult<Vec<Record>> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT id, value, properties, created_at FROM strings WHERE 1 = 1",
        );

        if let Some(p) = spec.is_palindrome {
            qb.push(" AND json_extract(properties, '$.is_palindrome') = ")
                .push_bind(p as i64);
        }
        if let Some(min) = spec.min_length {
            qb.push(" AND json_extract(properties, '$.length') >= ")
                .push_bind(to_i64(min));
        }
        if let Some(max) = spec.max_length {
            qb.push(" AND json_extract(properties, '$.length') <= ")
                .push_bind(to_i64(max));
        }
        if let Some(count) = spec.word_count {
            qb.push(" AND json_extract(properties, '$.word_count') = ")
                .push_bind(to_i64(count));
        }
        qb.push(" ORDER BY rowid");

        let rows = qb
            .build_query_as::<StringRow>()
            .fetch_all(&self.pool)
            .await?;
        tracing::debug!("Pushed-down scan returned {} candidates", rows.len());

        let records = rows
            .into_iter()
            .map(StringRow::into_record)
            .collect::<StoreResult<Vec<_>>>()?;

        Ok(filter::apply(spec, records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded(values: &[&str]) -> SqliteStore {
        let store = SqliteStore::in_memory().await.unwrap();
        for v in values {
            store
                .insert(Record::new(v.to_string(), Utc::now()))
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_round_trip_preserves_record() {
        let store = SqliteStore::in_memory().await.unwrap();
        let record = Record::new("  Was it a car or a cat I saw  ".to_string(), Utc::now());
        store.insert(record.clone()).await.unwrap();

        let loaded = store.get(&record.id).await.unwrap().unwrap();
        assert_eq!(loaded, record);
        assert_eq!(loaded.value, "  Was it a car or a cat I saw  ");
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_conflict() {
        let store = seeded(&["noon"]).await;
        let original = store
            .get(&crate::analyzer::content_hash("noon"))
            .await
            .unwrap()
            .unwrap();

        let err = store
            .insert(Record::new("noon ".to_string(), Utc::now()))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));

        let after = store.get(&original.id).await.unwrap().unwrap();
        assert_eq!(after, original);
    }

    #[tokio::test]
    async fn test_delete_unknown_id() {
        let store = seeded(&["abc"]).await;
        let id = crate::analyzer::content_hash("abc");
        assert!(store.delete(&id).await.unwrap());
        assert!(!store.delete(&id).await.unwrap());
        assert!(store.get(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_scan_pushdown_matches_engine() {
        let values = ["noon", "ab", "racecar", "hello world", "aba", "Level", "ÉCOLE"];
        let store = seeded(&values).await;

        let spec = FilterSpec {
            is_palindrome: Some(true),
            min_length: Some(3),
            ..Default::default()
        };
        let scanned = store.scan(&spec).await.unwrap();
        let got: Vec<_> = scanned.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(got, vec!["noon", "racecar", "aba", "Level"]);

        let spec = FilterSpec {
            word_count: Some(2),
            max_length: Some(11),
            ..Default::default()
        };
        let scanned = store.scan(&spec).await.unwrap();
        assert_eq!(scanned.len(), 1);
        assert_eq!(scanned[0].value, "hello world");
    }

    #[tokio::test]
    async fn test_scan_contains_folds_unicode() {
        let store = seeded(&["ÉCOLE", "ecole", "table"]).await;
        let spec = FilterSpec {
            contains_character: Some('é'),
            ..Default::default()
        };
        let scanned = store.scan(&spec).await.unwrap();
        let got: Vec<_> = scanned.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(got, vec!["ÉCOLE"]);
    }
}
