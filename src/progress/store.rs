use anyhow::Context;
use async_trait::async_trait;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};
use tokio::sync::{Mutex, OnceCell};
use uuid::Uuid;

use super::record::{sort_newest_first, NewProgressRecord, ProgressRecord};

/// Persistence seam for the progress collection. Only two operations exist:
/// records are never updated or deleted.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// All records, ordered `date` descending then `created_at` descending.
    async fn list(&self) -> anyhow::Result<Vec<ProgressRecord>>;
    /// Append one record and return it with its assigned id.
    async fn insert(&self, record: NewProgressRecord) -> anyhow::Result<ProgressRecord>;
}

/// PostgreSQL-backed store.
///
/// The pool is a process-wide handle initialized on first use behind a
/// `OnceCell`, so concurrent cold-start requests race safely and a failed
/// connection attempt is retried by the next caller.
pub struct PgProgressStore {
    database_url: String,
    database_name: String,
    pool: OnceCell<PgPool>,
}

impl PgProgressStore {
    pub fn new(database_url: impl Into<String>, database_name: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            database_name: database_name.into(),
            pool: OnceCell::new(),
        }
    }

    async fn pool(&self) -> anyhow::Result<&PgPool> {
        self.pool
            .get_or_try_init(|| async {
                let options = self
                    .database_url
                    .parse::<PgConnectOptions>()
                    .context("parse DATABASE_URL")?
                    .database(&self.database_name);
                PgPoolOptions::new()
                    .max_connections(10)
                    .connect_with(options)
                    .await
                    .context("connect to database")
            })
            .await
    }

    /// Run the embedded migrations. Called best-effort at startup.
    pub async fn migrate(&self) -> anyhow::Result<()> {
        let pool = self.pool().await?;
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .context("run migrations")?;
        Ok(())
    }
}

#[async_trait]
impl ProgressStore for PgProgressStore {
    async fn list(&self) -> anyhow::Result<Vec<ProgressRecord>> {
        let pool = self.pool().await?;
        let records = sqlx::query_as::<_, ProgressRecord>(
            r#"
            SELECT id, date, food, exercise, whey_grams, creatine_grams,
                   image_data, image_name, created_at
            FROM progress
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await
        .context("list progress records")?;
        Ok(records)
    }

    async fn insert(&self, record: NewProgressRecord) -> anyhow::Result<ProgressRecord> {
        let pool = self.pool().await?;
        let inserted = sqlx::query_as::<_, ProgressRecord>(
            r#"
            INSERT INTO progress (id, date, food, exercise, whey_grams, creatine_grams,
                                  image_data, image_name, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, date, food, exercise, whey_grams, creatine_grams,
                      image_data, image_name, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&record.date)
        .bind(&record.food)
        .bind(&record.exercise)
        .bind(record.whey_grams)
        .bind(record.creatine_grams)
        .bind(&record.image_data)
        .bind(&record.image_name)
        .bind(record.created_at)
        .fetch_one(pool)
        .await
        .context("insert progress record")?;
        Ok(inserted)
    }
}

/// In-memory store used by tests and `AppState::fake()`. Applies the same
/// ordering contract as the SQL query.
#[derive(Default)]
pub struct MemoryProgressStore {
    records: Mutex<Vec<ProgressRecord>>,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressStore for MemoryProgressStore {
    async fn list(&self) -> anyhow::Result<Vec<ProgressRecord>> {
        let mut records = self.records.lock().await.clone();
        sort_newest_first(&mut records);
        Ok(records)
    }

    async fn insert(&self, record: NewProgressRecord) -> anyhow::Result<ProgressRecord> {
        let inserted = record.into_record(Uuid::new_v4());
        self.records.lock().await.push(inserted.clone());
        Ok(inserted)
    }
}
