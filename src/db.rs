use std::fmt::Display;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

use crate::config::{ArticleConfig, WartawanConfig};
use crate::model::{parse_timestamp, DataError, News, NewsWithWartawan, Wartawan};

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub async fn initialize(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS wartawan (
                id INTEGER PRIMARY KEY,
                nama TEXT NOT NULL UNIQUE
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        // wartawan_id carries no FK constraint; the relation is checked on read
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS news (
                id INTEGER PRIMARY KEY,
                wartawan_id INTEGER NOT NULL,
                judul TEXT NOT NULL,
                isi TEXT NOT NULL,
                created_at TEXT NOT NULL,
                created_at_utc TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_news_created_at_utc
            ON news(created_at_utc DESC)
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn sync_wartawan(&self, configs: &[WartawanConfig]) -> anyhow::Result<()> {
        for config in configs {
            sqlx::query("INSERT INTO wartawan (nama) VALUES (?) ON CONFLICT(nama) DO NOTHING")
                .bind(&config.nama)
                .execute(&self.pool)
                .await?;
        }
        Ok(())
    }

    /// Insert seed articles whose title is not stored yet. Returns how many were added.
    pub async fn sync_articles(&self, configs: &[ArticleConfig]) -> anyhow::Result<usize> {
        let mut inserted = 0;
        for config in configs {
            let wartawan = self
                .get_wartawan_by_nama(&config.wartawan)
                .await?
                .ok_or_else(|| {
                    anyhow::anyhow!(
                        "article '{}' refers to unknown wartawan '{}'",
                        config.judul,
                        config.wartawan
                    )
                })?;

            let existing: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM news WHERE judul = ?")
                .bind(&config.judul)
                .fetch_one(&self.pool)
                .await?;
            if existing.0 > 0 {
                continue;
            }

            let created_at: DateTime<FixedOffset> = match &config.created_at {
                Some(raw) => parse_timestamp(raw)?,
                None => Utc::now().into(),
            };

            self.insert_news(wartawan.id, &config.judul, &config.isi, created_at)
                .await?;
            inserted += 1;
        }
        Ok(inserted)
    }

    /// `created_at` keeps its own offset for display; ordering uses the UTC copy.
    pub async fn insert_news<Tz>(
        &self,
        wartawan_id: i64,
        judul: &str,
        isi: &str,
        created_at: DateTime<Tz>,
    ) -> anyhow::Result<i64>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO news (wartawan_id, judul, isi, created_at, created_at_utc)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(wartawan_id)
        .bind(judul)
        .bind(isi)
        .bind(created_at.to_rfc3339())
        .bind(created_at.with_timezone(&Utc).to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn get_all_wartawan(&self) -> anyhow::Result<Vec<Wartawan>> {
        let wartawan = sqlx::query_as::<_, Wartawan>("SELECT * FROM wartawan ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(wartawan)
    }

    pub async fn get_wartawan(&self, wartawan_id: i64) -> anyhow::Result<Option<Wartawan>> {
        let wartawan = sqlx::query_as::<_, Wartawan>("SELECT * FROM wartawan WHERE id = ?")
            .bind(wartawan_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(wartawan)
    }

    pub async fn get_wartawan_by_nama(&self, nama: &str) -> anyhow::Result<Option<Wartawan>> {
        let wartawan = sqlx::query_as::<_, Wartawan>("SELECT * FROM wartawan WHERE nama = ?")
            .bind(nama)
            .fetch_optional(&self.pool)
            .await?;
        Ok(wartawan)
    }

    pub async fn get_news(&self, news_id: i64) -> anyhow::Result<Option<News>> {
        let news = sqlx::query_as::<_, News>(
            "SELECT id, wartawan_id, judul, isi, created_at FROM news WHERE id = ?",
        )
        .bind(news_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(news)
    }

    /// Load an article and its author.
    ///
    /// `Ok(None)` means the article does not exist. An article whose author
    /// row is gone yields [`DataError::MissingWartawan`].
    pub async fn get_news_with_wartawan(
        &self,
        news_id: i64,
    ) -> anyhow::Result<Option<NewsWithWartawan>> {
        let Some(news) = self.get_news(news_id).await? else {
            return Ok(None);
        };

        let wartawan = self
            .get_wartawan(news.wartawan_id)
            .await?
            .ok_or(DataError::MissingWartawan {
                news_id: news.id,
                wartawan_id: news.wartawan_id,
            })?;

        Ok(Some(NewsWithWartawan { news, wartawan }))
    }

    pub async fn get_news_page(&self, limit: i64, offset: i64) -> anyhow::Result<Vec<News>> {
        let news = sqlx::query_as::<_, News>(
            r#"
            SELECT id, wartawan_id, judul, isi, created_at FROM news
            ORDER BY created_at_utc DESC, id DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(news)
    }

    pub async fn get_news_count(&self) -> anyhow::Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM news")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }
}
