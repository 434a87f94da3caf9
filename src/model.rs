use chrono::{DateTime, FixedOffset, NaiveDateTime};
use sqlx::FromRow;
use thiserror::Error;

/// Journalist credited on an article.
#[derive(Debug, Clone, FromRow)]
pub struct Wartawan {
    pub id: i64,
    pub nama: String,
}

/// Stored article row.
#[derive(Debug, Clone, FromRow)]
pub struct News {
    pub id: i64,
    pub wartawan_id: i64,
    pub judul: String,
    /// Pre-rendered HTML body from the authoring path
    pub isi: String,
    pub created_at: String,
}

/// An article together with its author.
#[derive(Debug, Clone)]
pub struct NewsWithWartawan {
    pub news: News,
    pub wartawan: Wartawan,
}

/// Violations of the data contract the article views rely on.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("news {news_id} refers to missing wartawan {wartawan_id}")]
    MissingWartawan { news_id: i64, wartawan_id: i64 },
    #[error("malformed timestamp '{0}'")]
    MalformedTimestamp(String),
}

const SQL_DATETIME: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a stored `created_at`, keeping its offset.
///
/// RFC 3339 values keep the offset they were written with; a bare SQL
/// datetime carries no offset and is taken as UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<FixedOffset>, DataError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt);
    }

    NaiveDateTime::parse_from_str(raw, SQL_DATETIME)
        .map(|naive| DateTime::<FixedOffset>::from(naive.and_utc()))
        .map_err(|_| DataError::MalformedTimestamp(raw.to_string()))
}

/// Day-month-year display date in the timestamp's own offset, e.g. `05 Mar 2024`.
pub fn format_tanggal(dt: DateTime<FixedOffset>) -> String {
    dt.format("%d %b %Y").to_string()
}
