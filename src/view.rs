use askama::Template;

use crate::html::TrustedHtml;
use crate::model::{format_tanggal, parse_timestamp, DataError, News, Wartawan};

/// Everything the article page shows, already formatted.
#[derive(Debug, Clone)]
pub struct ArticleView {
    pub id: i64,
    pub judul: String,
    pub penulis: String,
    pub tanggal: String,
    pub isi: TrustedHtml,
}

impl ArticleView {
    pub fn from_parts(news: News, wartawan: Wartawan) -> Result<Self, DataError> {
        let created_at = parse_timestamp(&news.created_at)?;

        Ok(Self {
            id: news.id,
            judul: news.judul,
            penulis: wartawan.nama,
            tanggal: format_tanggal(created_at),
            // Bodies come from the authoring path and are stored as markup
            isi: TrustedHtml::from_trusted_source(news.isi),
        })
    }
}

/// One row of the article listing. Never carries the body.
#[derive(Debug, Clone)]
pub struct NewsSummary {
    pub judul: String,
    pub penulis: String,
    pub tanggal: String,
    pub url: String,
}

impl NewsSummary {
    pub fn from_parts(news: &News, wartawan: &Wartawan, url: String) -> Result<Self, DataError> {
        let created_at = parse_timestamp(&news.created_at)?;

        Ok(Self {
            judul: news.judul.clone(),
            penulis: wartawan.nama.clone(),
            tanggal: format_tanggal(created_at),
            url,
        })
    }
}

// Template structs
#[derive(Template)]
#[template(path = "news/show.html")]
pub struct NewsShowTemplate {
    pub site_name: String,
    pub index_url: &'static str,
    pub article: ArticleView,
}

#[derive(Template)]
#[template(path = "news/index.html")]
pub struct NewsIndexTemplate {
    pub site_name: String,
    pub index_url: &'static str,
    pub items: Vec<NewsSummary>,
    pub has_more: bool,
    pub more_url: String,
}

#[derive(Template)]
#[template(path = "news/items.html")]
pub struct NewsItemsTemplate {
    pub items: Vec<NewsSummary>,
    pub has_more: bool,
    pub more_url: String,
}
