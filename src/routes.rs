use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{error, info, warn};

use crate::db::Database;
use crate::model::DataError;
use crate::view::{ArticleView, NewsIndexTemplate, NewsItemsTemplate, NewsShowTemplate, NewsSummary};

pub struct AppState {
    pub db: Arc<Database>,
    pub site_name: String,
    pub per_page: i64,
}

// Named routes
pub fn route_news_index() -> &'static str {
    "/news"
}

pub fn route_news_show(news_id: i64) -> String {
    format!("/news/{}", news_id)
}

pub fn route_news_more(offset: i64) -> String {
    format!("/news/more?offset={}", offset)
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/news", get(news_index))
        .route("/news/more", get(news_more))
        .route("/news/:id", get(news_show))
        .route("/health", get(health))
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Wrapper for HTML responses
struct HtmlTemplate<T>(T);

impl<T: Template> IntoResponse for HtmlTemplate<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                error!("Failed to render template: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
            }
        }
    }
}

// Details stay in the log
const INTERNAL_ERROR_BODY: &str = "Internal server error";

// Custom error type
pub enum AppError {
    NotFound(String),
    Internal(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(what) => {
                warn!("Not found: {}", what);
                (StatusCode::NOT_FOUND, format!("Not found: {}", what)).into_response()
            }
            AppError::Internal(err) => {
                error!("Request failed: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
            }
        }
    }
}

impl<E: Into<anyhow::Error>> From<E> for AppError {
    fn from(err: E) -> Self {
        AppError::Internal(err.into())
    }
}

async fn load_summaries(state: &AppState, offset: i64) -> Result<Vec<NewsSummary>, AppError> {
    let news = state.db.get_news_page(state.per_page, offset).await?;

    let mut items = Vec::with_capacity(news.len());
    for item in &news {
        let wartawan = state
            .db
            .get_wartawan(item.wartawan_id)
            .await?
            .ok_or(DataError::MissingWartawan {
                news_id: item.id,
                wartawan_id: item.wartawan_id,
            })?;
        items.push(NewsSummary::from_parts(item, &wartawan, route_news_show(item.id))?);
    }
    Ok(items)
}

// Route handlers
pub async fn home() -> Redirect {
    Redirect::to(route_news_index())
}

pub async fn news_index(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let items = load_summaries(&state, 0).await?;
    let total = state.db.get_news_count().await?;

    Ok(HtmlTemplate(NewsIndexTemplate {
        site_name: state.site_name.clone(),
        index_url: route_news_index(),
        items,
        has_more: total > state.per_page,
        more_url: route_news_more(state.per_page),
    }))
}

#[derive(Deserialize)]
pub struct MoreQuery {
    #[serde(default)]
    pub offset: i64,
}

pub async fn news_more(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MoreQuery>,
) -> Result<impl IntoResponse, AppError> {
    let offset = query.offset.max(0);
    let items = load_summaries(&state, offset).await?;
    let total = state.db.get_news_count().await?;
    let next = offset.saturating_add(state.per_page);

    Ok(HtmlTemplate(NewsItemsTemplate {
        items,
        has_more: next < total,
        more_url: route_news_more(next),
    }))
}

pub async fn news_show(
    State(state): State<Arc<AppState>>,
    Path(news_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let loaded = state
        .db
        .get_news_with_wartawan(news_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("news {}", news_id)))?;

    let article = ArticleView::from_parts(loaded.news, loaded.wartawan)?;
    info!("Showing news {} by {}", article.id, article.penulis);

    Ok(HtmlTemplate(NewsShowTemplate {
        site_name: state.site_name.clone(),
        index_url: route_news_index(),
        article,
    }))
}

pub async fn health() -> impl IntoResponse {
    Html("OK")
}
