//! Page endpoints
//!
//! Reads are public; writes require a bearer token.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, ApiQuery, AuthUser, PageId};
use crate::http::server::AppState;
use crate::models::{NewPage, Page, PageContent, PageFilter, PagePatch, PageTitle, Slug};

/// Query parameters for listing pages
#[derive(Debug, Default, Deserialize)]
pub struct ListPagesParams {
    pub locale: Option<String>,
    pub slug: Option<String>,
}

/// Create page request
#[derive(Deserialize)]
pub struct CreatePageRequest {
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub slug: String,
    pub locale: String,
}

/// Update page request; absent fields are left unchanged
#[derive(Deserialize)]
pub struct UpdatePageRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub slug: Option<String>,
    pub locale: Option<String>,
}

/// Page response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub slug: String,
    pub locale: String,
    pub created_at: String,
}

impl From<Page> for PageResponse {
    fn from(p: Page) -> Self {
        Self {
            id: p.id,
            title: p.title,
            content: p.content,
            slug: p.slug,
            locale: p.locale,
            created_at: p.created_at.to_rfc3339(),
        }
    }
}

/// Delete confirmation
#[derive(Serialize)]
pub struct DeletedResponse {
    pub message: &'static str,
}

/// GET /api/pages?locale=&slug= - list pages
async fn list_pages(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<ListPagesParams>,
) -> Result<Json<Vec<PageResponse>>, ApiError> {
    let filter = PageFilter::new(params.locale, params.slug);
    let pages = state.store.list_pages(&filter).await?;

    Ok(Json(pages.into_iter().map(PageResponse::from).collect()))
}

/// GET /api/pages/{id} - get a single page
async fn get_page(
    State(state): State<Arc<AppState>>,
    PageId(id): PageId,
) -> Result<Json<PageResponse>, ApiError> {
    let page = state.store.get_page(id).await?;
    Ok(Json(PageResponse::from(page)))
}

/// POST /api/pages - create a page
async fn create_page(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ApiJson(req): ApiJson<CreatePageRequest>,
) -> Result<(StatusCode, Json<PageResponse>), ApiError> {
    let new_page = NewPage {
        title: PageTitle::new(&req.title)?,
        content: PageContent::new(req.content)?,
        slug: Slug::new(&req.slug)?,
        locale: state.locales.parse(&req.locale)?,
    };

    let page = state.store.create_page(new_page).await?;
    tracing::info!(page_id = %page.id, user_id = %user.user_id, "page created");

    Ok((StatusCode::CREATED, Json(PageResponse::from(page))))
}

/// PUT /api/pages/{id} - update a page
async fn update_page(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    PageId(id): PageId,
    ApiJson(req): ApiJson<UpdatePageRequest>,
) -> Result<Json<PageResponse>, ApiError> {
    let patch = PagePatch {
        title: req.title.as_deref().map(PageTitle::new).transpose()?,
        content: req.content.map(PageContent::new).transpose()?,
        slug: req.slug.as_deref().map(Slug::new).transpose()?,
        locale: req
            .locale
            .as_deref()
            .map(|l| state.locales.parse(l))
            .transpose()?,
    };

    let page = state.store.update_page(id, patch).await?;
    tracing::info!(page_id = %page.id, user_id = %user.user_id, "page updated");

    Ok(Json(PageResponse::from(page)))
}

/// DELETE /api/pages/{id} - delete a page
async fn delete_page(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    PageId(id): PageId,
) -> Result<Json<DeletedResponse>, ApiError> {
    state.store.delete_page(id).await?;
    tracing::info!(page_id = %id, user_id = %user.user_id, "page deleted");

    Ok(Json(DeletedResponse {
        message: "Page deleted",
    }))
}

/// Page routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/pages", get(list_pages).post(create_page))
        .route(
            "/api/pages/{id}",
            get(get_page).put(update_page).delete(delete_page),
        )
}
