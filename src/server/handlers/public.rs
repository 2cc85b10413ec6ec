// src/server/handlers/public.rs
//! Pages anyone may see

use crate::catalog::listing::{self, Index, Page, RecipeSummary};
use crate::catalog::{self, RecipeDetail};
use crate::db::models::Category;
use crate::server::handlers::{PageQuery, with_db};
use crate::server::{ApiResult, ClaimedUser, SharedState};
use crate::Viewer;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;

/// GET /
pub async fn index(State(state): State<SharedState>) -> ApiResult<Json<Index>> {
    let index = with_db(&state, |conn| listing::index(conn)).await?;
    Ok(Json(index))
}

/// GET /recipe/:id/
///
/// Drafts are visible to their author only.
pub async fn recipe_detail(
    State(state): State<SharedState>,
    ClaimedUser(claimed): ClaimedUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<RecipeDetail>> {
    let detail = with_db(&state, move |conn| {
        let viewer = Viewer::load(conn, claimed)?;
        catalog::recipe_detail(conn, &viewer, id)
    })
    .await?;
    Ok(Json(detail))
}

#[derive(Serialize)]
pub struct CategoryPage {
    pub category: Category,
    pub recipes: Page<RecipeSummary>,
}

/// GET /category/:slug/
pub async fn category(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<CategoryPage>> {
    let (category, recipes) =
        with_db(&state, move |conn| listing::by_category(conn, &slug, query.page)).await?;
    Ok(Json(CategoryPage { category, recipes }))
}

/// GET /categories/
pub async fn categories(State(state): State<SharedState>) -> ApiResult<Json<Vec<Category>>> {
    let categories = with_db(&state, |conn| Category::list_all(conn)).await?;
    Ok(Json(categories))
}

/// GET /newest/
pub async fn newest(
    State(state): State<SharedState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<Page<RecipeSummary>>> {
    let page = with_db(&state, move |conn| listing::newest(conn, query.page)).await?;
    Ok(Json(page))
}

/// GET /popular/
pub async fn popular(
    State(state): State<SharedState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<Page<RecipeSummary>>> {
    let page = with_db(&state, move |conn| listing::popular(conn, query.page)).await?;
    Ok(Json(page))
}

#[derive(Serialize)]
pub struct Author {
    pub id: i64,
    pub username: String,
}

#[derive(Serialize)]
pub struct AuthorPage {
    pub author: Author,
    pub recipes: Page<RecipeSummary>,
}

/// GET /recipes/by/:user_id/
pub async fn by_author(
    State(state): State<SharedState>,
    Path(user_id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<AuthorPage>> {
    let (user, recipes) =
        with_db(&state, move |conn| listing::by_author(conn, user_id, query.page)).await?;
    Ok(Json(AuthorPage {
        author: Author {
            id: user_id,
            username: user.username,
        },
        recipes,
    }))
}
