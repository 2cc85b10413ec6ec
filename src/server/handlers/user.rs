// src/server/handlers/user.rs
//! Authoring and personal pages (sign-in required)
//!
//! Anonymous requests are rejected with 401 before any recipe lookup.
//! Ownership and draft-only rules come from the catalog guard.

use crate::catalog::lifecycle::{self, DraftEdit, NewDraft, PUBLISH_BLOCKED, PublishOutcome};
use crate::catalog::listing::{self, FavouriteEntry, Page, RecipeSummary};
use crate::catalog::{self, Operation, RecipeDetail};
use crate::db::models::Category;
use crate::server::handlers::{
    Level, PageQuery, SeeOther, edit_url, publish_url, recipe_url, signed_in, with_db,
};
use crate::server::{ApiResult, ClaimedUser, SharedState};
use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

const DRAFT_CREATED: &str = "Draft created successfully!";
const DRAFT_SAVED: &str = "Draft saved successfully!";
const RECIPE_PUBLISHED: &str = "Recipe published successfully!";
const DRAFT_DELETED: &str = "Draft deleted successfully!";

/// POST /recipe/new/
pub async fn create_recipe(
    State(state): State<SharedState>,
    ClaimedUser(claimed): ClaimedUser,
    Json(form): Json<NewDraft>,
) -> ApiResult<SeeOther> {
    let recipe = with_db(&state, move |conn| {
        let viewer = signed_in(conn, claimed)?;
        lifecycle::create_draft(conn, &viewer, &form)
    })
    .await?;

    let id = recipe.id.unwrap_or_default();
    Ok(SeeOther::to(edit_url(id)).with(Level::Success, DRAFT_CREATED))
}

/// Current draft plus the category choices
#[derive(Serialize)]
pub struct EditForm {
    pub recipe: RecipeDetail,
    pub categories: Vec<Category>,
}

/// GET /recipe/:id/edit/
pub async fn edit_form(
    State(state): State<SharedState>,
    ClaimedUser(claimed): ClaimedUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<EditForm>> {
    let form = with_db(&state, move |conn| {
        let viewer = signed_in(conn, claimed)?;
        lifecycle::load_for(conn, &viewer, id, Operation::Edit)?;
        Ok(EditForm {
            recipe: catalog::recipe_detail(conn, &viewer, id)?,
            categories: Category::list_all(conn)?,
        })
    })
    .await?;
    Ok(Json(form))
}

/// Edit submission; `save_publish` continues to the publish confirmation
#[derive(Debug, Deserialize)]
pub struct EditRequest {
    #[serde(flatten)]
    pub edit: DraftEdit,
    #[serde(default)]
    pub save_publish: bool,
}

/// POST /recipe/:id/edit/
pub async fn edit_recipe(
    State(state): State<SharedState>,
    ClaimedUser(claimed): ClaimedUser,
    Path(id): Path<i64>,
    Json(request): Json<EditRequest>,
) -> ApiResult<SeeOther> {
    let edit = request.edit;
    let outcome = with_db(&state, move |conn| {
        let viewer = signed_in(conn, claimed)?;
        lifecycle::edit_draft(conn, &viewer, id, &edit)
    })
    .await?;

    let next = if request.save_publish {
        publish_url(id)
    } else {
        recipe_url(id)
    };
    let mut redirect = SeeOther::to(next).with(Level::Success, DRAFT_SAVED);
    for warning in outcome.warnings {
        redirect = redirect.with(Level::Warning, warning);
    }
    Ok(redirect)
}

/// GET /recipe/:id/publish/
///
/// Returns the recipe to confirm, or bounces back to the editor when the
/// draft cannot be published yet.
pub async fn publish_confirm(
    State(state): State<SharedState>,
    ClaimedUser(claimed): ClaimedUser,
    Path(id): Path<i64>,
) -> ApiResult<Response> {
    let detail = with_db(&state, move |conn| {
        let viewer = signed_in(conn, claimed)?;
        let recipe = lifecycle::load_for(conn, &viewer, id, Operation::Publish)?;
        if lifecycle::publish_blocker(&recipe).is_some() {
            return Ok(None);
        }
        catalog::recipe_detail(conn, &viewer, id).map(Some)
    })
    .await?;

    Ok(match detail {
        Some(detail) => Json(detail).into_response(),
        None => SeeOther::to(edit_url(id))
            .with(Level::Warning, PUBLISH_BLOCKED)
            .into_response(),
    })
}

/// POST /recipe/:id/publish/
pub async fn publish_recipe(
    State(state): State<SharedState>,
    ClaimedUser(claimed): ClaimedUser,
    Path(id): Path<i64>,
) -> ApiResult<SeeOther> {
    let outcome = with_db(&state, move |conn| {
        let viewer = signed_in(conn, claimed)?;
        lifecycle::publish(conn, &viewer, id)
    })
    .await?;

    Ok(match outcome {
        PublishOutcome::Published(_) => {
            SeeOther::to(recipe_url(id)).with(Level::Success, RECIPE_PUBLISHED)
        }
        PublishOutcome::Blocked { reason, .. } => {
            SeeOther::to(edit_url(id)).with(Level::Error, reason)
        }
    })
}

/// POST /recipe/:id/delete/
pub async fn delete_recipe(
    State(state): State<SharedState>,
    ClaimedUser(claimed): ClaimedUser,
    Path(id): Path<i64>,
) -> ApiResult<SeeOther> {
    with_db(&state, move |conn| {
        let viewer = signed_in(conn, claimed)?;
        lifecycle::delete_draft(conn, &viewer, id)
    })
    .await?;

    Ok(SeeOther::to("/").with(Level::Success, DRAFT_DELETED))
}

/// GET /draft/:id/
pub async fn draft_detail(
    State(state): State<SharedState>,
    ClaimedUser(claimed): ClaimedUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<RecipeDetail>> {
    let detail = with_db(&state, move |conn| {
        let viewer = signed_in(conn, claimed)?;
        catalog::draft_detail(conn, &viewer, id)
    })
    .await?;
    Ok(Json(detail))
}

/// GET /recipes/my/published/
pub async fn my_published(
    State(state): State<SharedState>,
    ClaimedUser(claimed): ClaimedUser,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<Page<RecipeSummary>>> {
    let page = with_db(&state, move |conn| {
        let viewer = signed_in(conn, claimed)?;
        listing::my_recipes(conn, &viewer, query.page)
    })
    .await?;
    Ok(Json(page))
}

/// GET /recipes/my/drafts/
pub async fn my_drafts(
    State(state): State<SharedState>,
    ClaimedUser(claimed): ClaimedUser,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<Page<RecipeSummary>>> {
    let page = with_db(&state, move |conn| {
        let viewer = signed_in(conn, claimed)?;
        listing::my_drafts(conn, &viewer, query.page)
    })
    .await?;
    Ok(Json(page))
}

/// GET /recipes/my/favourite/
pub async fn my_favourites(
    State(state): State<SharedState>,
    ClaimedUser(claimed): ClaimedUser,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<Page<FavouriteEntry>>> {
    let page = with_db(&state, move |conn| {
        let viewer = signed_in(conn, claimed)?;
        listing::my_favourites(conn, &viewer, query.page)
    })
    .await?;
    Ok(Json(page))
}
