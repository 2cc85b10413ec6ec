// src/server/handlers/ajax.rs
//! Favourite and comment endpoints called from recipe pages

use crate::catalog::{self, RenderedComment};
use crate::server::handlers::with_db;
use crate::server::{ApiResult, ClaimedUser, SharedState};
use crate::{Error, FieldError, Viewer};
use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct FavouriteResponse {
    pub created: bool,
}

/// GET /recipe/:id/favourite/
///
/// Flips the viewer's favourite and reports the new state.
pub async fn toggle_favourite(
    State(state): State<SharedState>,
    ClaimedUser(claimed): ClaimedUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<FavouriteResponse>> {
    let created = with_db(&state, move |conn| {
        let viewer = Viewer::load(conn, claimed)?;
        catalog::toggle_favourite(conn, &viewer, id)
    })
    .await?;
    Ok(Json(FavouriteResponse { created }))
}

#[derive(Debug, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<RenderedComment>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

/// POST /recipe/:id/add_comment/
///
/// A comment that fails validation is reported in the body with
/// `success: false` so the page can show it inline.
pub async fn add_comment(
    State(state): State<SharedState>,
    ClaimedUser(claimed): ClaimedUser,
    Path(id): Path<i64>,
    Json(form): Json<CommentForm>,
) -> ApiResult<Json<CommentResponse>> {
    let result = with_db(&state, move |conn| {
        let viewer = Viewer::load(conn, claimed)?;
        match catalog::add_comment(conn, &viewer, id, &form.text) {
            Ok(comment) => Ok(CommentResponse {
                success: true,
                comment: Some(comment),
                errors: Vec::new(),
            }),
            Err(Error::Validation(errors)) => Ok(CommentResponse {
                success: false,
                comment: None,
                errors: errors.errors().to_vec(),
            }),
            Err(other) => Err(other),
        }
    })
    .await?;
    Ok(Json(result))
}
