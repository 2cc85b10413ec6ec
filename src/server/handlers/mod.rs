// src/server/handlers/mod.rs
//! HTTP request handlers for the recipebox server

pub mod ajax;
pub mod public;
pub mod user;

use crate::Viewer;
use crate::server::{ApiError, ApiResult, Problem, SharedState};
use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Run catalog work against a fresh connection on the blocking pool
pub(crate) async fn with_db<F, T>(state: &SharedState, f: F) -> ApiResult<T>
where
    F: FnOnce(&mut Connection) -> crate::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let state = Arc::clone(state);
    let result: crate::Result<T> = tokio::task::spawn_blocking(move || {
        let mut conn = state.open_db()?;
        f(&mut conn)
    })
    .await
    .map_err(|e| ApiError(Problem::internal(&format!("Task join error: {}", e))))?;

    result.map_err(ApiError::from)
}

/// Resolve the viewer and insist on a signed-in user
pub(crate) fn signed_in(conn: &Connection, claimed: Option<i64>) -> crate::Result<Viewer> {
    let viewer = Viewer::load(conn, claimed)?;
    viewer.require_user()?;
    Ok(viewer)
}

/// `?page=N` on every listing
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "first_page")]
    pub page: usize,
}

fn first_page() -> usize {
    1
}

/// Severity of a flash message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Warning,
    Error,
}

/// A one-shot message shown after a redirect
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub level: Level,
    pub text: String,
}

/// 303 See Other carrying flash messages in the body
#[derive(Debug)]
pub struct SeeOther {
    location: String,
    messages: Vec<Message>,
}

impl SeeOther {
    pub fn to(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            messages: Vec::new(),
        }
    }

    pub fn with(mut self, level: Level, text: impl Into<String>) -> Self {
        self.messages.push(Message {
            level,
            text: text.into(),
        });
        self
    }
}

#[derive(Serialize)]
struct Messages {
    messages: Vec<Message>,
}

impl IntoResponse for SeeOther {
    fn into_response(self) -> Response {
        (
            StatusCode::SEE_OTHER,
            [(header::LOCATION, self.location)],
            Json(Messages {
                messages: self.messages,
            }),
        )
            .into_response()
    }
}

pub(crate) fn recipe_url(id: i64) -> String {
    format!("/recipe/{id}/")
}

pub(crate) fn edit_url(id: i64) -> String {
    format!("/recipe/{id}/edit/")
}

pub(crate) fn publish_url(id: i64) -> String {
    format!("/recipe/{id}/publish/")
}
