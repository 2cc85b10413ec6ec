// src/server/viewer.rs
//! Identity extraction
//!
//! The fronting proxy authenticates users and passes the numeric user id
//! in a header. Resolving it to a [`Viewer`](crate::Viewer) needs the
//! database, so the extractor only carries the claim.

use crate::server::SharedState;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::convert::Infallible;
use tracing::warn;

/// User id claimed by the request, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimedUser(pub Option<i64>);

#[axum::async_trait]
impl FromRequestParts<SharedState> for ClaimedUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(&state.config.user_header) else {
            return Ok(ClaimedUser(None));
        };

        let claimed = value
            .to_str()
            .ok()
            .and_then(|raw| raw.trim().parse::<i64>().ok());
        if claimed.is_none() {
            warn!(
                "Ignoring malformed {} header; treating request as anonymous",
                state.config.user_header
            );
        }
        Ok(ClaimedUser(claimed))
    }
}
