//! Resource handlers, one module per top-level collection.

pub mod groups;
pub mod measurements;
pub mod phenomena;
pub mod tracks;
pub mod users;

use axum::extract::State;
use axum::response::Response;
use envirocar_encoding::json::encode;

use crate::error::ApiResult;
use crate::extract::Negotiation;
use crate::response;
use crate::state::AppState;

/// `GET /`: links to the top-level collections.
pub async fn root(State(state): State<AppState>, negotiation: Negotiation) -> ApiResult<Response> {
    response::json_document(&negotiation, &encode::root(&state.links))
}
