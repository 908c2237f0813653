//! `/phenomena`

use axum::extract::{Path, Query, State};
use axum::response::Response;
use envirocar_encoding::json::decode;
use envirocar_rights::Permission;

use crate::error::ApiResult;
use crate::extract::{Caller, JsonBody, ListQuery, Negotiation};
use crate::response;
use crate::state::AppState;

/// `GET /phenomena`
pub async fn list(
    State(state): State<AppState>,
    caller: Caller,
    negotiation: Negotiation,
    Query(query): Query<ListQuery>,
) -> ApiResult<Response> {
    let phenomena = state
        .services
        .data
        .get_phenomena(query.pagination(&state.pagination)?)?;
    response::entity(&state, &caller, &negotiation, &phenomena)
}

/// `POST /phenomena`, admins only.
pub async fn create(
    State(state): State<AppState>,
    caller: Caller,
    JsonBody(body): JsonBody,
) -> ApiResult<Response> {
    caller.require_user(Permission::CreatePhenomenon)?;
    let phenomenon = decode::phenomenon(&body)?;
    let phenomenon = state.services.data.create_phenomenon(phenomenon)?;
    Ok(response::created(&state.links.phenomenon(&phenomenon.name)))
}

/// `GET /phenomena/{name}`
pub async fn get(
    State(state): State<AppState>,
    caller: Caller,
    negotiation: Negotiation,
    Path(name): Path<String>,
) -> ApiResult<Response> {
    let phenomenon = state.services.data.get_phenomenon(&name)?;
    response::entity(&state, &caller, &negotiation, &phenomenon)
}
