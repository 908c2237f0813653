//! `/groups` and group membership.

use axum::extract::{Path, Query, State};
use axum::response::Response;
use envirocar_encoding::json::decode;
use envirocar_rights::{Permission, Target};

use crate::error::ApiResult;
use crate::extract::{Caller, JsonBody, ListQuery, Negotiation};
use crate::response;
use crate::state::AppState;

/// `GET /groups`
pub async fn list(
    State(state): State<AppState>,
    caller: Caller,
    negotiation: Negotiation,
    Query(query): Query<ListQuery>,
) -> ApiResult<Response> {
    let groups = state
        .services
        .groups
        .get_groups(query.pagination(&state.pagination)?)?;
    response::entity(&state, &caller, &negotiation, &groups)
}

/// `POST /groups`: the caller becomes owner and first member.
pub async fn create(
    State(state): State<AppState>,
    caller: Caller,
    JsonBody(body): JsonBody,
) -> ApiResult<Response> {
    let owner = caller.require_user(Permission::CreateGroup)?;
    let group = decode::group(&body, owner)?;
    let group = state.services.groups.create_group(group)?;
    tracing::info!(group = %group.name, owner = %group.owner, "Created group");
    Ok(response::created(&state.links.group(&group.name)))
}

/// `GET /groups/{group}`
pub async fn get(
    State(state): State<AppState>,
    caller: Caller,
    negotiation: Negotiation,
    Path(name): Path<String>,
) -> ApiResult<Response> {
    let group = state.services.groups.get_group(&name)?;
    caller.require(Target::Group(&group), Permission::View)?;
    response::entity(&state, &caller, &negotiation, &group)
}

/// `DELETE /groups/{group}`
pub async fn delete(
    State(state): State<AppState>,
    caller: Caller,
    Path(name): Path<String>,
) -> ApiResult<Response> {
    let group = state.services.groups.get_group(&name)?;
    caller.require(Target::Group(&group), Permission::DeleteGroup)?;
    state.services.groups.delete_group(&name)?;
    Ok(response::no_content())
}

/// `GET /groups/{group}/members`
pub async fn members(
    State(state): State<AppState>,
    caller: Caller,
    negotiation: Negotiation,
    Path(name): Path<String>,
) -> ApiResult<Response> {
    let group = state.services.groups.get_group(&name)?;
    caller.require(Target::Group(&group), Permission::View)?;
    let members = state.services.groups.get_members(&name)?;
    response::entity(&state, &caller, &negotiation, &members)
}

/// `PUT /groups/{group}/members/{user}`: join, for the user itself or an
/// admin.
pub async fn join(
    State(state): State<AppState>,
    caller: Caller,
    Path((name, member)): Path<(String, String)>,
) -> ApiResult<Response> {
    state.services.groups.get_group(&name)?;
    caller.require(Target::Named(&member), Permission::JoinGroup)?;
    state.services.groups.add_member(&name, &member)?;
    Ok(response::no_content())
}

/// `DELETE /groups/{group}/members/{user}`: leave, for the user itself or
/// an admin.
pub async fn leave(
    State(state): State<AppState>,
    caller: Caller,
    Path((name, member)): Path<(String, String)>,
) -> ApiResult<Response> {
    state.services.groups.get_group(&name)?;
    caller.require(Target::Named(&member), Permission::LeaveGroup)?;
    state.services.groups.remove_member(&name, &member)?;
    Ok(response::no_content())
}
