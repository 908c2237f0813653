//! `/users` and everything below a single user.

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use envirocar_core::{FuelingFilter, TrackFilter};
use envirocar_encoding::json::decode;
use envirocar_rights::{Permission, Target};
use sha2::{Digest, Sha256};

use crate::error::{ApiError, ApiResult};
use crate::extract::{Caller, JsonBody, ListQuery, Negotiation};
use crate::response;
use crate::state::AppState;

// ============================================================================
// Users
// ============================================================================

/// `GET /users`
pub async fn list(
    State(state): State<AppState>,
    caller: Caller,
    negotiation: Negotiation,
    Query(query): Query<ListQuery>,
) -> ApiResult<Response> {
    let users = state
        .services
        .users
        .get_users(query.pagination(&state.pagination)?)?;
    response::entity(&state, &caller, &negotiation, &users)
}

/// `POST /users`: registration, open to anonymous callers.
pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> ApiResult<Response> {
    let user = decode::user(&body)?;
    let user = state.services.users.create_user(user)?;
    tracing::info!(user = %user.name, "Registered user");
    Ok(response::created(&state.links.user(&user.name)))
}

/// `GET /users/{user}`
pub async fn get(
    State(state): State<AppState>,
    caller: Caller,
    negotiation: Negotiation,
    Path(name): Path<String>,
) -> ApiResult<Response> {
    let user = state.services.users.get_user(&name)?;
    response::entity(&state, &caller, &negotiation, &user)
}

/// `PUT /users/{user}`
pub async fn modify(
    State(state): State<AppState>,
    caller: Caller,
    Path(name): Path<String>,
    JsonBody(body): JsonBody,
) -> ApiResult<Response> {
    let user = state.services.users.get_user(&name)?;
    caller.require(Target::User(&user), Permission::ModifyUser)?;
    let update = decode::user_update(&body, &name)?;
    state.services.users.modify_user(&name, update)?;
    Ok(response::no_content())
}

/// `DELETE /users/{user}`
pub async fn delete(
    State(state): State<AppState>,
    caller: Caller,
    Path(name): Path<String>,
) -> ApiResult<Response> {
    let user = state.services.users.get_user(&name)?;
    caller.require(Target::User(&user), Permission::DeleteUser)?;
    state.services.users.delete_user(&name)?;
    tracing::info!(user = %name, by = caller.name().unwrap_or_default(), "Deleted user");
    Ok(response::no_content())
}

/// Gravatar endpoint avatars are served from.
const GRAVATAR: &str = "https://www.gravatar.com/avatar/";

/// `GET /users/{user}/avatar`: redirects to a generated identicon.
///
/// The image is keyed by a digest of the user name, never the mail address,
/// so the redirect reveals nothing [`Permission::Mail`] hides.
pub async fn avatar(
    State(state): State<AppState>,
    caller: Caller,
    Path(name): Path<String>,
) -> ApiResult<Response> {
    let user = state.services.users.get_user(&name)?;
    caller.require(Target::User(&user), Permission::Avatar)?;
    Ok(Redirect::to(&avatar_url(&user.name)).into_response())
}

fn avatar_url(name: &str) -> String {
    let digest = hex::encode(Sha256::digest(name.as_bytes()));
    format!("{GRAVATAR}{digest}?d=identicon")
}

// ============================================================================
// Friends
// ============================================================================

/// `GET /users/{user}/friends`
pub async fn friends(
    State(state): State<AppState>,
    caller: Caller,
    negotiation: Negotiation,
    Path(name): Path<String>,
) -> ApiResult<Response> {
    let user = state.services.users.get_user(&name)?;
    caller.require(Target::User(&user), Permission::Friends)?;
    let friends = state.services.friends.get_friends(&name)?;
    response::entity(&state, &caller, &negotiation, &friends)
}

/// `PUT /users/{user}/friends/{friend}`
pub async fn add_friend(
    State(state): State<AppState>,
    caller: Caller,
    Path((name, friend)): Path<(String, String)>,
) -> ApiResult<Response> {
    let user = state.services.users.get_user(&name)?;
    caller.require(Target::User(&user), Permission::ManageFriends)?;
    state.services.friends.add_friend(&name, &friend)?;
    Ok(response::no_content())
}

/// `DELETE /users/{user}/friends/{friend}`
pub async fn remove_friend(
    State(state): State<AppState>,
    caller: Caller,
    Path((name, friend)): Path<(String, String)>,
) -> ApiResult<Response> {
    let user = state.services.users.get_user(&name)?;
    caller.require(Target::User(&user), Permission::ManageFriends)?;
    state.services.friends.remove_friend(&name, &friend)?;
    Ok(response::no_content())
}

// ============================================================================
// Groups and tracks of a user
// ============================================================================

/// `GET /users/{user}/groups`
pub async fn groups(
    State(state): State<AppState>,
    caller: Caller,
    negotiation: Negotiation,
    Path(name): Path<String>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Response> {
    let user = state.services.users.get_user(&name)?;
    caller.require(Target::User(&user), Permission::Groups)?;
    let groups = state
        .services
        .groups
        .get_groups_of(&name, query.pagination(&state.pagination)?)?;
    response::entity(&state, &caller, &negotiation, &groups)
}

/// `GET /users/{user}/tracks`
pub async fn tracks(
    State(state): State<AppState>,
    caller: Caller,
    negotiation: Negotiation,
    Path(name): Path<String>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Response> {
    let user = state.services.users.get_user(&name)?;
    caller.require(Target::User(&user), Permission::Tracks)?;
    let filter = TrackFilter {
        owner: Some(name),
        time: query.temporal()?,
        pagination: query.pagination(&state.pagination)?,
    };
    let tracks = state.services.data.get_tracks(&filter)?;
    response::entity(&state, &caller, &negotiation, &tracks)
}

// ============================================================================
// Fuelings
// ============================================================================

/// `GET /users/{user}/fuelings`
pub async fn fuelings(
    State(state): State<AppState>,
    caller: Caller,
    negotiation: Negotiation,
    Path(name): Path<String>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Response> {
    let user = state.services.users.get_user(&name)?;
    caller.require(Target::User(&user), Permission::Fuelings)?;
    let filter = FuelingFilter {
        owner: name,
        time: query.temporal()?,
        pagination: query.pagination(&state.pagination)?,
    };
    let fuelings = state.services.data.get_fuelings(&filter)?;
    response::entity(&state, &caller, &negotiation, &fuelings)
}

/// `POST /users/{user}/fuelings`
///
/// The fueling is owned by the caller, so the path must name the caller.
/// Admins cannot log fuelings on behalf of others.
pub async fn create_fueling(
    State(state): State<AppState>,
    caller: Caller,
    Path(name): Path<String>,
    JsonBody(body): JsonBody,
) -> ApiResult<Response> {
    let user = state.services.users.get_user(&name)?;
    caller.require(Target::User(&user), Permission::CreateFueling)?;
    let owner = caller
        .name()
        .filter(|me| *me == user.name)
        .ok_or_else(|| ApiError::forbidden(format!("fuelings of {name} are logged by {name}")))?;
    let fueling = decode::fueling(&body, owner)?;
    let fueling = state.services.data.create_fueling(fueling)?;
    Ok(response::created(
        &state.links.fueling(&fueling.owner, &fueling.id),
    ))
}

/// `GET /users/{user}/fuelings/{id}`
pub async fn fueling(
    State(state): State<AppState>,
    caller: Caller,
    negotiation: Negotiation,
    Path((name, id)): Path<(String, String)>,
) -> ApiResult<Response> {
    let user = state.services.users.get_user(&name)?;
    caller.require(Target::User(&user), Permission::Fuelings)?;
    let fueling = state.services.data.get_fueling(&name, &id)?;
    response::entity(&state, &caller, &negotiation, &fueling)
}

/// `DELETE /users/{user}/fuelings/{id}`
pub async fn delete_fueling(
    State(state): State<AppState>,
    caller: Caller,
    Path((name, id)): Path<(String, String)>,
) -> ApiResult<Response> {
    let fueling = state.services.data.get_fueling(&name, &id)?;
    caller.require(Target::Fueling(&fueling), Permission::DeleteFueling)?;
    state.services.data.delete_fueling(&name, &id)?;
    Ok(response::no_content())
}
