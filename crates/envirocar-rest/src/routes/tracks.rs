//! `/tracks`

use axum::extract::{Path, Query, State};
use axum::response::Response;
use envirocar_core::{MeasurementFilter, TrackFilter};
use envirocar_encoding::json::decode;
use envirocar_rights::{Permission, Target};

use crate::error::ApiResult;
use crate::extract::{Caller, JsonBody, ListQuery, Negotiation};
use crate::response;
use crate::state::AppState;

/// `GET /tracks`
pub async fn list(
    State(state): State<AppState>,
    caller: Caller,
    negotiation: Negotiation,
    Query(query): Query<ListQuery>,
) -> ApiResult<Response> {
    let filter = TrackFilter {
        owner: None,
        time: query.temporal()?,
        pagination: query.pagination(&state.pagination)?,
    };
    let tracks = state.services.data.get_tracks(&filter)?;
    response::entity(&state, &caller, &negotiation, &tracks)
}

/// `POST /tracks`: upload a GeoJSON feature collection owned by the caller.
pub async fn create(
    State(state): State<AppState>,
    caller: Caller,
    JsonBody(body): JsonBody,
) -> ApiResult<Response> {
    let owner = caller.require_user(Permission::CreateTrack)?;
    let (track, measurements) = decode::track(&body, owner)?;
    let count = measurements.len();
    let track = state.services.data.create_track(track, measurements)?;
    tracing::info!(track = %track.id, owner = %track.owner, measurements = count, "Uploaded track");
    Ok(response::created(&state.links.track(&track.id)))
}

/// `GET /tracks/{id}`: the track with its measurements, in any of JSON,
/// RDF or a zipped shapefile.
pub async fn get(
    State(state): State<AppState>,
    caller: Caller,
    negotiation: Negotiation,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let details = state.services.data.get_track_details(&id)?;
    caller.require(Target::Track(&details.track), Permission::View)?;
    response::entity(&state, &caller, &negotiation, &details)
}

/// `DELETE /tracks/{id}`
pub async fn delete(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let track = state.services.data.get_track(&id)?;
    caller.require(Target::Track(&track), Permission::DeleteTrack)?;
    state.services.data.delete_track(&id)?;
    Ok(response::no_content())
}

/// `GET /tracks/{id}/measurements`
pub async fn measurements(
    State(state): State<AppState>,
    caller: Caller,
    negotiation: Negotiation,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Response> {
    let track = state.services.data.get_track(&id)?;
    caller.require(Target::Track(&track), Permission::View)?;
    let filter = MeasurementFilter {
        track: Some(id),
        owner: None,
        time: query.temporal()?,
        pagination: query.pagination(&state.pagination)?,
    };
    let measurements = state.services.data.get_measurements(&filter)?;
    response::entity(&state, &caller, &negotiation, &measurements)
}
