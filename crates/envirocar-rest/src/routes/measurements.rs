//! `/measurements`

use axum::extract::{Path, Query, State};
use axum::response::Response;
use envirocar_core::MeasurementFilter;
use envirocar_rights::{Permission, Target};

use crate::error::ApiResult;
use crate::extract::{Caller, MeasurementQuery, Negotiation};
use crate::response;
use crate::state::AppState;

/// `GET /measurements?track=&user=&after=&before=&during=&page=&limit=`
pub async fn list(
    State(state): State<AppState>,
    caller: Caller,
    negotiation: Negotiation,
    Query(query): Query<MeasurementQuery>,
) -> ApiResult<Response> {
    // Filtering by user reveals who owns the matching measurements.
    if let Some(user) = &query.user {
        caller.require(Target::Named(user), Permission::Tracks)?;
    }
    let filter = MeasurementFilter {
        time: query.list.temporal()?,
        pagination: query.list.pagination(&state.pagination)?,
        track: query.track,
        owner: query.user,
    };
    let measurements = state.services.data.get_measurements(&filter)?;
    response::entity(&state, &caller, &negotiation, &measurements)
}

/// `GET /measurements/{id}`
pub async fn get(
    State(state): State<AppState>,
    caller: Caller,
    negotiation: Negotiation,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let measurement = state.services.data.get_measurement(&id)?;
    caller.require(Target::Measurement(&measurement), Permission::View)?;
    response::entity(&state, &caller, &negotiation, &measurement)
}
