//! Response helpers: negotiated entity bodies, `201 Created`, `204 No Content`.

use axum::response::{IntoResponse, Response};
use envirocar_encoding::{negotiate, EncodeContext, Format, Negotiated, Writable};
use http::header::{CONTENT_TYPE, LOCATION};
use http::StatusCode;
use url::Url;

use crate::error::{ApiError, ApiResult};
use crate::extract::{Caller, Negotiation};
use crate::state::AppState;

/// Encodes `value` in the format negotiated from the request's `Accept`
/// header, filtered through the caller's rights.
///
/// Fails with 406 when none of the entity's formats is acceptable.
pub fn entity<T: Writable>(
    state: &AppState,
    caller: &Caller,
    negotiation: &Negotiation,
    value: &T,
) -> ApiResult<Response> {
    let writer = state.writers.writer::<T>();
    let formats = writer.formats();
    let Negotiated { format, media_type } = negotiate(negotiation.accept.as_deref(), &formats)
        .ok_or_else(|| {
            ApiError::not_acceptable(format!(
                "{} is available as {}",
                writer.entity(),
                list(&formats)
            ))
        })?;

    if !writer.is_writeable(&media_type) {
        return Err(ApiError::not_acceptable(format!(
            "{} cannot be written as {media_type}",
            writer.entity()
        )));
    }

    let ctx = EncodeContext::new(&caller.rights, &state.links, &media_type)
        .with_resource(&negotiation.resource);
    let mut body = Vec::new();
    state.writers.write_to(value, format, &ctx, &mut body)?;
    tracing::debug!(
        entity = writer.entity(),
        media_type = %media_type,
        bytes = body.len(),
        "Encoded response"
    );
    Ok(([(CONTENT_TYPE, media_type.to_string())], body).into_response())
}

/// A JSON-only document such as the API root.
pub fn json_document(
    negotiation: &Negotiation,
    document: &serde_json::Value,
) -> ApiResult<Response> {
    let Negotiated { media_type, .. } = negotiate(negotiation.accept.as_deref(), &[Format::Json])
        .ok_or_else(|| ApiError::not_acceptable("only JSON is available"))?;
    let body = serde_json::to_vec(document).map_err(|e| ApiError::internal(e.to_string()))?;
    Ok(([(CONTENT_TYPE, media_type.to_string())], body).into_response())
}

/// `201 Created` pointing at the new resource.
pub fn created(location: &Url) -> Response {
    (
        StatusCode::CREATED,
        [(LOCATION, location.as_str().to_string())],
    )
        .into_response()
}

/// `204 No Content`.
pub fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

fn list(formats: &[Format]) -> String {
    formats
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
