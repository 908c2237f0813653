//! Custom extractors for the resource handlers.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Request};
use envirocar_auth::{context_from_parts, SecurityContext};
use envirocar_core::{Pagination, TemporalFilter};
use envirocar_encoding::MediaType;
use envirocar_rights::{AccessRights, Permission, Target};
use http::header::{ACCEPT, CONTENT_TYPE};
use http::request::Parts;
use serde::Deserialize;
use url::Url;

use crate::config::PaginationConfig;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

// ============================================================================
// Caller
// ============================================================================

/// The caller of a request: its security context and access rights.
///
/// Never rejects; a request the auth layer did not see is anonymous.
#[derive(Debug, Clone)]
pub struct Caller {
    /// Identity established by the auth layer.
    pub context: SecurityContext,
    /// Rights derived from the identity.
    pub rights: AccessRights,
}

impl Caller {
    /// Name of the authenticated user, if any.
    pub fn name(&self) -> Option<&str> {
        self.context.user_name()
    }

    /// Whether the caller holds `permission` on `target`.
    pub fn allows(&self, target: Target<'_>, permission: Permission) -> bool {
        self.rights.allows(target, permission)
    }

    /// Fails with 403 unless the caller holds `permission` on `target`.
    pub fn require(&self, target: Target<'_>, permission: Permission) -> ApiResult<()> {
        if self.allows(target, permission) {
            Ok(())
        } else {
            Err(ApiError::forbidden(format!(
                "{} denied for {}",
                permission.as_str(),
                self.name().unwrap_or("anonymous")
            )))
        }
    }

    /// Like [`require`](Self::require) for an operation without an entity,
    /// returning the caller's name.
    pub fn require_user(&self, permission: Permission) -> ApiResult<&str> {
        self.require(Target::Service, permission)?;
        self.name()
            .ok_or_else(|| ApiError::forbidden(format!("{} needs a user", permission.as_str())))
    }
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let context = context_from_parts(parts);
        let rights = state.rights(&context);
        Ok(Self { context, rights })
    }
}

// ============================================================================
// Negotiation
// ============================================================================

/// What content negotiation needs from the request: the `Accept` header and
/// the absolute URI of the requested resource.
#[derive(Debug, Clone)]
pub struct Negotiation {
    /// Raw `Accept` header, if present and readable.
    pub accept: Option<String>,
    /// The requested resource, used for pagination links.
    pub resource: Url,
}

impl FromRequestParts<AppState> for Negotiation {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let accept = parts
            .headers
            .get_all(ACCEPT)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect::<Vec<_>>()
            .join(",");
        Ok(Self {
            accept: (!accept.is_empty()).then_some(accept),
            resource: state.links.resolve(parts.uri.path()),
        })
    }
}

// ============================================================================
// JSON request bodies
// ============================================================================

/// Raw body of a request declaring a JSON media type.
///
/// A missing `Content-Type` is accepted as JSON; any other type is
/// rejected with 415.
#[derive(Debug, Clone)]
pub struct JsonBody(pub Bytes);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(value) = req.headers().get(CONTENT_TYPE) {
            let text = value
                .to_str()
                .map_err(|_| ApiError::bad_request("Content-Type is not valid text"))?;
            if !MediaType::parse(text)?.is_json() {
                return Err(ApiError::unsupported_media_type(text));
            }
        }
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;
        Ok(Self(body))
    }
}

// ============================================================================
// Query parameters
// ============================================================================

/// Paging and time window parameters shared by the collection resources.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    /// 1-based page number.
    pub page: Option<String>,
    /// Page size.
    pub limit: Option<String>,
    /// Lower time bound, RFC 3339.
    pub after: Option<String>,
    /// Upper time bound, RFC 3339.
    pub before: Option<String>,
    /// `start,end`, overriding `after` and `before`.
    pub during: Option<String>,
}

impl ListQuery {
    /// The requested page, if any.
    pub fn pagination(&self, config: &PaginationConfig) -> ApiResult<Option<Pagination>> {
        Ok(Pagination::parse(
            self.page.as_deref(),
            self.limit.as_deref(),
            config.default_limit,
            config.max_limit,
        )?)
    }

    /// The requested time window, if any.
    pub fn temporal(&self) -> ApiResult<Option<TemporalFilter>> {
        Ok(TemporalFilter::parse(
            self.after.as_deref(),
            self.before.as_deref(),
            self.during.as_deref(),
        )?)
    }
}

/// Parameters of the measurement listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeasurementQuery {
    /// Paging and time window.
    #[serde(flatten)]
    pub list: ListQuery,
    /// Only measurements of this track.
    pub track: Option<String>,
    /// Only measurements of this user.
    pub user: Option<String>,
}
