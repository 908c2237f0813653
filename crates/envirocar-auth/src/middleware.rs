//! Tower authentication middleware.
//!
//! `AuthLayer` and `AuthService` run the [`TokenAuthenticator`] on every
//! request and store the resulting [`SecurityContext`](crate::SecurityContext)
//! in the request extensions. Requests with bad credentials never reach the
//! inner service.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::response::IntoResponse;
use http::Request;
use tower::{Layer, Service};

use crate::{AuthError, TokenAuthenticator};

/// Header set by TLS-terminating proxies.
const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Tower `Layer` that wraps services with token authentication.
#[derive(Clone, Debug)]
pub struct AuthLayer {
    authenticator: Arc<TokenAuthenticator>,
}

impl AuthLayer {
    /// Create a new auth layer around the given authenticator.
    pub fn new(authenticator: Arc<TokenAuthenticator>) -> Self {
        Self { authenticator }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthService {
            inner,
            authenticator: self.authenticator.clone(),
        }
    }
}

/// Tower `Service` that authenticates requests before forwarding them.
#[derive(Clone, Debug)]
pub struct AuthService<S> {
    inner: S,
    authenticator: Arc<TokenAuthenticator>,
}

impl<S> Service<Request<Body>> for AuthService<S>
where
    S: Service<Request<Body>, Error = Infallible> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send,
{
    type Response = axum::response::Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let authenticator = self.authenticator.clone();

        Box::pin(async move {
            let secure = is_secure(&req);
            match authenticator.authenticate_headers(req.headers(), secure) {
                Ok(ctx) => {
                    req.extensions_mut().insert(ctx);
                    let resp = inner
                        .call(req)
                        .await
                        .unwrap_or_else(|infallible| match infallible {});
                    Ok(resp.into_response())
                }
                Err(auth_err) => {
                    log::warn!(
                        "Authentication failed for {} {}: {auth_err}",
                        req.method(),
                        req.uri().path()
                    );
                    Ok(error_response(&auth_err))
                }
            }
        })
    }
}

/// Whether the request arrived over HTTPS, directly or via a proxy.
fn is_secure(req: &Request<Body>) -> bool {
    req.uri().scheme_str() == Some("https")
        || req
            .headers()
            .get(FORWARDED_PROTO)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.eq_ignore_ascii_case("https"))
}

/// Build the `400`/`403` response for a failed authentication.
fn error_response(err: &AuthError) -> axum::response::Response {
    let body = serde_json::json!({
        "error": {
            "category": "authentication",
            "message": err.to_string(),
        }
    });

    (
        err.status(),
        [(http::header::CONTENT_TYPE, "application/json")],
        serde_json::to_string(&body).unwrap_or_default(),
    )
        .into_response()
}
