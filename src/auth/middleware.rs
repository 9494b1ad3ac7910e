//! Axum middleware: record bearer credentials, then enforce a per-route guard.

use crate::auth::gate::{evaluate, Decision, Policy};
use crate::auth::{AuthError, Claims};
use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::state::AppState;
use axum::{
    extract::{Path, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::collections::HashMap;

/// Which policy a route group enforces. `SelfOrAdmin` names the path segment holding the identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteGuard {
    Authenticated,
    Admin,
    SelfOrAdmin(&'static str),
}

impl RouteGuard {
    fn policy(&self, params: Option<&HashMap<String, String>>) -> Policy {
        match self {
            RouteGuard::Authenticated => Policy::RequireAuthenticated,
            RouteGuard::Admin => Policy::RequireElevated,
            RouteGuard::SelfOrAdmin(param) => match params.and_then(|p| p.get(*param)) {
                Some(identity) => Policy::RequireSelfOrElevated(identity.clone()),
                None => Policy::RequireElevated,
            },
        }
    }
}

/// What `authenticate` found in the `Authorization` header. Absent when no bearer token was sent.
#[derive(Clone, Debug)]
pub enum Credentials {
    Verified(Claims),
    /// A token was presented but failed verification (bad signature, malformed, expired).
    Rejected,
}

impl Credentials {
    fn claims(&self) -> Option<&Claims> {
        match self {
            Credentials::Verified(claims) => Some(claims),
            Credentials::Rejected => None,
        }
    }
}

/// Verify the bearer token if one is present and record the outcome.
/// Public routes ignore it; guards turn a rejected token into `invalid_token`.
pub async fn authenticate(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let credentials = extract_bearer_token(request.headers()).map(|token| match state.tokens.verify(token) {
        Ok(claims) => Credentials::Verified(claims),
        Err(err) => {
            tracing::debug!("bearer token rejected: {err}");
            Credentials::Rejected
        }
    });
    if let Some(credentials) = credentials {
        request.extensions_mut().insert(credentials);
    }
    next.run(request).await
}

/// Route layer: evaluate the guard's policy before the handler runs.
pub async fn guard(
    State(route_guard): State<RouteGuard>,
    params: Option<Path<HashMap<String, String>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let credentials = request.extensions().get::<Credentials>();
    if let Some(Credentials::Rejected) = credentials {
        tracing::warn!(?route_guard, path = %request.uri().path(), "invalid bearer token");
        return Err(AuthError::Invalid.into());
    }
    let policy = route_guard.policy(params.as_ref().map(|Path(p)| p));
    let decision = evaluate(&policy, credentials.and_then(Credentials::claims));
    match decision {
        Decision::Allowed(claims) => {
            request.extensions_mut().insert(CurrentUser(claims));
            Ok(next.run(request).await)
        }
        Decision::Denied(denial) => {
            tracing::warn!(?policy, ?denial, path = %request.uri().path(), "access denied");
            Err(denial.into())
        }
    }
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn self_or_admin_binds_path_identity() {
        let params: HashMap<String, String> = [("username".to_string(), "bob".to_string())].into();
        assert_eq!(
            RouteGuard::SelfOrAdmin("username").policy(Some(&params)),
            Policy::RequireSelfOrElevated("bob".into())
        );
    }

    #[test]
    fn self_or_admin_without_segment_requires_admin() {
        assert_eq!(RouteGuard::SelfOrAdmin("username").policy(None), Policy::RequireElevated);
    }

    #[test]
    fn rejected_credentials_carry_no_claims() {
        assert!(Credentials::Rejected.claims().is_none());
        let claims = Claims {
            username: "u1".into(),
            is_admin: false,
            iat: 0,
            exp: 60,
        };
        assert_eq!(Credentials::Verified(claims.clone()).claims(), Some(&claims));
    }

    #[test]
    fn bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_bearer_token(&headers), None);
        headers.insert("authorization", HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(extract_bearer_token(&headers), Some("abc.def.ghi"));
        headers.insert("authorization", HeaderValue::from_static("Basic dXNlcjpwdw=="));
        assert_eq!(extract_bearer_token(&headers), None);
    }
}
