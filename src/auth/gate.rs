//! Route policies and their evaluation against verified claims.

use crate::auth::Claims;
use crate::error::AppError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Policy {
    RequireAuthenticated,
    RequireElevated,
    /// Admin, or the subject whose identity is bound in the route.
    RequireSelfOrElevated(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Denial {
    /// No valid credentials on the request.
    Unauthorized,
    /// Valid identity without the needed privilege or ownership.
    Forbidden,
}

impl From<Denial> for AppError {
    fn from(d: Denial) -> Self {
        match d {
            Denial::Unauthorized => AppError::Unauthorized,
            Denial::Forbidden => AppError::Forbidden,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Allowed(Claims),
    Denied(Denial),
}

pub fn evaluate(policy: &Policy, claims: Option<&Claims>) -> Decision {
    let Some(claims) = claims else {
        return Decision::Denied(Denial::Unauthorized);
    };
    let allowed = match policy {
        Policy::RequireAuthenticated => true,
        Policy::RequireElevated => claims.is_admin,
        Policy::RequireSelfOrElevated(identity) => claims.is_admin || claims.username == *identity,
    };
    if allowed {
        Decision::Allowed(claims.clone())
    } else {
        Decision::Denied(Denial::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(username: &str, is_admin: bool) -> Claims {
        Claims {
            username: username.into(),
            is_admin,
            iat: 0,
            exp: 0,
        }
    }

    #[test]
    fn every_policy_denies_anonymous() {
        for p in [
            Policy::RequireAuthenticated,
            Policy::RequireElevated,
            Policy::RequireSelfOrElevated("bob".into()),
        ] {
            assert_eq!(evaluate(&p, None), Decision::Denied(Denial::Unauthorized));
        }
    }

    #[test]
    fn authenticated_allows_any_valid_claims() {
        let c = claims("alice", false);
        assert_eq!(evaluate(&Policy::RequireAuthenticated, Some(&c)), Decision::Allowed(c.clone()));
    }

    #[test]
    fn elevated_requires_admin() {
        assert_eq!(
            evaluate(&Policy::RequireElevated, Some(&claims("alice", false))),
            Decision::Denied(Denial::Forbidden)
        );
        assert!(matches!(
            evaluate(&Policy::RequireElevated, Some(&claims("alice", true))),
            Decision::Allowed(_)
        ));
    }

    #[test]
    fn self_or_elevated() {
        let policy = Policy::RequireSelfOrElevated("bob".into());
        assert_eq!(
            evaluate(&policy, Some(&claims("alice", false))),
            Decision::Denied(Denial::Forbidden)
        );
        assert!(matches!(evaluate(&policy, Some(&claims("alice", true))), Decision::Allowed(_)));
        assert!(matches!(evaluate(&policy, Some(&claims("bob", false))), Decision::Allowed(_)));
    }

    #[test]
    fn identity_match_is_exact() {
        let policy = Policy::RequireSelfOrElevated("bob".into());
        assert_eq!(
            evaluate(&policy, Some(&claims("Bob", false))),
            Decision::Denied(Denial::Forbidden)
        );
    }
}
