//! Credential tokens, route policies, and password hashing.

pub mod gate;
pub mod middleware;
mod password;
mod token;

pub use gate::{evaluate, Decision, Denial, Policy};
pub use middleware::{authenticate, guard, Credentials, RouteGuard};
pub use password::PasswordHasher;
pub use token::{AuthError, Claims, TokenIssuer};
