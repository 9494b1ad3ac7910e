//! Rows returned to clients and request bodies accepted from them.

mod company;
mod job;
mod user;

pub use company::*;
pub use job::*;
pub use user::*;
