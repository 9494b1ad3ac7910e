//! Entity services: direct parameterized SQL per entity, using the compilers in `sql`.

mod companies;
mod jobs;
mod users;
pub mod validation;

pub use companies::CompanyService;
pub use jobs::JobService;
pub use users::UserService;
pub use validation::{parse_body, Validate};
