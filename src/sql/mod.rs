//! Safe SQL composition: identifiers from static maps only, values as parameters.

mod builder;
pub mod exec;
pub mod filter;
pub mod params;
pub mod partial_update;

pub use builder::*;
pub use filter::*;
pub use params::*;
pub use partial_update::*;
