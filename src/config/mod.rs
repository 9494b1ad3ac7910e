pub mod columns;
pub mod settings;
pub mod validator;

pub use columns::*;
pub use settings::*;
pub use validator::*;
