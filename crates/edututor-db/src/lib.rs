pub mod access_tokens;
pub mod quiz;
pub mod schema;
pub mod user;
pub mod util;

pub use sea_orm;
