pub mod access_tokens;
pub mod quiz;
pub mod user;
