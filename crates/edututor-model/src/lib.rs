pub mod analytics;
pub mod assistant;
pub mod login;
pub mod quiz;
pub mod status;
pub mod user;
