pub(crate) mod analytics;
pub(crate) mod assistant;
pub(crate) mod quiz;
pub(crate) mod status;
pub(crate) mod user;
