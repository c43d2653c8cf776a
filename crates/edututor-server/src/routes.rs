pub(crate) mod api;
pub(crate) mod error;
pub(crate) mod login;
pub(crate) mod swagger;
