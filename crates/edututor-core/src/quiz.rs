pub mod catalog;
pub mod error;
pub mod recorder;
pub mod session;
pub mod store;
