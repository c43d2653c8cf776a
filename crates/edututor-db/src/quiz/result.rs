mod mutation;
mod query;

pub use mutation::{Mutation, NewQuizResult};
pub use query::Query;
