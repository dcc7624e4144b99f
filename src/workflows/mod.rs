pub mod modifications;
pub mod names;
pub mod query;
pub mod resolver;
