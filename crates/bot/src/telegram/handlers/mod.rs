//! Handler types and the dispatcher schema

pub mod downloads;
pub mod schema;
pub mod types;

pub use schema::schema;
pub use types::{HandlerDeps, HandlerError};
