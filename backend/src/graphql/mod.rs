//! GraphQL type graph and resolvers.
//!
//! `User` and `Company` reference each other; the engine's type registry
//! resolves those references lazily, so declaration order does not matter.
//! Every resolver that needs external data makes exactly one call through the
//! [`UserDirectory`](crate::domain::ports::UserDirectory) port.

mod error;
mod mutation;
mod query;
mod schema;
mod types;

pub use mutation::Mutation;
pub use query::RootQuery;
pub use schema::{GraphSchema, build_schema, sdl};
pub use types::{Company, User};
