//! Executable schema construction.

use std::sync::Arc;

use async_graphql::extensions::Tracing;
use async_graphql::{EmptySubscription, Schema};

use super::mutation::Mutation;
use super::query::RootQuery;
use crate::domain::ports::UserDirectory;

/// Executable schema exposing users and companies.
pub type GraphSchema = Schema<RootQuery, Mutation, EmptySubscription>;

/// Build the executable schema with `directory` injected for resolvers.
///
/// # Examples
/// ```rust,ignore
/// use std::sync::Arc;
///
/// use users_graphql::graphql::build_schema;
/// use users_graphql::test_support::InMemoryDirectory;
///
/// let schema = build_schema(Arc::new(InMemoryDirectory::seeded()));
/// let response = schema.execute(r#"{ user(id: "23") { firstName } }"#).await;
/// assert!(response.errors.is_empty());
/// ```
pub fn build_schema(directory: Arc<dyn UserDirectory>) -> GraphSchema {
    Schema::build(RootQuery, Mutation, EmptySubscription)
        .data(directory)
        .extension(Tracing)
        .finish()
}

/// Render the schema definition language for the type graph.
#[must_use]
pub fn sdl() -> String {
    Schema::build(RootQuery, Mutation, EmptySubscription)
        .finish()
        .sdl()
}
