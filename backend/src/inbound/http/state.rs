//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data`; the schema already
//! holds the directory port, so handlers never touch outbound adapters.

use std::sync::Arc;

use crate::domain::ports::UserDirectory;
use crate::graphql::{GraphSchema, build_schema};

/// Dependency bundle for the GraphQL handlers.
#[derive(Clone)]
pub struct GraphqlState {
    schema: GraphSchema,
    graphiql: bool,
}

impl GraphqlState {
    /// Build state around a directory port.
    ///
    /// # Examples
    /// ```rust,ignore
    /// use std::sync::Arc;
    ///
    /// use users_graphql::inbound::http::GraphqlState;
    /// use users_graphql::test_support::InMemoryDirectory;
    ///
    /// let state = GraphqlState::new(Arc::new(InMemoryDirectory::seeded()), true);
    /// assert!(state.graphiql_enabled());
    /// ```
    #[must_use]
    pub fn new(directory: Arc<dyn UserDirectory>, graphiql: bool) -> Self {
        Self {
            schema: build_schema(directory),
            graphiql,
        }
    }

    /// Executable schema.
    #[must_use]
    pub const fn schema(&self) -> &GraphSchema {
        &self.schema
    }

    /// Whether `GET /graphql` may serve the GraphiQL page.
    #[must_use]
    pub const fn graphiql_enabled(&self) -> bool {
        self.graphiql
    }
}
