//! HTTP inbound adapter exposing the GraphQL endpoint and health probes.

pub mod graphql;
pub mod health;
pub mod state;

pub use state::GraphqlState;
