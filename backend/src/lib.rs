//! GraphQL gateway over a REST users/companies directory.
//!
//! The schema exposes `User` and `Company` records, reads them through the
//! `UserDirectory` port and forwards user mutations to the same port. The
//! production adapter speaks HTTP to a json-server style REST store.

pub mod domain;
pub mod graphql;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use middleware::Trace;
