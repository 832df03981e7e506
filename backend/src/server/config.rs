//! HTTP server configuration object.

use std::net::SocketAddr;

use reqwest::Url;

/// Resolved configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) store_url: Url,
    pub(crate) graphiql: bool,
}

impl ServerConfig {
    /// Construct a configuration with the GraphiQL page enabled.
    #[must_use]
    pub const fn new(bind_addr: SocketAddr, store_url: Url) -> Self {
        Self {
            bind_addr,
            store_url,
            graphiql: true,
        }
    }

    /// Enable or disable the GraphiQL page on `GET /graphql`.
    #[must_use]
    pub const fn with_graphiql(mut self, enabled: bool) -> Self {
        self.graphiql = enabled;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Return the base URL of the REST directory.
    #[must_use]
    pub const fn store_url(&self) -> &Url {
        &self.store_url
    }

    /// Return whether the GraphiQL page is served.
    #[must_use]
    pub const fn graphiql(&self) -> bool {
        self.graphiql
    }
}
