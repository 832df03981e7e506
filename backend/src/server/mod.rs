//! Server construction and middleware wiring.

mod config;
mod settings;

pub use config::ServerConfig;
pub use settings::{ServerSettings, SettingsError};

use std::sync::Arc;

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use crate::domain::ports::UserDirectory;
use crate::inbound::http::GraphqlState;
use crate::inbound::http::graphql::{execute, execute_get};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::middleware::Trace;
use crate::outbound::rest::RestDirectory;

/// Shared state handed to every worker's application factory.
#[derive(Clone)]
pub struct AppDependencies {
    /// Readiness and liveness flags.
    pub health_state: web::Data<HealthState>,
    /// Schema and GraphiQL toggle.
    pub graphql_state: web::Data<GraphqlState>,
}

impl AppDependencies {
    /// Bundle a directory port with health state.
    #[must_use]
    pub fn new(
        health_state: web::Data<HealthState>,
        directory: Arc<dyn UserDirectory>,
        graphiql: bool,
    ) -> Self {
        Self {
            health_state,
            graphql_state: web::Data::new(GraphqlState::new(directory, graphiql)),
        }
    }
}

/// Build the actix application serving `/graphql` and the health probes.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        graphql_state,
    } = deps;

    App::new()
        .app_data(health_state)
        .app_data(graphql_state)
        .wrap(Trace)
        .service(execute)
        .service(execute_get)
        .service(ready)
        .service(live)
}

/// Construct an Actix HTTP server backed by the REST directory.
///
/// # Parameters
/// - `health_state`: shared readiness state marked ready once the socket is bound.
/// - `config`: resolved [`ServerConfig`] holding the bind address and store URL.
///
/// # Returns
/// A [`Server`] that must be awaited to drive the listener. The server does
/// not install signal handlers; pair it with [`drain_on`] to stop it.
///
/// # Errors
/// Propagates [`std::io::Error`] when the HTTP client cannot be built or the
/// socket cannot be bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        store_url,
        graphiql,
    } = config;
    let directory = RestDirectory::new(store_url)
        .map_err(|e| std::io::Error::other(format!("failed to build directory client: {e}")))?;
    let deps = AppDependencies::new(health_state.clone(), Arc::new(directory), graphiql);

    let server = HttpServer::new(move || build_app(deps.clone()))
        .disable_signals()
        .bind(bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}

/// Fail liveness and stop the server gracefully once `signal` resolves.
///
/// `/health/live` answers `503` while in-flight requests finish.
pub async fn drain_on(
    signal: impl Future<Output = ()>,
    health_state: web::Data<HealthState>,
    handle: ServerHandle,
) {
    signal.await;
    info!("shutdown requested, draining");
    health_state.mark_unhealthy();
    handle.stop(true).await;
}
