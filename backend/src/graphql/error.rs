//! Mapping from directory failures to GraphQL field errors.

use std::sync::Arc;

use async_graphql::{Context, ErrorExtensions};
use tracing::warn;

use crate::domain::ports::{DirectoryError, UserDirectory};
use crate::middleware::TraceId;

/// Borrow the directory port injected into the schema.
pub(super) fn directory<'ctx>(
    ctx: &Context<'ctx>,
) -> async_graphql::Result<&'ctx Arc<dyn UserDirectory>> {
    ctx.data::<Arc<dyn UserDirectory>>()
}

/// Record a directory failure against the resolving field and yield `None`.
///
/// The field resolves to `null` while the error lands in the response's
/// `errors` list with the field's path. Sibling fields keep resolving.
pub(super) fn field_failed<T>(ctx: &Context<'_>, error: DirectoryError) -> Option<T> {
    let error = upstream_error(error).into_server_error(ctx.item.pos);
    ctx.add_error(ctx.set_error_path(error));
    None
}

/// Convert a directory failure into a GraphQL error.
///
/// The error carries `code` and, when a request is in scope, `traceId`
/// extensions.
fn upstream_error(error: DirectoryError) -> async_graphql::Error {
    let trace_id = TraceId::current();
    warn!(%error, code = error.code(), "directory call failed");
    async_graphql::Error::new(error.to_string()).extend_with(|_, extensions| {
        extensions.set("code", error.code());
        if let Some(id) = trace_id {
            extensions.set("traceId", id.to_string());
        }
    })
}
