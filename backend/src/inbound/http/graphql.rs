//! GraphQL endpoint handlers.
//!
//! `POST /graphql` executes any operation. `GET /graphql` executes queries
//! from the query string, refuses mutations with `405`, and serves the
//! GraphiQL page to browsers when no `query` parameter is present. Any other
//! `GET` without a query is a `400`.

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{Either, FromRequest, HttpRequest, HttpResponse, get, post, web};
use async_graphql::http::GraphiQLSource;
use async_graphql::parser::parse_query;
use async_graphql::parser::types::OperationType;
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};
use serde_json::json;
use tracing::debug;

use super::state::GraphqlState;

/// Path the schema is served on.
pub const GRAPHQL_PATH: &str = "/graphql";

const MUTATION_OVER_GET: &str = "Can only perform a mutation operation from a POST request.";
const MISSING_QUERY: &str = "Must provide query string.";

/// Execute a GraphQL document sent as a JSON body.
#[post("/graphql")]
pub async fn execute(state: web::Data<GraphqlState>, request: GraphQLRequest) -> GraphQLResponse {
    state.schema().execute(request.into_inner()).await.into()
}

/// Execute a query-string GraphQL request or serve GraphiQL.
///
/// # Errors
/// Returns a `400` when the query string carries no query or is not a valid
/// GraphQL request.
#[get("/graphql")]
pub async fn execute_get(
    state: web::Data<GraphqlState>,
    req: HttpRequest,
) -> actix_web::Result<Either<HttpResponse, GraphQLResponse>> {
    if !has_query(&req) {
        if state.graphiql_enabled() && accepts_html(&req) {
            return Ok(Either::Left(graphiql_page()));
        }
        return Ok(Either::Left(
            HttpResponse::BadRequest().json(json!({ "errors": [{ "message": MISSING_QUERY }] })),
        ));
    }

    let request = GraphQLRequest::from_request(&req, &mut Payload::None)
        .await?
        .into_inner();
    if selects_mutation(&request) {
        debug!("rejecting mutation sent over GET");
        return Ok(Either::Left(
            HttpResponse::MethodNotAllowed()
                .insert_header((header::ALLOW, "POST"))
                .json(json!({ "errors": [{ "message": MUTATION_OVER_GET }] })),
        ));
    }

    Ok(Either::Right(state.schema().execute(request).await.into()))
}

fn graphiql_page() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

fn accepts_html(req: &HttpRequest) -> bool {
    req.headers()
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("text/html"))
}

fn has_query(req: &HttpRequest) -> bool {
    url::form_urlencoded::parse(req.query_string().as_bytes())
        .any(|(key, value)| key == "query" && !value.trim().is_empty())
}

/// Report whether the operation the request would run is a mutation.
///
/// Unparseable documents are left to the engine, which reports the syntax
/// error in the usual response shape.
fn selects_mutation(request: &async_graphql::Request) -> bool {
    let Ok(document) = parse_query(&request.query) else {
        return false;
    };
    let wanted = request.operation_name.as_deref();
    document.operations.iter().any(|(name, operation)| {
        let selected = match wanted {
            Some(wanted) => name.is_some_and(|name| name.as_str() == wanted),
            None => true,
        };
        selected && matches!(operation.node.ty, OperationType::Mutation)
    })
}
