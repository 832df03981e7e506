//! Root query type.

use async_graphql::{Context, Object};

use super::error::{directory, field_failed};
use super::types::{Company, User};

/// Entry point for reads.
#[derive(Debug, Clone, Copy, Default)]
pub struct RootQuery;

#[Object(name = "RootQueryType")]
impl RootQuery {
    /// Fetch a user by identifier; `null` when the directory has no such user.
    async fn user(
        &self,
        ctx: &Context<'_>,
        id: Option<String>,
    ) -> async_graphql::Result<Option<User>> {
        let Some(id) = present(id) else {
            return Ok(None);
        };
        match directory(ctx)?.user(&id).await {
            Ok(user) => Ok(user.map(User::from)),
            Err(error) => Ok(field_failed(ctx, error)),
        }
    }

    /// Fetch a company by identifier; `null` when the directory has no such company.
    async fn company(
        &self,
        ctx: &Context<'_>,
        id: Option<String>,
    ) -> async_graphql::Result<Option<Company>> {
        let Some(id) = present(id) else {
            return Ok(None);
        };
        match directory(ctx)?.company(&id).await {
            Ok(company) => Ok(company.map(Company::from)),
            Err(error) => Ok(field_failed(ctx, error)),
        }
    }
}

/// Treat an empty identifier like an absent one; it cannot address a record.
fn present(id: Option<String>) -> Option<String> {
    id.filter(|id| !id.is_empty())
}
