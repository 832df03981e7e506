//! `User` and `Company` object types.

use async_graphql::{Context, Object};

use super::error::{directory, field_failed};
use crate::domain::{CompanyRecord, UserRecord};

/// GraphQL view over a [`UserRecord`].
#[derive(Debug, Clone)]
pub struct User(UserRecord);

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self(record)
    }
}

#[Object]
impl User {
    async fn id(&self) -> Option<&str> {
        self.0.id.as_deref()
    }

    async fn first_name(&self) -> Option<&str> {
        self.0.first_name.as_deref()
    }

    async fn age(&self) -> Option<i32> {
        self.0.age
    }

    /// Employer, looked up through the user's company foreign key.
    async fn company(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<Company>> {
        let Some(company_id) = self.0.company_id.as_deref().filter(|id| !id.is_empty()) else {
            return Ok(None);
        };
        match directory(ctx)?.company(company_id).await {
            Ok(company) => Ok(company.map(Company::from)),
            Err(error) => Ok(field_failed(ctx, error)),
        }
    }
}

/// GraphQL view over a [`CompanyRecord`].
#[derive(Debug, Clone)]
pub struct Company(CompanyRecord);

impl From<CompanyRecord> for Company {
    fn from(record: CompanyRecord) -> Self {
        Self(record)
    }
}

#[Object]
impl Company {
    async fn id(&self) -> Option<&str> {
        self.0.id.as_deref()
    }

    async fn name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    async fn description(&self) -> Option<&str> {
        self.0.description.as_deref()
    }

    /// Employees, looked up by reverse query on the company identifier.
    async fn users(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<Vec<User>>> {
        let Some(company_id) = self.0.id.as_deref().filter(|id| !id.is_empty()) else {
            return Ok(None);
        };
        match directory(ctx)?.company_users(company_id).await {
            Ok(users) => Ok(Some(users.into_iter().map(User::from).collect())),
            Err(error) => Ok(field_failed(ctx, error)),
        }
    }
}
