//! Mutation type: create, edit and delete users.

use async_graphql::{Context, MaybeUndefined, Object};

use super::error::{directory, field_failed};
use super::types::User;
use crate::domain::ports::DirectoryError;
use crate::domain::{NewUser, UserPatch, UserRecord};

/// Entry point for writes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mutation;

#[Object]
impl Mutation {
    /// Create a user; `firstName` and `age` are required.
    async fn add_user(
        &self,
        ctx: &Context<'_>,
        first_name: String,
        age: i32,
        company_id: Option<String>,
    ) -> async_graphql::Result<Option<User>> {
        let created = directory(ctx)?
            .create_user(NewUser {
                first_name,
                age,
                company_id,
            })
            .await;
        Ok(settle(ctx, created))
    }

    /// Delete a user, returning what the directory reports for it.
    async fn delete_user(
        &self,
        ctx: &Context<'_>,
        id: String,
    ) -> async_graphql::Result<Option<User>> {
        let deleted = directory(ctx)?.delete_user(&id).await;
        Ok(settle(ctx, deleted))
    }

    /// Update the supplied fields of a user; omitted fields are left as stored.
    async fn edit_user(
        &self,
        ctx: &Context<'_>,
        id: String,
        first_name: MaybeUndefined<String>,
        age: MaybeUndefined<i32>,
        company_id: MaybeUndefined<String>,
    ) -> async_graphql::Result<Option<User>> {
        let patch = UserPatch {
            first_name: supplied(first_name),
            age: supplied(age),
            company_id: supplied(company_id),
        };
        let updated = directory(ctx)?.update_user(&id, patch).await;
        Ok(settle(ctx, updated))
    }
}

fn settle(ctx: &Context<'_>, result: Result<UserRecord, DirectoryError>) -> Option<User> {
    match result {
        Ok(record) => Some(User::from(record)),
        Err(error) => field_failed(ctx, error),
    }
}

fn supplied<T>(value: MaybeUndefined<T>) -> Option<Option<T>> {
    match value {
        MaybeUndefined::Undefined => None,
        MaybeUndefined::Null => Some(None),
        MaybeUndefined::Value(value) => Some(Some(value)),
    }
}
