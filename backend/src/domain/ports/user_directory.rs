//! Driven port for the external users/companies directory.
//!
//! The GraphQL resolvers depend only on this trait, so the REST adapter can
//! be swapped for an in-memory fixture or a mock in tests.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{CompanyRecord, NewUser, UserPatch, UserRecord};

define_port_error! {
    /// Errors surfaced while calling the directory.
    pub enum DirectoryError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "directory transport failed: {message}",
        /// The directory answered with a non-success status.
        Status { status: u16, message: String } =>
            "directory responded with status {status}: {message}",
        /// The addressed record does not exist.
        NotFound { resource: String } =>
            "directory record not found: {resource}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "directory response decode failed: {message}",
    }
}

impl DirectoryError {
    /// Stable machine-readable code attached to GraphQL errors.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "UPSTREAM_UNAVAILABLE",
            Self::Status { .. } => "UPSTREAM_STATUS",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Decode { .. } => "UPSTREAM_DECODE",
        }
    }
}

/// Port for reading and writing users and companies.
///
/// Reads report a missing record as `Ok(None)`; writes report it as
/// [`DirectoryError::NotFound`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch one user by identifier.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use users_graphql::domain::ports::UserDirectory;
    /// use users_graphql::test_support::InMemoryDirectory;
    ///
    /// let directory = InMemoryDirectory::seeded();
    /// let user = directory.user("23").await?;
    /// assert_eq!(user.and_then(|u| u.first_name).as_deref(), Some("Bill"));
    /// # Ok::<(), users_graphql::domain::ports::DirectoryError>(())
    /// ```
    async fn user(&self, id: &str) -> Result<Option<UserRecord>, DirectoryError>;

    /// Fetch one company by identifier.
    async fn company(&self, id: &str) -> Result<Option<CompanyRecord>, DirectoryError>;

    /// List the users employed by a company.
    async fn company_users(&self, company_id: &str) -> Result<Vec<UserRecord>, DirectoryError>;

    /// Create a user and return the stored representation.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, DirectoryError>;

    /// Apply a partial update and return the stored representation.
    async fn update_user(&self, id: &str, patch: UserPatch) -> Result<UserRecord, DirectoryError>;

    /// Delete a user and return what the directory reports for it.
    async fn delete_user(&self, id: &str) -> Result<UserRecord, DirectoryError>;
}

#[cfg(test)]
mod tests {
    //! Error code mapping coverage.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::transport(DirectoryError::transport("connection refused"), "UPSTREAM_UNAVAILABLE")]
    #[case::status(DirectoryError::status(500_u16, "boom"), "UPSTREAM_STATUS")]
    #[case::not_found(DirectoryError::not_found("users/9"), "NOT_FOUND")]
    #[case::decode(DirectoryError::decode("expected value"), "UPSTREAM_DECODE")]
    fn codes_are_stable(#[case] error: DirectoryError, #[case] expected: &str) {
        assert_eq!(error.code(), expected);
    }

    #[rstest]
    fn status_message_includes_code() {
        let error = DirectoryError::status(503_u16, "maintenance");
        assert_eq!(
            error.to_string(),
            "directory responded with status 503: maintenance"
        );
    }
}
