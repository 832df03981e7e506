//! Reqwest-backed directory adapter.
//!
//! This adapter owns transport details only: URL construction, request
//! serialisation, HTTP status mapping and JSON decoding into domain records.
//! It imposes no timeout and never retries.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{CompanyDto, NewUserBody, UserDto, UserPatchBody};
use crate::domain::ports::{DirectoryError, UserDirectory};
use crate::domain::{CompanyRecord, NewUser, UserPatch, UserRecord};

const DEFAULT_USER_AGENT: &str = concat!("users-graphql/", env!("CARGO_PKG_VERSION"));
const EMPTY_OBJECT: &[u8] = b"{}";

/// Directory adapter calling a REST resource rooted at one base URL.
#[derive(Debug, Clone)]
pub struct RestDirectory {
    client: Client,
    base_url: Url,
}

impl RestDirectory {
    /// Build an adapter for the store rooted at `base_url`.
    ///
    /// ```rust,ignore
    /// let directory = RestDirectory::new(Url::parse("http://localhost:3000")?)?;
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent(DEFAULT_USER_AGENT).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Build an adapter around an existing client, sharing its connection pool.
    #[must_use]
    pub const fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Base URL every resource path is joined onto.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, DirectoryError> {
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(DirectoryError::not_found(segments.join("/")));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                DirectoryError::transport(format!(
                    "store url {} cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        segments: &[&str],
    ) -> Result<(RequestBuilder, String), DirectoryError> {
        let url = self.endpoint(segments)?;
        debug!(%method, %url, "calling directory");
        let resource = segments.join("/");
        let builder = self
            .client
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");
        Ok((builder, resource))
    }

    async fn get<T>(&self, segments: &[&str]) -> Result<T, DirectoryError>
    where
        T: DeserializeOwned,
    {
        let (builder, resource) = self.request(Method::GET, segments)?;
        self.fetch(builder, &resource).await
    }

    async fn fetch<T>(&self, builder: RequestBuilder, resource: &str) -> Result<T, DirectoryError>
    where
        T: DeserializeOwned,
    {
        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(
            resource,
            status = status.as_u16(),
            bytes = body.len(),
            "directory responded"
        );

        if status == StatusCode::NOT_FOUND {
            return Err(DirectoryError::not_found(resource));
        }
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        // Writes may answer `204` or an empty `200`; both decode as `{}`.
        let payload = if body.iter().all(u8::is_ascii_whitespace) {
            EMPTY_OBJECT
        } else {
            body.as_ref()
        };
        serde_json::from_slice(payload).map_err(|error| {
            DirectoryError::decode(format!("invalid JSON for {resource}: {error}"))
        })
    }
}

#[async_trait]
impl UserDirectory for RestDirectory {
    async fn user(&self, id: &str) -> Result<Option<UserRecord>, DirectoryError> {
        absent_as_none(self.get::<UserDto>(&["users", id]).await)
    }

    async fn company(&self, id: &str) -> Result<Option<CompanyRecord>, DirectoryError> {
        absent_as_none(self.get::<CompanyDto>(&["companies", id]).await)
    }

    async fn company_users(&self, company_id: &str) -> Result<Vec<UserRecord>, DirectoryError> {
        match self
            .get::<Vec<UserDto>>(&["companies", company_id, "users"])
            .await
        {
            Ok(users) => Ok(users.into_iter().map(UserRecord::from).collect()),
            Err(DirectoryError::NotFound { .. }) => Ok(Vec::new()),
            Err(error) => Err(error),
        }
    }

    async fn create_user(&self, user: NewUser) -> Result<UserRecord, DirectoryError> {
        let (builder, resource) = self.request(Method::POST, &["users"])?;
        let builder = builder.json(&NewUserBody::from(&user));
        self.fetch::<UserDto>(builder, &resource)
            .await
            .map(UserRecord::from)
    }

    async fn update_user(&self, id: &str, patch: UserPatch) -> Result<UserRecord, DirectoryError> {
        let (builder, resource) = self.request(Method::PATCH, &["users", id])?;
        let builder = builder.json(&UserPatchBody::new(id, &patch));
        self.fetch::<UserDto>(builder, &resource)
            .await
            .map(UserRecord::from)
    }

    async fn delete_user(&self, id: &str) -> Result<UserRecord, DirectoryError> {
        let (builder, resource) = self.request(Method::DELETE, &["users", id])?;
        self.fetch::<UserDto>(builder, &resource)
            .await
            .map(UserRecord::from)
    }
}

fn absent_as_none<T, R>(result: Result<T, DirectoryError>) -> Result<Option<R>, DirectoryError>
where
    R: From<T>,
{
    match result {
        Ok(value) => Ok(Some(R::from(value))),
        Err(DirectoryError::NotFound { .. }) => Ok(None),
        Err(error) => Err(error),
    }
}

fn map_transport_error(error: reqwest::Error) -> DirectoryError {
    DirectoryError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> DirectoryError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_owned()
    } else {
        preview
    };
    DirectoryError::status(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network mapping helpers.

    use super::*;
    use rstest::rstest;

    fn directory(base: &str) -> RestDirectory {
        RestDirectory::new(Url::parse(base).expect("valid url")).expect("client builds")
    }

    #[rstest]
    #[case::bare_host("http://localhost:3000", "http://localhost:3000/users/7")]
    #[case::trailing_slash("http://localhost:3000/", "http://localhost:3000/users/7")]
    #[case::prefixed("http://store.internal/api/v1/", "http://store.internal/api/v1/users/7")]
    fn endpoints_join_onto_base(#[case] base: &str, #[case] expected: &str) {
        let url = directory(base)
            .endpoint(&["users", "7"])
            .expect("endpoint builds");
        assert_eq!(url.as_str(), expected);
    }

    #[rstest]
    fn identifiers_are_percent_encoded() {
        let url = directory("http://localhost:3000")
            .endpoint(&["users", "a/b c"])
            .expect("endpoint builds");
        assert_eq!(url.as_str(), "http://localhost:3000/users/a%2Fb%20c");
    }

    #[rstest]
    #[case::empty_id(vec!["users", ""])]
    #[case::empty_company(vec!["companies", "", "users"])]
    fn empty_segments_address_nothing(#[case] segments: Vec<&str>) {
        let error = directory("http://localhost:3000")
            .endpoint(&segments)
            .expect_err("an empty segment cannot name a record");
        assert!(matches!(error, DirectoryError::NotFound { .. }));
    }

    #[rstest]
    fn non_hierarchical_base_is_rejected() {
        let error = directory("mailto:store@example.com")
            .endpoint(&["users"])
            .expect_err("mailto cannot carry a path");
        assert!(matches!(error, DirectoryError::Transport { .. }));
    }

    #[rstest]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, b"  {\"error\":\n \"boom\"} ".as_slice(), "{\"error\": \"boom\"}")]
    #[case::empty_body(StatusCode::BAD_GATEWAY, b"".as_slice(), "Bad Gateway")]
    fn status_errors_carry_a_compact_preview(
        #[case] status: StatusCode,
        #[case] body: &[u8],
        #[case] expected: &str,
    ) {
        let error = map_status_error(status, body);
        assert_eq!(
            error,
            DirectoryError::status(status.as_u16(), expected),
            "status errors should keep the code and a whitespace-compacted body",
        );
    }

    #[rstest]
    fn long_previews_are_truncated() {
        let body = "x".repeat(400);
        let preview = body_preview(body.as_bytes());
        assert_eq!(preview.chars().count(), 163);
        assert!(preview.ends_with("..."));
    }
}
