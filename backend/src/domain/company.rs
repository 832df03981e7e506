//! Company record.

/// Company as held by the directory.
///
/// Every field is optional: the directory may omit any of them and the
/// GraphQL layer reports absent values as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyRecord {
    /// Directory identifier.
    pub id: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
}

impl CompanyRecord {
    /// Build a fully populated company.
    ///
    /// # Examples
    /// ```
    /// use users_graphql::domain::CompanyRecord;
    ///
    /// let company = CompanyRecord::new("1", "Apple", "iPhone");
    /// assert_eq!(company.id.as_deref(), Some("1"));
    /// ```
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            description: Some(description.into()),
        }
    }
}
