//! User records and the payloads used to create or edit them.

/// User as held by the directory.
///
/// `company_id` is the foreign key into the company collection. It is not
/// exposed to GraphQL clients directly; the `company` field resolves it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRecord {
    /// Directory identifier.
    pub id: Option<String>,
    /// Given name.
    pub first_name: Option<String>,
    /// Age in years.
    pub age: Option<i32>,
    /// Identifier of the employing company, if any.
    pub company_id: Option<String>,
}

impl UserRecord {
    /// Build a user with every field populated except the company link.
    ///
    /// # Examples
    /// ```
    /// use users_graphql::domain::UserRecord;
    ///
    /// let user = UserRecord::new("23", "Bill", 20).with_company("1");
    /// assert_eq!(user.company_id.as_deref(), Some("1"));
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>, first_name: impl Into<String>, age: i32) -> Self {
        Self {
            id: Some(id.into()),
            first_name: Some(first_name.into()),
            age: Some(age),
            company_id: None,
        }
    }

    /// Attach a company foreign key.
    #[must_use]
    pub fn with_company(mut self, company_id: impl Into<String>) -> Self {
        self.company_id = Some(company_id.into());
        self
    }
}

/// Payload for creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Given name; required.
    pub first_name: String,
    /// Age in years; required.
    pub age: i32,
    /// Optional company foreign key.
    pub company_id: Option<String>,
}

impl NewUser {
    /// Materialise the record the directory would store under `id`.
    #[must_use]
    pub fn into_record(self, id: impl Into<String>) -> UserRecord {
        UserRecord {
            id: Some(id.into()),
            first_name: Some(self.first_name),
            age: Some(self.age),
            company_id: self.company_id,
        }
    }
}

/// Partial update for a user.
///
/// Each field is tri-state: `None` leaves the stored value untouched,
/// `Some(None)` clears it and `Some(Some(v))` replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    /// Replacement given name.
    pub first_name: Option<Option<String>>,
    /// Replacement age.
    pub age: Option<Option<i32>>,
    /// Replacement company foreign key.
    pub company_id: Option<Option<String>>,
}

impl UserPatch {
    /// Merge the supplied fields into `record`, leaving the rest untouched.
    ///
    /// # Examples
    /// ```
    /// use users_graphql::domain::{UserPatch, UserRecord};
    ///
    /// let mut user = UserRecord::new("1", "Ada", 36);
    /// UserPatch { age: Some(Some(37)), ..UserPatch::default() }.apply_to(&mut user);
    /// assert_eq!(user.age, Some(37));
    /// assert_eq!(user.first_name.as_deref(), Some("Ada"));
    /// ```
    pub fn apply_to(self, record: &mut UserRecord) {
        if let Some(first_name) = self.first_name {
            record.first_name = first_name;
        }
        if let Some(age) = self.age {
            record.age = age;
        }
        if let Some(company_id) = self.company_id {
            record.company_id = company_id;
        }
    }
}
