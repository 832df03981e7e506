//! Test utilities shared by unit tests (in `src/`) and integration tests (in
//! `tests/`). Compiled for tests or with the `test-support` feature.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{DirectoryError, UserDirectory};
use crate::domain::{CompanyRecord, NewUser, UserPatch, UserRecord};

/// One call observed by [`InMemoryDirectory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryCall {
    /// `user(id)`.
    User(String),
    /// `company(id)`.
    Company(String),
    /// `company_users(company_id)`.
    CompanyUsers(String),
    /// `create_user(..)`.
    CreateUser,
    /// `update_user(id, ..)`.
    UpdateUser(String),
    /// `delete_user(id)`.
    DeleteUser(String),
}

#[derive(Debug, Default)]
struct DirectoryState {
    users: BTreeMap<String, UserRecord>,
    companies: BTreeMap<String, CompanyRecord>,
    calls: Vec<DirectoryCall>,
    next_id: u64,
}

impl DirectoryState {
    fn allocate_id(&mut self) -> String {
        loop {
            self.next_id += 1;
            let candidate = self.next_id.to_string();
            if !self.users.contains_key(&candidate) {
                return candidate;
            }
        }
    }
}

/// Directory held in memory, mirroring the REST store's semantics and
/// recording every call so tests can count upstream traffic.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    state: Mutex<DirectoryState>,
}

impl InMemoryDirectory {
    /// Empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory preloaded with three users across two companies.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new()
            .with_company(CompanyRecord::new("1", "Apple", "iPhone"))
            .with_company(CompanyRecord::new("2", "Google", "search"))
            .with_user(UserRecord::new("23", "Bill", 20).with_company("1"))
            .with_user(UserRecord::new("40", "Alex", 40).with_company("2"))
            .with_user(UserRecord::new("41", "Nick", 40).with_company("2"))
    }

    /// Add or replace a user; records without an id are ignored.
    #[must_use]
    pub fn with_user(self, user: UserRecord) -> Self {
        if let Some(id) = user.id.clone() {
            self.lock().users.insert(id, user);
        }
        self
    }

    /// Add or replace a company; records without an id are ignored.
    #[must_use]
    pub fn with_company(self, company: CompanyRecord) -> Self {
        if let Some(id) = company.id.clone() {
            self.lock().companies.insert(id, company);
        }
        self
    }

    /// Every call received so far, in arrival order.
    #[must_use]
    pub fn calls(&self) -> Vec<DirectoryCall> {
        self.lock().calls.clone()
    }

    /// Forget recorded calls, keeping the stored records.
    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// Snapshot of a stored user, bypassing call recording.
    #[must_use]
    pub fn stored_user(&self, id: &str) -> Option<UserRecord> {
        self.lock().users.get(id).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, DirectoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, call: DirectoryCall) -> MutexGuard<'_, DirectoryState> {
        let mut state = self.lock();
        state.calls.push(call);
        state
    }
}

#[async_trait]
impl UserDirectory for InMemoryDirectory {
    async fn user(&self, id: &str) -> Result<Option<UserRecord>, DirectoryError> {
        let state = self.record(DirectoryCall::User(id.to_owned()));
        Ok(state.users.get(id).cloned())
    }

    async fn company(&self, id: &str) -> Result<Option<CompanyRecord>, DirectoryError> {
        let state = self.record(DirectoryCall::Company(id.to_owned()));
        Ok(state.companies.get(id).cloned())
    }

    async fn company_users(&self, company_id: &str) -> Result<Vec<UserRecord>, DirectoryError> {
        let state = self.record(DirectoryCall::CompanyUsers(company_id.to_owned()));
        Ok(state
            .users
            .values()
            .filter(|user| user.company_id.as_deref() == Some(company_id))
            .cloned()
            .collect())
    }

    async fn create_user(&self, user: NewUser) -> Result<UserRecord, DirectoryError> {
        let mut state = self.record(DirectoryCall::CreateUser);
        let id = state.allocate_id();
        let record = user.into_record(id.clone());
        state.users.insert(id, record.clone());
        Ok(record)
    }

    async fn update_user(&self, id: &str, patch: UserPatch) -> Result<UserRecord, DirectoryError> {
        let mut state = self.record(DirectoryCall::UpdateUser(id.to_owned()));
        let record = state
            .users
            .get_mut(id)
            .ok_or_else(|| DirectoryError::not_found(format!("users/{id}")))?;
        patch.apply_to(record);
        Ok(record.clone())
    }

    async fn delete_user(&self, id: &str) -> Result<UserRecord, DirectoryError> {
        let mut state = self.record(DirectoryCall::DeleteUser(id.to_owned()));
        state
            .users
            .remove(id)
            .ok_or_else(|| DirectoryError::not_found(format!("users/{id}")))
    }
}

#[cfg(test)]
mod tests {
    //! Fixture behaviour mirrors the REST store.

    use super::*;

    #[tokio::test]
    async fn created_ids_skip_existing_records() {
        let directory = InMemoryDirectory::new().with_user(UserRecord::new("1", "Ann", 30));
        let created = directory
            .create_user(NewUser {
                first_name: "Bo".to_owned(),
                age: 31,
                company_id: None,
            })
            .await
            .expect("create succeeds");

        assert_eq!(created.id.as_deref(), Some("2"));
        assert_eq!(directory.calls(), vec![DirectoryCall::CreateUser]);
    }

    #[tokio::test]
    async fn reverse_lookup_filters_by_company() {
        let directory = InMemoryDirectory::seeded();
        let users = directory.company_users("2").await.expect("lookup succeeds");
        let names: Vec<_> = users.iter().filter_map(|u| u.first_name.as_deref()).collect();
        assert_eq!(names, ["Alex", "Nick"]);
    }
}
