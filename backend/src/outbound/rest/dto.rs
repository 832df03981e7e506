//! Wire DTOs for the REST directory.
//!
//! Responses decode into these transport DTOs first and are then mapped into
//! domain records. Identifiers are accepted as JSON strings or integers since
//! json-server style stores assign numeric ids to created records.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{CompanyRecord, NewUser, UserPatch, UserRecord};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UserDto {
    #[serde(default, deserialize_with = "lenient_id")]
    id: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    age: Option<i32>,
    #[serde(default, deserialize_with = "lenient_id")]
    company_id: Option<String>,
}

impl From<UserDto> for UserRecord {
    fn from(dto: UserDto) -> Self {
        Self {
            id: dto.id,
            first_name: dto.first_name,
            age: dto.age,
            company_id: dto.company_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct CompanyDto {
    #[serde(default, deserialize_with = "lenient_id")]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl From<CompanyDto> for CompanyRecord {
    fn from(dto: CompanyDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            description: dto.description,
        }
    }
}

/// `POST /users` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct NewUserBody<'a> {
    first_name: &'a str,
    age: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    company_id: Option<&'a str>,
}

impl<'a> From<&'a NewUser> for NewUserBody<'a> {
    fn from(user: &'a NewUser) -> Self {
        Self {
            first_name: &user.first_name,
            age: user.age,
            company_id: user.company_id.as_deref(),
        }
    }
}

/// `PATCH /users/:id` body: the id plus only the supplied fields.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UserPatchBody<'a> {
    id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<Option<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    age: Option<Option<i32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    company_id: Option<Option<&'a str>>,
}

impl<'a> UserPatchBody<'a> {
    pub(super) fn new(id: &'a str, patch: &'a UserPatch) -> Self {
        Self {
            id,
            first_name: patch.first_name.as_ref().map(Option::as_deref),
            age: patch.age,
            company_id: patch.company_id.as_ref().map(Option::as_deref),
        }
    }
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Integer(i64),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
        RawId::Text(text) => text,
        RawId::Integer(value) => value.to_string(),
    }))
}
