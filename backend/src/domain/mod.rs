//! Domain records and ports for the users/companies directory.
//!
//! Purpose: describe the records the GraphQL layer exposes and the port it
//! calls to fetch or mutate them. Records are ephemeral: they are decoded from
//! one directory response and dropped once the GraphQL response is written.
//!
//! Public surface:
//! - `UserRecord`, `NewUser`, `UserPatch` - user payloads read and written.
//! - `CompanyRecord` - company payload.
//! - `ports` - the `UserDirectory` port and its error type.

pub mod company;
pub mod ports;
pub mod user;

pub use self::company::CompanyRecord;
pub use self::user::{NewUser, UserPatch, UserRecord};
