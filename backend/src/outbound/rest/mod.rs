//! REST directory adapter.
//!
//! This module provides a thin reqwest implementation of the `UserDirectory`
//! port against a json-server style resource layout
//! (`/users`, `/companies/:id`, `/companies/:id/users`).

mod dto;
mod http_directory;

pub use http_directory::RestDirectory;
