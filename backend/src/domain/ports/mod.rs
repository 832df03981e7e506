//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod user_directory;

pub use user_directory::{DirectoryError, UserDirectory};

#[cfg(test)]
pub use user_directory::MockUserDirectory;
