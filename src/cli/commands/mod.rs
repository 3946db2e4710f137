//! Command implementations

pub mod init;
pub mod validate;
