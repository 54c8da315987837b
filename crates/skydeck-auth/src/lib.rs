//! Credential handling for the Skydeck dashboard.
//!
//! A small registry of users with bcrypt password hashes, loaded from
//! configuration. Plaintext passwords are never stored or compared
//! directly, and credentials are never compiled into the binary.

pub mod registry;

pub use registry::{hash_password, AuthError, UserEntry, UserRegistry};
