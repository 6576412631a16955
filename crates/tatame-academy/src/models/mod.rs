//! Data models for the academy.
//!
//! # Core Types
//!
//! - [`StudentRecord`] - A student's profile and attendance state
//! - [`UserAccount`] - Login account with role and credentials
//! - [`Role`] - Access role (teacher or student)
//!
//! Both document types live in the RocksDB-backed store, one JSON
//! document per student/account, keyed by `uid` in their collections.

mod account;
mod student;

pub use account::{Role, UserAccount};
pub use student::StudentRecord;
