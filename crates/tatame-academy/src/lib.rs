//! Tatame Academy - Student Tracking Node
//!
//! A jiu-jitsu academy daemon: student records, attendance tracking, and
//! promotion progress behind an HTTP API.
//!
//! # Architecture
//!
//! - **Models**: Student records and login accounts
//! - **Storage**: RocksDB-backed document store with merge-capable writes
//! - **Roster**: Student queries and attendance recording
//! - **Directory / Auth**: Account provisioning and session tokens
//! - **API**: HTTP endpoints for teachers and students
//! - **Admin Socket**: Unix socket for local account commands (academy-admin CLI)
//!
//! Promotion arithmetic lives in the `tatame-grading` crate; this crate
//! calls it whenever a student payload needs `presences_for_next_degree`.
//!
//! # Example
//!
//! ```no_run
//! use tatame_academy::{AcademyConfig, AcademyNode};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AcademyConfig::default();
//!     let node = AcademyNode::new(config).await?;
//!     node.run().await?;
//!     Ok(())
//! }
//! ```

pub mod admin_socket;
pub mod api;
pub mod auth;
pub mod directory;
pub mod error;
pub mod models;
pub mod node;
pub mod roster;
pub mod storage;

pub use auth::{Authenticator, Identity};
pub use directory::UserDirectory;
pub use error::{Error, Result};
pub use models::{Role, StudentRecord, UserAccount};
pub use node::{AcademyConfig, AcademyNode, AcademyState};
pub use roster::Roster;
pub use storage::Storage;
