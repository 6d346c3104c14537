//! drive_tree - Inventory a Google Drive folder tree as CSV.
//!
//! This library provides functionality to:
//! - Walk a folder and all of its descendants through the paginated
//!   `files.list` API, in the personal namespace or a shared drive
//! - Retry transient failures with a fixed, cancellable delay
//! - Flatten the resulting tree into `path,created,modified` rows
//!
//! # Example
//!
//! ```no_run
//! use drive_tree::{build_tree, write_csv, Authenticator, DriveClient, DriveScope};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let auth = Authenticator::from_file("service-account.json")?;
//!     let client = DriveClient::new(auth);
//!
//!     let tree = build_tree(
//!         &client,
//!         DriveScope::Shared("drive-id".to_string()),
//!         "folder-id",
//!         CancellationToken::new(),
//!     )
//!     .await?;
//!     write_csv(std::io::stdout().lock(), &tree)?;
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod builder;
pub mod client;
pub mod error;
pub mod ids;
pub mod logging;
pub mod models;
pub mod printer;
pub mod retry;
pub mod tree;

// Re-exports for convenience
pub use auth::Authenticator;
pub use builder::{build_tree, TreeBuilder};
pub use client::{DriveClient, DriveListing, DriveScope, ListRequest};
pub use error::{DriveError, Result};
pub use ids::extract_id;
pub use models::FileMetadata;
pub use printer::{print_tree, write_csv};
pub use retry::RetryPolicy;
pub use tree::{Node, NodeId, Tree};
