//! Pafari database layer.
//!
//! Provides SQLite connection management and schema migrations.
//!
//! # Usage
//!
//! ```no_run
//! use pafari::database::Database;
//!
//! // Open a persistent database
//! let db = Database::open("pafari.db").expect("failed to open database");
//!
//! // Or use an in-memory database for testing
//! let db = Database::open_in_memory().expect("failed to open in-memory database");
//!
//! // Share it with the page collaborators
//! let shared = db.into_shared();
//! ```

pub mod connection;
pub mod migrations;

pub use connection::{Database, SharedDatabase};
