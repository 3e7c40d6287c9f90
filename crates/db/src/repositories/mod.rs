//! Typed operations over a [`DocumentStore`](crate::store::DocumentStore).
//!
//! Repositories are zero-sized structs whose associated functions take the
//! store explicitly; request handlers pass in the store they hold.

pub mod record_repo;
pub mod user_repo;

pub use record_repo::RecordRepo;
pub use user_repo::UserRepo;
