//! Domain types and pure logic for the question bank.
//!
//! Nothing in this crate performs I/O; persistence lives in `quizbank-db`
//! and the HTTP surface in `quizbank-api`.

pub mod activity;
pub mod error;
pub mod exam;
pub mod question;
pub mod record;
pub mod roles;
pub mod types;
pub mod user;
pub mod validation;
