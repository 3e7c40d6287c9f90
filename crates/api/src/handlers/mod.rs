//! Request handlers, one module per resource.

pub mod auth;
pub mod exams;
pub mod records;
pub mod users;
