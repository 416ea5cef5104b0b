//! enroll-services: the backend half of the enrollment platform.
//!
//! One module per service, each with a service layer (input struct in,
//! result out), an HTTP router, and an RPC router over the same functions.
//! The entity repositories are shared across services.

pub mod account;
pub mod auth;
pub mod course;
pub mod grade;
pub mod health;
pub mod profile;
pub mod repo;
pub mod schema;
