//! enroll-core: shared plumbing for the enrollment platform
//!
//! Every backend service and the gateway build on the same small set of
//! pieces: environment-driven configuration, the primary/replica failover
//! pool, the error taxonomy with its JSON envelope, token signing and
//! verification, and the RPC wire contract.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod password;
pub mod rpc;
pub mod token;

pub use db::{DbError, FailoverPool};
pub use error::ServiceError;
