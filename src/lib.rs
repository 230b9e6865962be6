//! Backend-for-frontend proxy library.
//!
//! Validates browser requests, attaches static credentials, forwards each one
//! to its upstream microservice and relays the answer.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routes;
pub mod security;
pub mod upstream;
pub mod validator;

pub use config::schema::BffConfig;
pub use error::BffError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
