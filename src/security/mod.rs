//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → limits.rs (reject oversized bodies)
//!     → handler
//! Outgoing response:
//!     → headers.rs (static security headers)
//! ```

pub mod headers;
pub mod limits;
