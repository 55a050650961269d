//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! negotiation / render
//!     → tracing events (resolved content types, decode failures,
//!       encode fallbacks)
//! http::server
//!     → TraceLayer request spans
//! logging.rs
//!     → subscriber with env filter, stdout
//! ```

pub mod logging;
