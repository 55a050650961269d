//! HTTP hosting for negotiated routes.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (TraceLayer, TimeoutLayer, RenderConfig extension)
//!     → application router (extractors from `render`)
//!     → negotiated response
//! ```

pub mod server;

pub use server::HttpServer;
