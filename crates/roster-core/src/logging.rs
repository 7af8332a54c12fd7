//! Logging facilities for roster.
//!
//! roster uses the `tracing` crate for instrumentation. To see logs, install
//! a tracing subscriber in your application:
//!
//! ```ignore
//! use tracing_subscriber;
//!
//! fn main() {
//!     // Initialize tracing (you can customize this)
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "roster_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "roster_core::signal";
    /// Adapter core target.
    pub const ADAPTER: &str = "roster::adapter";
    /// Filter engine target.
    pub const FILTER: &str = "roster::filter";
    /// Selection engine target.
    pub const SELECTION: &str = "roster::selection";
    /// Enable-state engine target.
    pub const ENABLE: &str = "roster::enable";
    /// Persistence target.
    pub const PERSISTENCE: &str = "roster::persistence";
}
