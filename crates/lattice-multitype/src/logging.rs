//! Tracing targets used by the adapter.
//!
//! The crate only emits events through `tracing`; install a subscriber in the
//! application to see them:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("lattice_multitype=trace")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Binding registration.
    pub const REGISTRY: &str = "lattice_multitype::registry";
    /// Item to kind resolution.
    pub const RESOLVER: &str = "lattice_multitype::resolver";
    /// Item snapshots, visual creation and binding.
    pub const ADAPTER: &str = "lattice_multitype::adapter";
}
