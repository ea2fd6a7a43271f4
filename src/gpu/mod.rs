//! GPU plumbing: device/queue/surface ownership.

/// Core wgpu resources and surface configuration.
pub mod render_context;
