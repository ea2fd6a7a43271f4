//! Debug panel and stats overlay (egui).

/// egui parameter panel painted over the point pass.
pub mod panel;

pub use panel::{DebugPanel, PanelStats};
