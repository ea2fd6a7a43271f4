// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! GPU-accelerated spiral-galaxy point-field visualizer built on wgpu.
//!
//! Whorl generates a parametric spiral distribution of colored points
//! (arms, radius-dependent twist, randomized jitter) and renders it as
//! additively blended point sprites with a damped orbit camera. A live
//! debug panel exposes every generation parameter for tuning.
//!
//! # Key entry points
//!
//! - [`galaxy::generate`] - the pure point-field generator
//! - [`galaxy::GalaxySession`] - parameter ownership and regeneration policy
//! - [`engine::GalaxyEngine`] - the rendering engine
//! - [`options::Options`] - runtime configuration (galaxy, camera, debug)
//! - [`Viewer`] - standalone window shell (feature `viewer`)
//!
//! # Architecture
//!
//! Positions are generated once per committed parameter change, never per
//! frame; only the camera animates between regenerations. The generator and
//! session have no compile-time dependency on the rendering stack: the
//! [`renderer::FieldDisplay`] seam carries finished fields across that
//! boundary, and the engine uploads them as a pair of flat GPU buffers that
//! are destroyed when superseded.

pub mod camera;
pub mod engine;
pub mod error;
pub mod galaxy;
pub mod gpu;
#[cfg(feature = "viewer")]
pub mod gui;
pub mod input;
pub mod options;
pub mod renderer;
pub mod util;
#[cfg(feature = "viewer")]
mod viewer;

pub use engine::GalaxyEngine;
pub use error::WhorlError;
pub use galaxy::{generate, GalaxySession, PointField};
pub use input::{InputEvent, MouseButton};
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
