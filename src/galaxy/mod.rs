//! Point-field generation and parameter ownership.
//!
//! [`generate`] is the pure generator: parameters plus an injected random
//! source in, flat position/color buffers out. [`GalaxySession`] owns the
//! live [`Options`](crate::options::Options) snapshot and the single
//! resident [`PointField`], and decides when a committed parameter change
//! requires regeneration.

mod field;
mod generator;
mod session;

pub use field::PointField;
pub use generator::generate;
pub use session::{CommitOutcome, GalaxySession};
