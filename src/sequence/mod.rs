//! Image sequence module.
//!
//! Provides the thread-safe ordered container and the image types stored in it.

pub mod container;
pub mod model;

// Re-exports for convenience
pub use container::ImageSequence;
pub use model::{GeoImage, ImageHandle, SequenceSnapshot};
