//! GeoSeq - Ordered sequences of geotagged images.
//!
//! This crate stores images in capture order and answers positional queries
//! while other threads append or remove images:
//!
//! - **Navigation**: `next` / `previous` neighbours of a member
//! - **Distance**: how many positions apart two members are
//! - **Snapshots**: consistent copies of the current order
//!
//! # Example
//!
//! ```rust
//! use geoseq::{GeoImage, ImageHandle, ImageSequence};
//!
//! // A sequence fetched from the image service
//! let sequence = ImageSequence::with_key("seq1", 1_000);
//!
//! let a = ImageHandle::new(GeoImage::new(48.85, 2.35).with_key("a"));
//! let b = ImageHandle::new(GeoImage::new(48.86, 2.35).with_key("b"));
//! let c = ImageHandle::new(GeoImage::new(48.87, 2.35).with_key("c"));
//! sequence.append_all([a.clone(), b.clone(), c.clone()]);
//!
//! assert_eq!(sequence.next(&a).unwrap(), Some(b.clone()));
//! assert_eq!(sequence.previous(&a).unwrap(), None);
//! assert_eq!(sequence.distance(&a, &c).unwrap(), 2);
//! ```

pub mod error;
pub mod history;
pub mod transfer;

// Sequence module
pub mod sequence;

// Re-exports for convenience
pub use error::{SequenceError, SequenceResult};
pub use history::{ListenerRegistry, RecordListener};
pub use sequence::{GeoImage, ImageHandle, ImageSequence, SequenceSnapshot};
pub use transfer::{TransferObserver, TransferTracker};
