//! Data models for image sequences.
//!
//! `GeoImage` is the metadata record, `ImageHandle` the shared reference that
//! sequences store, and `SequenceSnapshot` a serializable listing for display
//! layers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;
use uuid::Uuid;

use super::container::ImageSequence;

// =============================================================================
// GEO IMAGE
// =============================================================================

/// A single geotagged image captured along a path.
///
/// Remote images carry the key assigned by the image service. Imported images
/// have no key and are identified only by their locally generated `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeoImage {
    /// Locally generated identifier.
    pub id: Uuid,

    /// Remote key, absent for imported images.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    pub latitude: f64,
    pub longitude: f64,

    /// Compass heading in degrees, clockwise from north.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<f64>,

    /// Capture time as epoch milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<i64>,
}

impl GeoImage {
    /// Creates a new image at the given coordinates with a fresh id.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            key: None,
            latitude,
            longitude,
            heading: None,
            captured_at: None,
        }
    }

    /// Builder: Set remote key. Empty keys are ignored.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.key = if key.is_empty() { None } else { Some(key) };
        self
    }

    /// Builder: Set heading (normalised into `[0, 360)`).
    pub fn with_heading(mut self, heading: f64) -> Self {
        self.heading = Some(heading.rem_euclid(360.0));
        self
    }

    /// Builder: Set capture time.
    pub fn with_captured_at(mut self, captured_at: i64) -> Self {
        self.captured_at = Some(captured_at);
        self
    }

    /// Returns true if the image was imported locally rather than fetched.
    pub fn is_imported(&self) -> bool {
        self.key.is_none()
    }

    /// Converts to a JSON-serializable representation.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id.to_string(),
            "key": self.key,
            "latitude": self.latitude,
            "longitude": self.longitude,
            "heading": self.heading,
            "captured_at": self.captured_at,
        })
    }
}

// =============================================================================
// IMAGE HANDLE
// =============================================================================

/// Shared, read-only reference to a `GeoImage`.
///
/// Equality and hashing use pointer identity: two handles are equal only when
/// they point at the same allocation, so two images with identical metadata
/// are still distinct members of a sequence.
#[derive(Clone)]
pub struct ImageHandle(Arc<GeoImage>);

impl ImageHandle {
    /// Wraps an image in a new handle.
    pub fn new(image: GeoImage) -> Self {
        Self(Arc::new(image))
    }

    /// Returns the underlying image.
    pub fn image(&self) -> &GeoImage {
        &self.0
    }
}

impl From<GeoImage> for ImageHandle {
    fn from(image: GeoImage) -> Self {
        Self::new(image)
    }
}

impl Deref for ImageHandle {
    type Target = GeoImage;

    fn deref(&self) -> &GeoImage {
        &self.0
    }
}

impl PartialEq for ImageHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ImageHandle {}

impl Hash for ImageHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state);
    }
}

impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.key {
            Some(key) => write!(f, "ImageHandle({key})"),
            None => write!(f, "ImageHandle({})", self.0.id),
        }
    }
}

// =============================================================================
// SEQUENCE SNAPSHOT
// =============================================================================

/// Serializable point-in-time listing of a sequence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SequenceSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,

    /// Images in sequence order.
    pub images: Vec<GeoImage>,
}

impl SequenceSnapshot {
    /// Captures the current members of `sequence`.
    pub fn capture(sequence: &ImageSequence<ImageHandle>) -> Self {
        Self {
            key: sequence.key().map(str::to_string),
            created_at: sequence.created_at(),
            images: sequence
                .images()
                .iter()
                .map(|handle| handle.image().clone())
                .collect(),
        }
    }

    /// Returns the number of images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Returns true if there are no images.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Converts to a JSON-serializable representation.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "key": self.key,
            "created_at": self.created_at,
            "images": self.images.iter().map(GeoImage::to_json_value).collect::<Vec<_>>(),
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
