//! Core `ImageSequence` implementation.
//!
//! The sequence owns an ordered `Vec` of handles behind a `RwLock`:
//! - mutators (`append`, `append_all`, `remove`) take the write lock per element
//! - queries take the read lock once and resolve membership and position
//!   together, so every answer is consistent with a single point in the
//!   mutation history
//!
//! Lock poisoning is recovered rather than propagated. A `Vec` is never left
//! half-updated by `push`/`remove`, so the data behind a poisoned lock is still
//! valid.

use std::fmt::Debug;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, trace};

use crate::error::{SequenceError, SequenceResult};

/// An ordered, thread-safe sequence of image handles.
///
/// Insertion order is capture order. Duplicates are kept. Handles are compared
/// with `PartialEq`; the container never touches the images they refer to.
pub struct ImageSequence<H> {
    images: RwLock<Vec<H>>,
    /// Remote key, `None` for sequences built locally from imported images.
    key: Option<String>,
    /// Epoch milliseconds, only set alongside `key`.
    created_at: Option<i64>,
}

impl<H> ImageSequence<H>
where
    H: Clone + PartialEq + Debug,
{
    // =========================================================================
    // INITIALIZATION
    // =========================================================================

    /// Creates an empty local sequence without key or timestamp.
    pub fn new() -> Self {
        Self {
            images: RwLock::new(Vec::new()),
            key: None,
            created_at: None,
        }
    }

    /// Creates an empty sequence fetched from a remote source.
    ///
    /// An empty `key` yields a local sequence and the timestamp is dropped.
    pub fn with_key(key: impl Into<String>, created_at: i64) -> Self {
        let key = key.into();
        if key.is_empty() {
            return Self::new();
        }
        Self {
            images: RwLock::new(Vec::new()),
            key: Some(key),
            created_at: Some(created_at),
        }
    }

    /// Returns the remote key, or `None` for locally built sequences.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Returns the creation time in epoch milliseconds, if remote.
    pub fn created_at(&self) -> Option<i64> {
        self.created_at
    }

    /// Returns true if the sequence was built locally.
    pub fn is_local(&self) -> bool {
        self.key.is_none()
    }

    // =========================================================================
    // MUTATION
    // =========================================================================

    /// Appends a handle to the end of the sequence.
    pub fn append(&self, image: H) {
        let mut images = self.write();
        images.push(image);
        trace!(sequence = self.label(), len = images.len(), "image appended");
    }

    /// Appends handles in order.
    ///
    /// Each element is appended under its own lock, so concurrent readers may
    /// see a partially applied batch and other appends may interleave.
    pub fn append_all<I>(&self, images: I)
    where
        I: IntoIterator<Item = H>,
    {
        let mut count = 0usize;
        for image in images {
            self.append(image);
            count += 1;
        }
        debug!(sequence = self.label(), count, "batch appended");
    }

    /// Removes the first occurrence of `image`.
    ///
    /// Returns false (and does nothing) when the handle is not a member.
    pub fn remove(&self, image: &H) -> bool {
        let mut images = self.write();
        match locate(images.as_slice(), image) {
            Some(index) => {
                images.remove(index);
                trace!(sequence = self.label(), index, len = images.len(), "image removed");
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Returns a copy of the current members in order.
    ///
    /// The copy reflects one consistent state and is not affected by later
    /// mutation.
    pub fn images(&self) -> Vec<H> {
        self.read().clone()
    }

    /// Returns the number of members.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns true if there are no members.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Returns true if `image` is a current member.
    pub fn contains(&self, image: &H) -> bool {
        locate(self.read().as_slice(), image).is_some()
    }

    /// Returns the zero-based position of the first occurrence of `image`.
    pub fn position(&self, image: &H) -> Option<usize> {
        locate(self.read().as_slice(), image)
    }

    /// Returns the first member.
    pub fn first(&self) -> Option<H> {
        self.read().first().cloned()
    }

    /// Returns the last member.
    pub fn last(&self) -> Option<H> {
        self.read().last().cloned()
    }

    /// Returns the handle after `image`, or `None` if `image` is last.
    pub fn next(&self, image: &H) -> SequenceResult<Option<H>> {
        let images = self.read();
        let index = locate(images.as_slice(), image).ok_or_else(|| not_found(image))?;
        Ok(images.get(index + 1).cloned())
    }

    /// Returns the handle before `image`, or `None` if `image` is first.
    pub fn previous(&self, image: &H) -> SequenceResult<Option<H>> {
        let images = self.read();
        let index = locate(images.as_slice(), image).ok_or_else(|| not_found(image))?;
        Ok(index.checked_sub(1).and_then(|i| images.get(i)).cloned())
    }

    /// Returns how many positions apart two members are.
    ///
    /// This is the index difference, not a geographic distance. Both handles
    /// are resolved under the same read guard.
    pub fn distance(&self, a: &H, b: &H) -> SequenceResult<usize> {
        let images = self.read();
        let index_a = locate(images.as_slice(), a).ok_or_else(|| not_found(a))?;
        let index_b = locate(images.as_slice(), b).ok_or_else(|| not_found(b))?;
        Ok(index_a.abs_diff(index_b))
    }

    // =========================================================================
    // INTERNAL HELPERS
    // =========================================================================

    fn read(&self) -> RwLockReadGuard<'_, Vec<H>> {
        self.images.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<H>> {
        self.images.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn label(&self) -> &str {
        self.key.as_deref().unwrap_or("<local>")
    }
}

impl<H> Default for ImageSequence<H>
where
    H: Clone + PartialEq + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Debug for ImageSequence<H>
where
    H: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let images = self.images.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("ImageSequence")
            .field("key", &self.key)
            .field("created_at", &self.created_at)
            .field("images", &*images)
            .finish()
    }
}

/// Single membership-and-position lookup shared by every query.
fn locate<H: PartialEq>(images: &[H], image: &H) -> Option<usize> {
    images.iter().position(|candidate| candidate == image)
}

fn not_found<H: Debug>(image: &H) -> SequenceError {
    SequenceError::not_found(format!("{image:?}"))
}

// =============================================================================
// TESTS
// =============================================================================
