//! SlotHashMap: the slot-function table variant.
//!
//! Instead of a policy over key/value pairs, this table stores opaque
//! elements and asks the caller two questions: which bucket does a key
//! land in (`slot_fn`, handed the current bucket count), and does a
//! stored element answer to this key (`match_fn`). Both are bound
//! statically at creation.

use core::marker::PhantomData;

use crate::chain::ChainedArena;
use crate::reentrancy::ReentryGuard;
use crate::sizing::adjust_bucket_count;

/// Rejection outcomes for [`SlotHashMap`] operations, kept distinct so
/// callers can branch on "already there" / "not there" without conflating
/// either with a misbehaving slot function.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SlotError {
    /// The slot function produced an index outside the bucket array.
    BadSlot,
    /// An element matching the key is already stored.
    Exists,
    /// No stored element matches the key.
    NotFound,
}

/// A separate-chaining table over opaque elements, with caller-supplied
/// bucket computation and key matching.
///
/// The bucket count is the sizing heuristic's adjustment of the requested
/// capacity and never changes. Elements are owned by the table and
/// dropped on removal unless handed back, and on table drop.
pub struct SlotHashMap<T, K: ?Sized, S, M>
where
    S: Fn(usize, &K) -> usize,
    M: Fn(&T, &K) -> bool,
{
    chains: ChainedArena<T>,
    slot_fn: S,
    match_fn: M,
    reentrancy: ReentryGuard,
    _probe: PhantomData<fn(&K)>,
}

impl<T, K: ?Sized, S, M> SlotHashMap<T, K, S, M>
where
    S: Fn(usize, &K) -> usize,
    M: Fn(&T, &K) -> bool,
{
    /// Create a table with `adjust_bucket_count(requested)` buckets.
    ///
    /// Returns `None` when the adjusted count is zero (a zero request
    /// below the heuristic's threshold passes through unchanged).
    pub fn with_capacity(requested: usize, match_fn: M, slot_fn: S) -> Option<Self> {
        let buckets = adjust_bucket_count(requested);
        if buckets == 0 {
            return None;
        }
        Some(Self {
            chains: ChainedArena::with_buckets(buckets),
            slot_fn,
            match_fn,
            reentrancy: ReentryGuard::new(),
            _probe: PhantomData,
        })
    }

    /// Actual bucket count after adjustment.
    pub fn bucket_count(&self) -> usize {
        self.chains.bucket_count()
    }

    /// Number of stored elements.
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bucket index for `key`, or `None` when the slot function is out of
    /// range for this table.
    fn slot_for(&self, key: &K) -> Option<usize> {
        let buckets = self.chains.bucket_count();
        let slot = (self.slot_fn)(buckets, key);
        (slot < buckets).then_some(slot)
    }

    /// Guard-free probe shared by the public operations.
    fn lookup(&self, key: &K) -> Option<slotmap::DefaultKey> {
        let slot = self.slot_for(key)?;
        self.chains.find(slot, |v| (self.match_fn)(v, key))
    }

    /// Store `value` under `key`.
    ///
    /// Fails with [`SlotError::Exists`] when a matching element is
    /// already present (checked first, as a full lookup) and with
    /// [`SlotError::BadSlot`] when the slot function is out of range. On
    /// success the element sits at the head of its chain.
    pub fn insert(&mut self, key: &K, value: T) -> Result<(), SlotError> {
        let _busy = self.reentrancy.enter();
        if self.lookup(key).is_some() {
            return Err(SlotError::Exists);
        }
        let slot = self.slot_for(key).ok_or(SlotError::BadSlot)?;
        self.chains.push_front(slot, value);
        Ok(())
    }

    /// Borrow the first stored element matching `key`. Out-of-range slots
    /// report as absent.
    pub fn find(&self, key: &K) -> Option<&T> {
        let _busy = self.reentrancy.enter();
        let found = self.lookup(key)?;
        self.chains.get(found)
    }

    /// Remove and return the first element matching `key`.
    ///
    /// Existence is confirmed before the slot is recomputed, so a slot
    /// function gone out of range surfaces as [`SlotError::NotFound`]
    /// from the pre-check rather than [`SlotError::BadSlot`].
    pub fn remove(&mut self, key: &K) -> Result<T, SlotError> {
        let _busy = self.reentrancy.enter();
        if self.lookup(key).is_none() {
            return Err(SlotError::NotFound);
        }
        let slot = self.slot_for(key).ok_or(SlotError::BadSlot)?;
        self.chains
            .unlink(slot, |v| (self.match_fn)(v, key))
            .ok_or(SlotError::NotFound)
    }
}
