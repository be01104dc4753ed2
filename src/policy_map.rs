//! PolicyHashMap: the policy-driven chained table.

use slotmap::DefaultKey;

use crate::chain::ChainedArena;
use crate::policy::DictPolicy;
use crate::reentrancy::ReentryGuard;
use crate::sizing::{pick_pool_prime, PRIME_POOL};

/// Stable reference to one entry of a [`PolicyHashMap`].
///
/// Backed by a generational arena key: a handle for a deleted entry never
/// resolves again and never aliases a later insertion, even if the
/// underlying slot is reused.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Handle(DefaultKey);

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Why an [`add`](PolicyHashMap::add) was rejected.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AddError {
    /// An entry with an equal key is already present; nothing changed.
    DuplicateKey,
    /// The policy's hash mapped the key outside the bucket array.
    BadBucket,
}

/// Why a [`delete`](PolicyHashMap::delete) was rejected.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RemoveError {
    /// No entry matches the key.
    NotFound,
    /// The policy's hash mapped the key outside the bucket array.
    BadBucket,
}

/// A separate-chaining hash table whose hashing, key identity, and
/// key/value ownership are supplied by a [`DictPolicy`] at creation.
///
/// The bucket count is fixed for the table's lifetime; load past it
/// degrades into longer chains, never into a rehash. Keys are unique
/// under the policy's own identity: a second `add` of an equal key is
/// rejected, not overwritten.
pub struct PolicyHashMap<P: DictPolicy> {
    policy: P,
    chains: ChainedArena<Entry<P::Key, P::Value>>,
    reentrancy: ReentryGuard,
}

impl<P: DictPolicy> PolicyHashMap<P> {
    /// Create a table over the first entry of the prime pool (13 buckets).
    ///
    /// The classic fixed-at-smallest-prime behavior; use
    /// [`with_capacity`](Self::with_capacity) to size for an expected
    /// load.
    pub fn new(policy: P) -> Self {
        Self::with_buckets(policy, PRIME_POOL[0])
    }

    /// Create a table sized from the prime pool: the smallest pool prime
    /// at or above `capacity`, saturating at the pool's largest entry.
    pub fn with_capacity(policy: P, capacity: usize) -> Self {
        Self::with_buckets(policy, pick_pool_prime(capacity))
    }

    fn with_buckets(policy: P, buckets: usize) -> Self {
        Self {
            policy,
            chains: ChainedArena::with_buckets(buckets),
            reentrancy: ReentryGuard::new(),
        }
    }

    pub fn bucket_count(&self) -> usize {
        self.chains.bucket_count()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bucket index for `probe`, or `None` when the policy's hash is out
    /// of range for this table.
    fn bucket_for(&self, probe: &P::Probe) -> Option<usize> {
        let buckets = self.chains.bucket_count();
        let bucket = self.policy.hash(buckets, probe);
        (bucket < buckets).then_some(bucket)
    }

    /// Insert a new entry for `key`.
    ///
    /// The stored key and value are produced by the policy's duplication
    /// hooks. Fails with [`AddError::DuplicateKey`] if an equal key is
    /// already present (the existing entry is untouched) and with
    /// [`AddError::BadBucket`] if the hash is out of range; in both cases
    /// the table is unchanged. On success the new entry sits at the head
    /// of its chain and the returned [`Handle`] resolves to it.
    pub fn add(&mut self, key: &P::Probe, value: &P::ValueProbe) -> Result<Handle, AddError> {
        let _busy = self.reentrancy.enter();
        let bucket = self.bucket_for(key).ok_or(AddError::BadBucket)?;
        if self
            .chains
            .find(bucket, |e| self.policy.key_matches(key, &e.key))
            .is_some()
        {
            return Err(AddError::DuplicateKey);
        }
        let entry = Entry {
            key: self.policy.dup_key(key),
            value: self.policy.dup_value(value),
        };
        Ok(Handle(self.chains.push_front(bucket, entry)))
    }

    /// Handle of the entry matching `key`, if any. Out-of-range hashes
    /// report as absent.
    pub fn find(&self, key: &P::Probe) -> Option<Handle> {
        let _busy = self.reentrancy.enter();
        let bucket = self.bucket_for(key)?;
        self.chains
            .find(bucket, |e| self.policy.key_matches(key, &e.key))
            .map(Handle)
    }

    /// Borrow the value stored under `key`, if any.
    pub fn get(&self, key: &P::Probe) -> Option<&P::Value> {
        let handle = self.find(key)?;
        self.chains.get(handle.0).map(|e| &e.value)
    }

    /// Remove the entry matching `key`, running the destruction policy on
    /// its stored key and value.
    ///
    /// The rest of the entry's chain keeps its order. Handles to the
    /// removed entry stop resolving.
    pub fn delete(&mut self, key: &P::Probe) -> Result<(), RemoveError> {
        let _busy = self.reentrancy.enter();
        let bucket = self.bucket_for(key).ok_or(RemoveError::BadBucket)?;
        let entry = self
            .chains
            .unlink(bucket, |e| self.policy.key_matches(key, &e.key))
            .ok_or(RemoveError::NotFound)?;
        self.policy.destroy_key(entry.key);
        self.policy.destroy_value(entry.value);
        Ok(())
    }

    /// Borrow the key of the entry `handle` refers to, if it is live.
    pub fn handle_key(&self, handle: Handle) -> Option<&P::Key> {
        self.chains.get(handle.0).map(|e| &e.key)
    }

    /// Borrow the value of the entry `handle` refers to, if it is live.
    pub fn handle_value(&self, handle: Handle) -> Option<&P::Value> {
        self.chains.get(handle.0).map(|e| &e.value)
    }

    /// Mutably borrow the value of the entry `handle` refers to, if it is
    /// live.
    pub fn handle_value_mut(&mut self, handle: Handle) -> Option<&mut P::Value> {
        self.chains.get_mut(handle.0).map(|e| &mut e.value)
    }
}

impl<P: DictPolicy> Drop for PolicyHashMap<P> {
    /// Teardown walks every chain and hands each stored key and value to
    /// the destruction policy, exactly once.
    fn drop(&mut self) {
        for entry in self.chains.drain_values() {
            self.policy.destroy_key(entry.key);
            self.policy.destroy_value(entry.value);
        }
    }
}
