//! The behavior bundle attached to a [`PolicyHashMap`](crate::PolicyHashMap)
//! at creation.

/// Per-table behavior: bucket computation, key identity, and how the
/// table takes ownership of inserted keys and values.
///
/// One implementation is captured by value when a table is created and
/// invoked uniformly for every operation over the table's lifetime.
/// `hash` has no default — a table cannot exist without one. The
/// destruction hooks default to dropping, which is the right teardown for
/// any stored form that owns its data, and a free no-op for stored
/// references.
///
/// The probe/stored split is where the duplication decision lives, fixed
/// per table type rather than checked at runtime:
///
/// - A *duplicating* policy stores private copies. `Probe = str`,
///   `Key = String`, `dup_key` allocates. The caller may release its
///   buffers the moment `add` returns; the table alone releases the
///   copies, through `destroy_key`/`destroy_value`, on delete or drop.
/// - A *borrowing* policy stores the caller's references.
///   `Probe = &'a T`, `Key = &'a T`, `dup_key` copies the reference and
///   destruction drops it without releasing anything. The borrow checker
///   keeps the caller's storage alive for as long as the table can reach
///   it.
///
/// Implementations must be pure with respect to the table: calling back
/// into the table they serve from any of these methods is a bug, and
/// panics in debug builds.
pub trait DictPolicy {
    /// Key form accepted by `add`, `find`, `get` and `delete`.
    type Probe: ?Sized;
    /// Key form owned by entries.
    type Key;
    /// Value form accepted by `add`.
    type ValueProbe: ?Sized;
    /// Value form owned by entries.
    type Value;

    /// Bucket index for `probe` in a table of `buckets` buckets.
    ///
    /// An index at or past `buckets` fails the calling operation; it is
    /// never clamped and never touches the bucket array.
    fn hash(&self, buckets: usize, probe: &Self::Probe) -> usize;

    /// Does `stored` denote the same key as `probe`?
    ///
    /// Policies over borrowed references that want compare-by-address
    /// semantics use [`core::ptr::eq`] here.
    fn key_matches(&self, probe: &Self::Probe, stored: &Self::Key) -> bool;

    /// Produce the stored form of a key: a private copy, or the caller's
    /// reference.
    fn dup_key(&self, probe: &Self::Probe) -> Self::Key;

    /// Produce the stored form of a value.
    fn dup_value(&self, probe: &Self::ValueProbe) -> Self::Value;

    /// Tear down a stored key on delete or table drop. Must not fail.
    fn destroy_key(&self, key: Self::Key) {
        drop(key);
    }

    /// Tear down a stored value on delete or table drop. Must not fail.
    fn destroy_value(&self, value: Self::Value) {
        drop(value);
    }
}
