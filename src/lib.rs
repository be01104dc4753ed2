//! chained-hashmap: single-threaded, embeddable hash tables built on
//! separate chaining, with caller-supplied hashing, equality, and
//! ownership behavior.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: an in-memory key/value index for embedding in larger systems,
//!   with every per-key behavior — bucket computation, key identity, and
//!   whether the table stores private copies or the caller's references —
//!   decided by the embedder, once, at creation.
//! - Layers:
//!   - ChainedArena<T> (internal): the one chain engine both tables share.
//!     Fixed bucket array of singly linked chains whose nodes live in a
//!     generational arena; head insertion, predicate walks, and
//!     order-preserving unlink are implemented here and nowhere else.
//!   - PolicyHashMap<P>: key/value table driven by a DictPolicy — the
//!     hash/equality/duplicate/destroy bundle bound statically per table
//!     type. Sized from a fixed pool of primes.
//!   - SlotHashMap<T, K, S, M>: table over opaque elements, with a
//!     caller-supplied slot function (handed the bucket count) and an
//!     "element matches key" predicate. Sized by the prime-scan
//!     heuristic.
//!   - hash / sizing: leaf modules — bundled integer and string hash
//!     functions, the prime pool, and the bucket-count adjustment.
//!
//! Constraints
//! - Single-threaded: `!Send`/`!Sync` by design (no atomics, no locks).
//! - Bucket counts are fixed at creation; there is no rehashing and no
//!   growth, only longer chains.
//! - Keys are unique under the table's own identity predicate; duplicate
//!   inserts fail without mutating the table.
//! - A hash or slot function returning an index at or past the bucket
//!   count fails the operation. Indices are never clamped and never
//!   touch the bucket array.
//! - Ownership is strictly tree-shaped: table → bucket → chain node →
//!   key/value. No reference counting, nothing shared between tables.
//!
//! Why this split?
//! - One chain engine: the two table variants differ in how callers
//!   describe keys, not in how chains work, so the walk/unlink logic
//!   exists once and both variants stay thin.
//! - Arena links instead of pointers: unlink rewires an index and removes
//!   the node from the arena; there is no aliasing window, and handles
//!   handed to callers go stale safely (generational keys).
//! - Policy as a trait: the classic five-slot function bundle becomes one
//!   capability bound statically per table type, so "which duplication
//!   policy is in force" is a property of the type, not a runtime check.
//!
//! Reentrancy
//! - Table operations run caller code (hashing, equality, matching)
//!   mid-walk. Re-entering the same table from that code is a bug; debug
//!   builds panic at the entry point via an internal guard, release
//!   builds pay nothing.

mod chain;
pub mod hash;
pub mod policy;
pub mod policy_map;
mod policy_map_proptest;
mod reentrancy;
pub mod sizing;
pub mod slot_map;

// Public surface
pub use policy::DictPolicy;
pub use policy_map::{AddError, Handle, PolicyHashMap, RemoveError};
pub use slot_map::{SlotError, SlotHashMap};
