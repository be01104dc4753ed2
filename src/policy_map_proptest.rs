#![cfg(test)]

// Property tests for PolicyHashMap kept inside the crate so they can
// define policies next to the state machine without feature gates.

use crate::hash;
use crate::policy::DictPolicy;
use crate::policy_map::{AddError, Handle, PolicyHashMap, RemoveError};
use proptest::prelude::*;
use std::collections::HashMap;

// Content-equality integer policy, the no-duplication shape.
struct IntPolicy;

impl DictPolicy for IntPolicy {
    type Probe = u64;
    type Key = u64;
    type ValueProbe = i64;
    type Value = i64;

    fn hash(&self, buckets: usize, probe: &u64) -> usize {
        hash::int_hash(buckets, probe)
    }
    fn key_matches(&self, probe: &u64, stored: &u64) -> bool {
        probe == stored
    }
    fn dup_key(&self, probe: &u64) -> u64 {
        *probe
    }
    fn dup_value(&self, probe: &i64) -> i64 {
        *probe
    }
}

// Worst case: every key lands in bucket 0, so the whole table is one
// chain and every operation is a full walk.
struct OneBucketPolicy;

impl DictPolicy for OneBucketPolicy {
    type Probe = u64;
    type Key = u64;
    type ValueProbe = i64;
    type Value = i64;

    fn hash(&self, _buckets: usize, _probe: &u64) -> usize {
        0
    }
    fn key_matches(&self, probe: &u64, stored: &u64) -> bool {
        probe == stored
    }
    fn dup_key(&self, probe: &u64) -> u64 {
        *probe
    }
    fn dup_value(&self, probe: &i64) -> i64 {
        *probe
    }
}

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// keys, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Add(usize, i64),
    Delete(usize),
    Find(usize),
    Get(usize),
    Mutate(usize, i64),
}

fn arb_scenario() -> impl Strategy<Value = (Vec<u64>, Vec<OpI>)> {
    proptest::collection::btree_set(0u64..1000, 1..=8).prop_flat_map(|pool| {
        let pool: Vec<u64> = pool.into_iter().collect();
        let idx = 0..pool.len();
        let op = prop_oneof![
            (idx.clone(), any::<i64>()).prop_map(|(i, v)| OpI::Add(i, v)),
            idx.clone().prop_map(OpI::Delete),
            idx.clone().prop_map(OpI::Find),
            idx.clone().prop_map(OpI::Get),
            (idx, any::<i64>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - Duplicate keys are rejected; on success a unique live Handle is
//   returned and the model gains the pair.
// - find/get parity with model membership; handle stability for live
//   entries.
// - delete runs iff the model holds the key; stale handles never resolve
//   afterwards.
// - len parity with the model after every op.
fn run_state_machine<P>(make: impl Fn() -> PolicyHashMap<P>, pool: Vec<u64>, ops: Vec<OpI>) -> Result<(), TestCaseError>
where
    P: DictPolicy<Probe = u64, Key = u64, ValueProbe = i64, Value = i64>,
{
    let mut sut = make();
    let mut model: HashMap<u64, i64> = HashMap::new();
    let mut live: HashMap<u64, Handle> = HashMap::new();
    let mut stale: Vec<Handle> = Vec::new();

    for op in ops {
        match op {
            OpI::Add(i, v) => {
                let k = pool[i];
                let already = model.contains_key(&k);
                match sut.add(&k, &v) {
                    Ok(h) => {
                        prop_assert!(!already, "add must fail on duplicate");
                        let prev = live.insert(k, h);
                        prop_assert!(prev.is_none());
                        model.insert(k, v);
                    }
                    Err(AddError::DuplicateKey) => {
                        prop_assert!(already, "duplicate error only when key exists");
                    }
                    Err(e) => return Err(TestCaseError::fail(format!("unexpected {e:?}"))),
                }
            }
            OpI::Delete(i) => {
                let k = pool[i];
                match sut.delete(&k) {
                    Ok(()) => {
                        prop_assert!(model.remove(&k).is_some(), "delete succeeded on absent key");
                        stale.push(live.remove(&k).expect("live handle tracked"));
                    }
                    Err(RemoveError::NotFound) => {
                        prop_assert!(!model.contains_key(&k));
                    }
                    Err(e) => return Err(TestCaseError::fail(format!("unexpected {e:?}"))),
                }
            }
            OpI::Find(i) => {
                let k = pool[i];
                let found = sut.find(&k);
                prop_assert_eq!(found.is_some(), model.contains_key(&k));
                if let Some(h) = found {
                    prop_assert_eq!(Some(&h), live.get(&k), "find must return the live handle");
                }
            }
            OpI::Get(i) => {
                let k = pool[i];
                prop_assert_eq!(sut.get(&k), model.get(&k));
            }
            OpI::Mutate(i, d) => {
                let k = pool[i];
                if let Some(&h) = live.get(&k) {
                    let vr = sut.handle_value_mut(h).expect("live handle resolves");
                    *vr = vr.saturating_add(d);
                    let mv = model.get_mut(&k).expect("present in model");
                    *mv = mv.saturating_add(d);
                } else {
                    prop_assert!(sut.find(&k).is_none());
                }
            }
        }

        // Post-conditions after each op.
        for &h in &stale {
            prop_assert!(sut.handle_value(h).is_none(), "stale handle must not resolve");
        }
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_state_machine(|| PolicyHashMap::new(IntPolicy), pool, ops)?;
    }

    // Same invariants with every key forced onto one chain, stressing the
    // walk and the order-preserving unlink.
    #[test]
    fn prop_state_machine_one_bucket((pool, ops) in arb_scenario()) {
        run_state_machine(|| PolicyHashMap::new(OneBucketPolicy), pool, ops)?;
    }
}
