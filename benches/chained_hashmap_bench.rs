use chained_hashmap::{hash, DictPolicy, PolicyHashMap, SlotHashMap};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

// Higher-quality external hash plugged in through the standard
// `fn(buckets, &key)` signature, for comparison with the bundled pair.
fn sip_str_hash(buckets: usize, key: &str) -> usize {
    let mut h = DefaultHasher::new();
    key.hash(&mut h);
    (h.finish() % buckets as u64) as usize
}

// String keys with private copies; the hash function is the variable
// under test.
struct StrPolicy(fn(usize, &str) -> usize);

impl DictPolicy for StrPolicy {
    type Probe = str;
    type Key = String;
    type ValueProbe = u64;
    type Value = u64;

    fn hash(&self, buckets: usize, probe: &str) -> usize {
        (self.0)(buckets, probe)
    }
    fn key_matches(&self, probe: &str, stored: &String) -> bool {
        probe == stored
    }
    fn dup_key(&self, probe: &str) -> String {
        probe.to_owned()
    }
    fn dup_value(&self, probe: &u64) -> u64 {
        *probe
    }
}

const HASHES: [(&str, fn(usize, &str) -> usize); 3] = [
    ("str_hash", hash::str_hash),
    ("elf_str_hash", hash::elf_str_hash),
    ("sip_str_hash", sip_str_hash),
];

fn bench_insert(c: &mut Criterion) {
    for (name, hash_fn) in HASHES {
        c.bench_function(&format!("policy_insert_10k/{name}"), |b| {
            let keys: Vec<String> = lcg(1).take(10_000).map(key).collect();
            b.iter_batched(
                || PolicyHashMap::with_capacity(StrPolicy(hash_fn), 10_000),
                |mut m| {
                    for (i, k) in keys.iter().enumerate() {
                        m.add(k, &(i as u64)).unwrap();
                    }
                    black_box(m)
                },
                BatchSize::SmallInput,
            )
        });
    }
}

fn bench_get_hit(c: &mut Criterion) {
    for (name, hash_fn) in HASHES {
        c.bench_function(&format!("policy_get_hit/{name}"), |b| {
            let mut m = PolicyHashMap::with_capacity(StrPolicy(hash_fn), 20_000);
            let keys: Vec<String> = lcg(7).take(20_000).map(key).collect();
            for (i, k) in keys.iter().enumerate() {
                m.add(k, &(i as u64)).unwrap();
            }
            let mut it = keys.iter().cycle();
            b.iter(|| {
                let k = it.next().unwrap();
                black_box(m.get(k).unwrap());
            })
        });
    }
}

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("policy_get_miss/elf_str_hash", |b| {
        let mut m = PolicyHashMap::with_capacity(StrPolicy(hash::elf_str_hash), 10_000);
        for (i, x) in lcg(11).take(10_000).enumerate() {
            m.add(&key(x), &(i as u64)).unwrap();
        }
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            // keys unlikely to be in the table
            let k = key(miss.next().unwrap());
            black_box(m.get(&k));
        })
    });
}

fn bench_slot_table(c: &mut Criterion) {
    c.bench_function("slot_insert_remove_10k", |b| {
        let ids: Vec<u64> = lcg(23).take(10_000).collect();
        b.iter_batched(
            || {
                SlotHashMap::with_capacity(
                    10_000,
                    |e: &(u64, u64), k: &u64| e.0 == *k,
                    |buckets: usize, k: &u64| (*k % buckets as u64) as usize,
                )
                .unwrap()
            },
            |mut m| {
                for &id in &ids {
                    m.insert(&id, (id, id ^ 0x5555)).unwrap();
                }
                for &id in &ids {
                    m.remove(&id).unwrap();
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert, bench_get_hit, bench_get_miss, bench_slot_table
}
criterion_main!(benches);
