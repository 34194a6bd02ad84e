use std::env;
use std::str::FromStr;
use std::sync::Mutex;

use rand::prelude::*;

use multisort::Value;

/// Provides a set of patterns useful for testing the sort specifications.
/// Scalar patterns are `i32`, record patterns are `Value::Object`s.

// --- Public ---

pub fn random(len: usize) -> Vec<i32> {
    //     .
    // : . : :
    // :.:::.::

    random_vec(len)
}

pub fn random_uniform<R>(len: usize, range: R) -> Vec<i32>
where
    R: Into<rand::distributions::Uniform<i32>>,
{
    // :.:.:.::
    let mut rng = rand::rngs::StdRng::from(new_seed());

    // Abstracting over ranges in Rust :(
    let dist: rand::distributions::Uniform<i32> = range.into();

    (0..len).map(|_| dist.sample(&mut rng)).collect()
}

pub fn all_equal(len: usize) -> Vec<i32> {
    // ......
    // ::::::

    (0..len).map(|_| 66).collect::<Vec<_>>()
}

pub fn ascending(len: usize) -> Vec<i32> {
    //     .:
    //   .:::
    // .:::::

    (0..len as i32).collect::<Vec<_>>()
}

pub fn descending(len: usize) -> Vec<i32> {
    // :.
    // :::.
    // :::::.

    (0..len as i32).rev().collect::<Vec<_>>()
}

pub fn saw_mixed(len: usize, saw_count: usize) -> Vec<i32> {
    // :.  :.    .::.    .:
    // :::.:::..::::::..:::

    if len == 0 {
        return Vec::new();
    }

    let mut vals = random_vec(len);
    let chunks_size = (len / saw_count.max(1)).max(1);
    let saw_directions = random_uniform((len / chunks_size) + 1, 0..=1);

    for (i, chunk) in vals.chunks_mut(chunks_size).enumerate() {
        if saw_directions[i] == 0 {
            chunk.sort();
        } else {
            chunk.sort_by_key(|&e| std::cmp::Reverse(e));
        }
    }

    vals
}

pub fn pipe_organ(len: usize) -> Vec<i32> {
    //   .:.
    // .:::::.

    let mut vals = random_vec(len);

    let first_half = &mut vals[0..(len / 2)];
    first_half.sort();

    let second_half = &mut vals[(len / 2)..len];
    second_half.sort_by_key(|&e| std::cmp::Reverse(e));

    vals
}

/// `len` values drawn from `0..=max_val`, roughly `null_percent` of them replaced with a
/// null-like value, alternating `Null` and `Undefined`.
pub fn random_with_nulls(len: usize, max_val: i32, null_percent: u32) -> Vec<Value> {
    let mut rng = rand::rngs::StdRng::from(new_seed());
    let mut null_count = 0;

    (0..len)
        .map(|_| {
            if rng.gen_range(0..100) < null_percent {
                null_count += 1;
                if null_count % 2 == 0 {
                    Value::Null
                } else {
                    Value::Undefined
                }
            } else {
                Value::from(rng.gen_range(0..=max_val))
            }
        })
        .collect()
}

/// Records `{ id, group, rank, name }`.
///
/// `id` is the input position and unique, `group` and `rank` are drawn from small ranges so ties
/// on them are common, `name` is sometimes missing.
pub fn records(len: usize) -> Vec<Value> {
    let mut rng = rand::rngs::StdRng::from(new_seed());

    (0..len)
        .map(|id| {
            let mut entries = vec![
                ("id", Value::from(id)),
                ("group", Value::from(rng.gen_range(0..4))),
                ("rank", Value::from(rng.gen_range(0..8))),
            ];
            if rng.gen_range(0..10) != 0 {
                let name: String = (0..3).map(|_| rng.gen_range('a'..='e')).collect();
                entries.push(("name", Value::from(name)));
            }

            Value::object(entries)
        })
        .collect()
}

/// Overwrites the default behavior so that each call to a random derived pattern yields new random
/// values.
///
/// By default `patterns::random(4)` will yield the same values per process invocation.
pub fn use_random_seed_each_time() {
    let (seed_type, _) = get_or_init_seed_type_and_value();
    if seed_type == SeedType::ExternalOverride {
        panic!("Using use_random_seed_each_time conflicts with the external seed override.");
    }

    *SEED_TYPE_AND_VALUE.lock().unwrap() = Some((SeedType::RandomEachTime, 0));
}

pub fn random_init_seed() -> u64 {
    get_or_init_seed_type_and_value().1
}

// --- Private ---

#[derive(Copy, Clone, PartialEq, Eq)]
enum SeedType {
    RandomEachTime,
    RandomOncePerProcess,
    ExternalOverride,
}

static SEED_TYPE_AND_VALUE: Mutex<Option<(SeedType, u64)>> = Mutex::new(None);

fn get_or_init_seed_type_and_value() -> (SeedType, u64) {
    let (seed_type, seed_val) = *SEED_TYPE_AND_VALUE.lock().unwrap().get_or_insert_with(|| {
        if let Some(override_seed) = env::var("OVERRIDE_SEED")
            .ok()
            .map(|seed| u64::from_str(&seed).unwrap())
        {
            (SeedType::ExternalOverride, override_seed)
        } else {
            let per_process_seed = thread_rng().gen();
            (SeedType::RandomOncePerProcess, per_process_seed)
        }
    });

    if seed_type == SeedType::RandomEachTime {
        (SeedType::RandomEachTime, thread_rng().gen())
    } else {
        (seed_type, seed_val)
    }
}

fn new_seed() -> StdRng {
    // Random seed, but prints it for repeatability.
    rand::SeedableRng::seed_from_u64(random_init_seed())
}

fn random_vec(len: usize) -> Vec<i32> {
    let mut rng = rand::rngs::StdRng::from(new_seed());

    (0..len).map(|_| rng.gen::<i32>()).collect()
}
