use std::cmp::Ordering;
use std::fmt::Debug;
use std::io::{self, Write};
use std::sync::Mutex;

use multisort::{asc, desc, key, try_key, KeyDescriptor, ObjectForm, SortBy, SortError, Value};

use crate::patterns;
use crate::Sort;

#[cfg(miri)]
const TEST_SIZES: [usize; 12] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 10, 15, 20];

#[cfg(not(miri))]
const TEST_SIZES: [usize; 22] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 15, 16, 17, 20, 24, 30, 33, 50, 100, 200, 1_000,
];

fn get_or_init_random_seed<S: Sort>() -> u64 {
    static SEED_WRITTEN: Mutex<bool> = Mutex::new(false);
    let seed = patterns::random_init_seed();

    let mut seed_writer = SEED_WRITTEN.lock().unwrap();
    if !*seed_writer {
        let _ = env_logger::builder().is_test(true).try_init();

        // Always write the seed before doing anything to ensure reproducibility of failures.
        io::stdout()
            .write_all(format!("\nSeed: {seed}\nTesting: {}\n\n", <S as Sort>::name()).as_bytes())
            .unwrap();
        io::stdout().flush().unwrap();

        *seed_writer = true;
    }

    seed
}

fn as_values(v: &[i32]) -> Vec<Value> {
    v.iter().map(|&x| Value::from(x)).collect()
}

fn field(v: &Value, name: &str) -> Value {
    v.get(name).cloned().unwrap_or_default()
}

fn assert_same<T: PartialEq + Debug>(original: &[T], expected: &[T], got: &[T]) {
    if expected != got {
        if original.len() <= 100 {
            eprintln!("Original: {:?}", original);
            eprintln!("Expected: {:?}", expected);
            eprintln!("Got:      {:?}", got);
        }

        panic!("Test assertion failed!")
    }
}

// Whole-value ascending and descending against the std sort on plain integers.
fn sort_comp<S: Sort>(v: &[i32]) {
    let instance = <S as Sort>::instance();

    let mut expected = v.to_vec();
    expected.sort();

    let mut got = v.to_vec();
    instance.sort_ascending(&mut got, ()).unwrap();
    assert_same(v, &expected, &got);

    expected.reverse();
    // Reversing an ascending sort is only a descending sort for distinct keys, equal integers are
    // indistinguishable here.
    let mut got = v.to_vec();
    instance.sort_descending(&mut got, ()).unwrap();
    assert_same(v, &expected, &got);
}

fn test_impl<S: Sort>(pattern_fn: impl Fn(usize) -> Vec<i32>) {
    for test_size in TEST_SIZES {
        let test_data = pattern_fn(test_size);
        sort_comp::<S>(&test_data);
    }
}

fn test_impl_custom(mut test_fn: impl FnMut(usize, fn(usize) -> Vec<i32>)) {
    let test_pattern_fns: Vec<fn(usize) -> Vec<i32>> = vec![
        patterns::random,
        |size| patterns::random_uniform(size, 0..=(((size as f64).log2().round()) as i32)),
        |size| patterns::random_uniform(size, 0..=1),
        patterns::ascending,
        patterns::descending,
        |size| patterns::saw_mixed(size, ((size as f64).log2().round()) as usize),
    ];

    for test_pattern_fn in test_pattern_fns {
        for test_size in &TEST_SIZES[..TEST_SIZES.len() - 1] {
            if *test_size < 2 {
                continue;
            }

            test_fn(*test_size, test_pattern_fn);
        }
    }
}

// --- TESTS ---

pub fn basic<S: Sort>() {
    let _seed = get_or_init_random_seed::<S>();

    sort_comp::<S>(&[]);
    sort_comp::<S>(&[1]);
    sort_comp::<S>(&[2, 3]);
    sort_comp::<S>(&[3, 1, 4, 1, 5]);
    sort_comp::<S>(&[2, 7709, 400, 90932]);
    sort_comp::<S>(&[15, -1, 3, -1, -3, -1, 7]);
}

pub fn random<S: Sort>() {
    let _seed = get_or_init_random_seed::<S>();
    test_impl::<S>(patterns::random);
}

pub fn random_narrow<S: Sort>() {
    let _seed = get_or_init_random_seed::<S>();
    let narrow = |size: usize| patterns::random_uniform(size, 0..=(size as i32 / 10).max(1));
    test_impl::<S>(narrow);
}

pub fn all_equal<S: Sort>() {
    let _seed = get_or_init_random_seed::<S>();
    test_impl::<S>(patterns::all_equal);
}

pub fn ascending<S: Sort>() {
    let _seed = get_or_init_random_seed::<S>();
    test_impl::<S>(patterns::ascending);
}

pub fn descending<S: Sort>() {
    let _seed = get_or_init_random_seed::<S>();
    test_impl::<S>(patterns::descending);
}

pub fn saw_mixed<S: Sort>() {
    let _seed = get_or_init_random_seed::<S>();
    test_impl::<S>(|test_size| {
        patterns::saw_mixed(test_size, ((test_size as f64).log2().round()) as usize)
    });
}

pub fn pipe_organ<S: Sort>() {
    let _seed = get_or_init_random_seed::<S>();
    test_impl::<S>(patterns::pipe_organ);
}

pub fn descending_reverses_ascending<S: Sort>() {
    let _seed = get_or_init_random_seed::<S>();
    let instance = <S as Sort>::instance();

    for test_size in TEST_SIZES {
        // Distinct keys, `id` is the input position.
        let orig = patterns::records(test_size);

        let mut up = orig.clone();
        instance.sort_ascending(&mut up, "id").unwrap();
        let mut down = orig.clone();
        instance.sort_descending(&mut down, "id").unwrap();

        down.reverse();
        assert_same(&orig, &up, &down);
        // Ascending by position restores the input.
        assert_same(&orig, &orig, &up);
    }
}

pub fn idempotent<S: Sort>() {
    let _seed = get_or_init_random_seed::<S>();
    let instance = <S as Sort>::instance();

    let specs: Vec<fn() -> SortBy<Value>> = vec![
        || KeyDescriptor::Absent,
        || "group".into(),
        || vec!["group", "rank"].into(),
        || vec![desc::<Value>("group"), asc("name")].into(),
        || key(|v: &Value| field(v, "rank")),
    ];

    for spec in specs {
        for test_size in TEST_SIZES {
            let mut once = patterns::records(test_size);
            instance.sort_by(&mut once, spec()).unwrap();

            let mut twice = once.clone();
            instance.sort_by(&mut twice, spec()).unwrap();
            assert_same(&once, &once, &twice);

            instance.sort_descending(&mut once, spec()).unwrap();
            let mut twice = once.clone();
            instance.sort_descending(&mut twice, spec()).unwrap();
            assert_same(&once, &once, &twice);
        }
    }
}

pub fn stability<S: Sort>() {
    let _seed = get_or_init_random_seed::<S>();
    let instance = <S as Sort>::instance();

    let large_range = if cfg!(miri) { 100..110 } else { 1000..1010 };
    let rounds = if cfg!(miri) { 1 } else { 10 };

    let rand_vals = patterns::random_uniform(5_000, 0..=9);
    let mut rand_idx = 0;

    for len in (2..55).chain(large_range) {
        for _ in 0..rounds {
            let mut counts = [0; 10];

            // create records like [{n: 6, seq: 1}, {n: 5, seq: 1}, {n: 6, seq: 2}, ...], where `n`
            // is random and `seq` counts which occurrence of that number this element is, i.e.,
            // `seq` will occur in sorted order.
            let orig: Vec<Value> = (0..len)
                .map(|_| {
                    let n = rand_vals[rand_idx];
                    rand_idx += 1;
                    if rand_idx >= rand_vals.len() {
                        rand_idx = 0;
                    }

                    counts[n as usize] += 1;
                    Value::object([("n", n), ("seq", counts[n as usize])])
                })
                .collect();

            // Only sort on `n`, so an unstable sort may mix up the counts.
            let mut v = orig.clone();
            instance.sort_ascending(&mut v, "n").unwrap();

            assert!(v.windows(2).all(|w| {
                (field(&w[0], "n"), field(&w[0], "seq")) <= (field(&w[1], "n"), field(&w[1], "seq"))
            }));

            // Descending keeps equal keys in input order too.
            let mut v = orig.clone();
            instance.sort_descending(&mut v, "n").unwrap();

            assert!(v.windows(2).all(|w| {
                let (n0, n1) = (field(&w[0], "n"), field(&w[1], "n"));
                n0 > n1 || (n0 == n1 && field(&w[0], "seq") < field(&w[1], "seq"))
            }));
        }
    }
}

pub fn multi_key_lexicographic<S: Sort>() {
    let _seed = get_or_init_random_seed::<S>();
    let instance = <S as Sort>::instance();

    let test_fn = |test_size: usize, pattern_fn: fn(usize) -> Vec<i32>| {
        let firsts = pattern_fn(test_size);
        let seconds = patterns::random_uniform(test_size, 0..=3);
        let orig: Vec<Value> = firsts
            .iter()
            .zip(&seconds)
            .map(|(&k1, &k2)| Value::object([("k1", k1 % 5), ("k2", k2)]))
            .collect();

        let mut v = orig.clone();
        instance
            .sort_by(&mut v, vec![asc::<Value>("k1"), desc("k2")])
            .unwrap();

        let mut expected = orig.clone();
        expected.sort_by(|a, b| {
            field(a, "k1")
                .cmp(&field(b, "k1"))
                .then_with(|| field(b, "k2").cmp(&field(a, "k2")))
        });

        assert_same(&orig, &expected, &v);
    };

    test_impl_custom(test_fn);
}

pub fn null_placement<S: Sort>() {
    let _seed = get_or_init_random_seed::<S>();
    let instance = <S as Sort>::instance();

    for test_size in TEST_SIZES {
        let orig = patterns::random_with_nulls(test_size, 20, 30);
        let null_count = orig.iter().filter(|v| v.is_null_like()).count();

        for descending in [false, true] {
            let mut v = orig.clone();
            if descending {
                instance.sort_descending(&mut v, ()).unwrap();
            } else {
                instance.sort_ascending(&mut v, ()).unwrap();
            }

            let (values, nulls) = v.split_at(test_size - null_count);
            assert!(values.iter().all(|v| !v.is_null_like()));
            assert!(nulls.iter().all(Value::is_null_like));

            // Null-likes tie, so they keep their input order.
            let orig_nulls: Vec<&Value> = orig.iter().filter(|v| v.is_null_like()).collect();
            assert!(nulls.iter().eq(orig_nulls));

            let ord = if descending {
                Ordering::Greater
            } else {
                Ordering::Less
            };
            assert!(values.windows(2).all(|w| w[0].cmp(&w[1]) != ord.reverse()));
        }
    }
}

pub fn object_form_matches_direction<S: Sort>() {
    let _seed = get_or_init_random_seed::<S>();
    let instance = <S as Sort>::instance();

    for test_size in TEST_SIZES {
        let orig = patterns::records(test_size);

        let mut by = orig.clone();
        instance.sort_by(&mut by, desc("rank")).unwrap();
        let mut plain = orig.clone();
        instance.sort_descending(&mut plain, "rank").unwrap();
        assert_same(&orig, &plain, &by);

        // A top-level object-form overrides the call's direction.
        let mut overridden = orig.clone();
        instance
            .sort_ascending(&mut overridden, desc("rank"))
            .unwrap();
        assert_same(&orig, &plain, &overridden);
    }
}

pub fn fallthrough_uses_outer_direction<S: Sort>() {
    let _seed = get_or_init_random_seed::<S>();
    let instance = <S as Sort>::instance();

    for test_size in TEST_SIZES {
        let orig = patterns::records(test_size);

        let mut v = orig.clone();
        instance
            .sort_descending(
                &mut v,
                vec![asc::<Value>("group").into(), KeyDescriptor::from("rank")],
            )
            .unwrap();

        let mut expected = orig.clone();
        expected.sort_by(|a, b| {
            field(a, "group")
                .cmp(&field(b, "group"))
                .then_with(|| field(b, "rank").cmp(&field(a, "rank")))
        });

        assert_same(&orig, &expected, &v);
    }
}

pub fn missing_property_sorts_last<S: Sort>() {
    let _seed = get_or_init_random_seed::<S>();
    let instance = <S as Sort>::instance();

    for test_size in TEST_SIZES {
        let orig = patterns::records(test_size);
        let missing = orig.iter().filter(|v| v.get("name").is_none()).count();

        for spec in [desc::<Value>("name"), asc("name")] {
            let mut v = orig.clone();
            instance.sort_by(&mut v, spec).unwrap();

            assert!(v[test_size - missing..]
                .iter()
                .all(|r| r.get("name").is_none()));
        }
    }
}

pub fn extractor_error<S: Sort>() {
    let _seed = get_or_init_random_seed::<S>();
    let instance = <S as Sort>::instance();

    let failing = || {
        try_key(|v: &Value| match v.get("rank") {
            Some(Value::Number(n)) if n.as_f64() == 7.0 => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "rank 7 is not allowed",
            )),
            Some(other) => Ok(other.clone()),
            None => Ok(Value::Undefined),
        })
    };

    for test_size in TEST_SIZES {
        let orig = patterns::records(test_size);
        let has_seven = orig.iter().any(|v| field(v, "rank") == Value::from(7));

        let mut v = orig.clone();
        let res = instance
            .sort_ascending(&mut v, vec![KeyDescriptor::from("group"), failing()])
            .map(|_| ());

        match res {
            Err(SortError::Extractor(err)) => {
                assert!(has_seven);
                assert_eq!(err.to_string(), "rank 7 is not allowed");
            }
            Ok(_) => {
                // The extractor may never run on the bad record if `group` decides every
                // comparison involving it.
                let mut expected = orig.clone();
                expected.sort_by(|a, b| {
                    field(a, "group")
                        .cmp(&field(b, "group"))
                        .then_with(|| field(a, "rank").cmp(&field(b, "rank")))
                });
                assert_same(&orig, &expected, &v);
            }
            Err(other) => panic!("unexpected error {other:?}"),
        }

        // The same multiset of records survives either way.
        let mut survivors = v.clone();
        survivors.sort();
        let mut all = orig.clone();
        all.sort();
        assert_same(&orig, &all, &survivors);
    }
}

pub fn invalid_config<S: Sort>() {
    let _seed = get_or_init_random_seed::<S>();
    let instance = <S as Sort>::instance();

    let specs: Vec<fn() -> SortBy<Value>> = vec![
        || ObjectForm::<Value>::empty().into(),
        || asc::<Value>(()).into(),
        || desc::<Value>(false).into(),
        || SortBy::from(vec![KeyDescriptor::<Value>::from("id"), asc(false).into()]),
        || vec![asc::<Value>("group"), desc(ObjectForm::<Value>::empty())].into(),
    ];

    for spec in specs {
        for test_size in [0, 1, 2, 50] {
            let orig = patterns::records(test_size);
            let mut v = orig.clone();

            let res = instance.sort_by(&mut v, spec());
            assert!(matches!(res, Err(SortError::InvalidSortConfig)));
            // Rejected before anything was compared.
            assert_same(&orig, &orig, &v);
        }
    }
}

pub fn value_passthrough<S: Sort>() {
    let _seed = get_or_init_random_seed::<S>();
    let instance = <S as Sort>::instance();

    for not_a_list in [
        Value::Undefined,
        Value::Null,
        Value::from(3),
        Value::from("abc"),
        Value::object([("a", 1)]),
    ] {
        let mut target = not_a_list.clone();
        instance
            .sort_value(&mut target, multisort::Direction::Descending, ())
            .unwrap();
        assert_eq!(target, not_a_list);
    }

    let orig = patterns::random(100);
    let mut target = Value::from(as_values(&orig));
    instance
        .sort_value(&mut target, multisort::Direction::Ascending, ())
        .unwrap();

    let mut expected = orig.clone();
    expected.sort();
    assert_eq!(target, Value::from(as_values(&expected)));
}

#[macro_export]
macro_rules! instantiate_sort_test_impl_inner {
    ($prefix:ident, $sort_impl:ty, miri_yes, $sort_name:ident) => {
        $crate::paste::paste! {
            #[test]
            fn [<$prefix _ $sort_name>]() {
                sort_test_tools::tests::$sort_name::<$sort_impl>();
            }
        }
    };
    ($prefix:ident, $sort_impl:ty, miri_no, $sort_name:ident) => {
        $crate::paste::paste! {
            #[test]
            #[cfg(not(miri))]
            fn [<$prefix _ $sort_name>]() {
                sort_test_tools::tests::$sort_name::<$sort_impl>();
            }

            #[test]
            #[cfg(miri)]
            #[ignore]
            fn [<$prefix _ $sort_name>]() {}
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! instantiate_sort_test_impl {
    ($prefix:ident, $sort_impl:ty, $([$miri_use:ident, $sort_name:ident]),*) => {
        $(
            sort_test_tools::instantiate_sort_test_impl_inner!($prefix, $sort_impl, $miri_use, $sort_name);
        )*
    };
}

#[macro_export]
macro_rules! instantiate_sort_tests {
    ($prefix:ident, $sort_impl:ty) => {
        sort_test_tools::instantiate_sort_test_impl!(
            $prefix,
            $sort_impl,
            [miri_no, all_equal],
            [miri_yes, ascending],
            [miri_yes, basic],
            [miri_yes, descending],
            [miri_yes, descending_reverses_ascending],
            [miri_yes, extractor_error],
            [miri_yes, fallthrough_uses_outer_direction],
            [miri_no, idempotent],
            [miri_yes, invalid_config],
            [miri_yes, missing_property_sorts_last],
            [miri_no, multi_key_lexicographic],
            [miri_yes, null_placement],
            [miri_yes, object_form_matches_direction],
            [miri_yes, pipe_organ],
            [miri_yes, random],
            [miri_no, random_narrow],
            [miri_yes, saw_mixed],
            [miri_no, stability],
            [miri_yes, value_passthrough]
        );
    };
}
