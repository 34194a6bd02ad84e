//! Lexicographic comparison over a list of key descriptors.

use std::cmp::Ordering;

use crate::comparer::Comparer;
use crate::descriptor::KeyDescriptor;
use crate::direction::Direction;
use crate::error::SortError;
use crate::extract::extract;
use crate::unpack::unpack;
use crate::value::{Record, Value};

struct KeyComparison {
    ordering: Ordering,
    both_null_like: bool,
}

/// Compares `a` and `b` on `keys[depth]`, falling through to the next descriptor on a tie.
///
/// Both keys being null-like also falls through, whatever the comparer said. Falling through
/// always uses `direction` and `comparer`, a per-key override from an object-form only applies
/// to the descriptor that carries it. The last descriptor decides whatever it returns.
pub fn resolve_multi<T: Record>(
    keys: &[KeyDescriptor<T>],
    depth: usize,
    direction: Direction,
    comparer: &Comparer,
    a: &T,
    b: &T,
) -> Result<Ordering, SortError> {
    let Some(current) = keys.get(depth) else {
        return Ok(Ordering::Equal);
    };

    let cmp = compare_on(current, direction, comparer, a, b)?;
    if keys.len() > depth + 1 && (cmp.ordering == Ordering::Equal || cmp.both_null_like) {
        return resolve_multi(keys, depth + 1, direction, comparer, a, b);
    }

    Ok(cmp.ordering)
}

fn compare_on<T: Record>(
    descriptor: &KeyDescriptor<T>,
    direction: Direction,
    comparer: &Comparer,
    a: &T,
    b: &T,
) -> Result<KeyComparison, SortError> {
    match descriptor {
        KeyDescriptor::Directed(form) => {
            let unpacked = unpack(form)?;
            let comparer = unpacked.comparer.as_ref().unwrap_or(comparer);
            compare_on(unpacked.key, unpacked.direction, comparer, a, b)
        }
        KeyDescriptor::List(nested) => match nested.as_slice() {
            [] => Ok(compare_keys(&a.key(), &b.key(), direction, comparer)),
            [only] => compare_on(only, direction, comparer, a, b),
            _ => Ok(KeyComparison {
                ordering: resolve_multi(nested, 0, direction, comparer, a, b)?,
                both_null_like: false,
            }),
        },
        leaf => {
            let key_a = extract(leaf, a)?;
            let key_b = extract(leaf, b)?;
            Ok(compare_keys(&key_a, &key_b, direction, comparer))
        }
    }
}

fn compare_keys(a: &Value, b: &Value, direction: Direction, comparer: &Comparer) -> KeyComparison {
    KeyComparison {
        ordering: comparer.compare(a, b, direction),
        both_null_like: a.is_null_like() && b.is_null_like(),
    }
}
