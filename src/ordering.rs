//! Turns a sort specification into the two-argument ordering handed to the stable sort.

use std::cmp::Ordering;
use std::fmt;

use crate::comparer::Comparer;
use crate::descriptor::{KeyDescriptor, SortBy};
use crate::direction::Direction;
use crate::error::SortError;
use crate::extract::extract;
use crate::multi_key::resolve_multi;
use crate::stable::StableSort;
use crate::unpack::unpack;
use crate::value::{Record, Value};

/// Built ordering, borrowing the descriptors it was built from.
pub enum OrderingFunction<'a, T> {
    WholeValue {
        direction: Direction,
        comparer: Comparer,
    },
    Key {
        key: &'a KeyDescriptor<T>,
        direction: Direction,
        comparer: Comparer,
    },
    MultiKey {
        keys: &'a [KeyDescriptor<T>],
        direction: Direction,
        comparer: Comparer,
    },
}

impl<'a, T: Record> OrderingFunction<'a, T> {
    pub fn compare(&self, a: &T, b: &T) -> Result<Ordering, SortError> {
        match self {
            OrderingFunction::WholeValue {
                direction,
                comparer,
            } => Ok(comparer.compare(&a.key(), &b.key(), *direction)),
            OrderingFunction::Key {
                key,
                direction,
                comparer,
            } => {
                let key_a = extract(key, a)?;
                let key_b = extract(key, b)?;
                Ok(comparer.compare(&key_a, &key_b, *direction))
            }
            OrderingFunction::MultiKey {
                keys,
                direction,
                comparer,
            } => resolve_multi(keys, 0, *direction, comparer, a, b),
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            OrderingFunction::WholeValue { direction, .. }
            | OrderingFunction::Key { direction, .. }
            | OrderingFunction::MultiKey { direction, .. } => *direction,
        }
    }
}

impl<T> fmt::Debug for OrderingFunction<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderingFunction::WholeValue {
                direction,
                comparer,
            } => f
                .debug_struct("WholeValue")
                .field("direction", direction)
                .field("comparer", comparer)
                .finish(),
            OrderingFunction::Key {
                key,
                direction,
                comparer,
            } => f
                .debug_struct("Key")
                .field("key", key)
                .field("direction", direction)
                .field("comparer", comparer)
                .finish(),
            OrderingFunction::MultiKey {
                keys,
                direction,
                comparer,
            } => f
                .debug_struct("MultiKey")
                .field("keys", keys)
                .field("direction", direction)
                .field("comparer", comparer)
                .finish(),
        }
    }
}

/// Builds the ordering for `spec`.
///
/// Single element lists are unwrapped and a top-level object-form replaces `direction` and, if
/// it has one, `comparer`. Object-forms nested in lists are checked here too, so a malformed
/// specification fails before anything is compared.
pub fn build<'a, T>(
    direction: Direction,
    spec: &'a SortBy<T>,
    comparer: Comparer,
) -> Result<OrderingFunction<'a, T>, SortError> {
    let ordering = match spec {
        KeyDescriptor::Absent | KeyDescriptor::WholeValue => OrderingFunction::WholeValue {
            direction,
            comparer,
        },
        KeyDescriptor::Property(_) | KeyDescriptor::Extractor(_) => OrderingFunction::Key {
            key: spec,
            direction,
            comparer,
        },
        KeyDescriptor::List(keys) => match keys.as_slice() {
            [] => OrderingFunction::WholeValue {
                direction,
                comparer,
            },
            [only] => return build(direction, only, comparer),
            _ => {
                keys.iter().try_for_each(validate)?;
                OrderingFunction::MultiKey {
                    keys,
                    direction,
                    comparer,
                }
            }
        },
        KeyDescriptor::Directed(form) => {
            let unpacked = unpack(form)?;
            let comparer = unpacked.comparer.unwrap_or(comparer);
            return build(unpacked.direction, unpacked.key, comparer);
        }
    };

    log::trace!("built ordering {ordering:?}");
    Ok(ordering)
}

fn validate<T>(descriptor: &KeyDescriptor<T>) -> Result<(), SortError> {
    match descriptor {
        KeyDescriptor::Directed(form) => validate(unpack(form)?.key),
        KeyDescriptor::List(keys) => keys.iter().try_for_each(validate),
        _ => Ok(()),
    }
}

/// Sorts `v` in place with the stable sort `S`.
///
/// The first error raised while comparing stops all further comparisons from doing work and is
/// returned once `S` is done. `v` is left in an unspecified order in that case.
pub fn sort<'s, S, T>(
    v: &'s mut [T],
    direction: Direction,
    spec: &SortBy<T>,
    comparer: Comparer,
) -> Result<&'s mut [T], SortError>
where
    S: StableSort,
    T: Record,
{
    let ordering = build(direction, spec, comparer)?;

    let mut failure: Option<SortError> = None;
    S::sort_by(v, |a, b| {
        if failure.is_some() {
            return Ordering::Equal;
        }

        ordering.compare(a, b).unwrap_or_else(|err| {
            log::debug!("aborting {} sort: {err}", S::name());
            failure = Some(err);
            Ordering::Equal
        })
    });

    match failure {
        Some(err) => Err(err),
        None => Ok(v),
    }
}

/// Like [`sort`], for a dynamic value. Anything but a list is returned untouched.
pub fn sort_value<S: StableSort>(
    target: &mut Value,
    direction: Direction,
    spec: &SortBy<Value>,
    comparer: Comparer,
) -> Result<(), SortError> {
    match target.as_list_mut() {
        Some(items) => sort::<S, Value>(items, direction, spec, comparer).map(|_| ()),
        None => {
            log::trace!("not a list, leaving {target:?} as is");
            Ok(())
        }
    }
}
