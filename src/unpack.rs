use crate::comparer::Comparer;
use crate::descriptor::{KeyDescriptor, ObjectForm};
use crate::direction::Direction;
use crate::error::SortError;

/// Canonical view of an [`ObjectForm`].
#[derive(Debug)]
pub struct Unpacked<'a, T> {
    pub direction: Direction,
    pub key: &'a KeyDescriptor<T>,
    /// The form's own comparer, already order handled.
    pub comparer: Option<Comparer>,
}

/// Resolves direction, key and comparer of an object-form descriptor.
///
/// Fails with [`SortError::InvalidSortConfig`] if neither `asc` nor `desc` holds a present key.
pub fn unpack<T>(form: &ObjectForm<T>) -> Result<Unpacked<'_, T>, SortError> {
    let (direction, key) = match (&form.asc, &form.desc) {
        (Some(key), _) if key.is_present() => (Direction::Ascending, key),
        (_, Some(key)) if key.is_present() => (Direction::Descending, key),
        _ => return Err(SortError::InvalidSortConfig),
    };

    Ok(Unpacked {
        direction,
        key,
        comparer: form.comparer.clone().map(Comparer::order_handled),
    })
}
