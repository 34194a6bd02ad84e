use std::borrow::Cow;

use crate::descriptor::KeyDescriptor;
use crate::error::SortError;
use crate::value::{Record, Value};

/// Derives the comparison key of `candidate` for a leaf descriptor.
///
/// Lists and object-forms are routed elsewhere before reaching this point; should one slip
/// through it degrades to the whole candidate.
pub fn extract<'a, T: Record>(
    descriptor: &KeyDescriptor<T>,
    candidate: &'a T,
) -> Result<Cow<'a, Value>, SortError> {
    match descriptor {
        KeyDescriptor::Property(name) => Ok(candidate.property(name)),
        KeyDescriptor::Extractor(f) => Ok(Cow::Owned(f(candidate)?)),
        KeyDescriptor::Absent | KeyDescriptor::WholeValue => Ok(candidate.key()),
        KeyDescriptor::List(_) | KeyDescriptor::Directed(_) => {
            log::trace!("extract called with {descriptor:?}, using whole value");
            Ok(candidate.key())
        }
    }
}
