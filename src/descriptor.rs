//! Sort specifications.
//!
//! A [`KeyDescriptor`] says how to derive the comparison key from a candidate. The top-level
//! specification handed to a sort call is a [`SortBy`], which is the same type: any descriptor
//! can be used on its own, inside a list, or wrapped in an [`ObjectForm`] that carries its own
//! direction and comparer.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::comparer::CompareFn;
use crate::direction::Direction;
use crate::error::{BoxError, ExtractorError};
use crate::value::Value;

pub type ExtractFn<T> = Arc<dyn Fn(&T) -> Result<Value, ExtractorError> + Send + Sync>;

pub enum KeyDescriptor<T> {
    /// No descriptor, compare whole candidates.
    Absent,
    /// The literal `true` sentinel, compare whole candidates.
    WholeValue,
    Property(String),
    Extractor(ExtractFn<T>),
    List(Vec<KeyDescriptor<T>>),
    Directed(Box<ObjectForm<T>>),
}

pub type SortBy<T> = KeyDescriptor<T>;

impl<T> KeyDescriptor<T> {
    /// Whether the descriptor counts as set under `asc` / `desc`.
    pub fn is_present(&self) -> bool {
        match self {
            KeyDescriptor::Absent => false,
            KeyDescriptor::Property(name) => !name.is_empty(),
            _ => true,
        }
    }

    fn shape(&self) -> &'static str {
        match self {
            KeyDescriptor::Absent => "absent",
            KeyDescriptor::WholeValue => "whole-value",
            KeyDescriptor::Property(_) => "property",
            KeyDescriptor::Extractor(_) => "extractor",
            KeyDescriptor::List(_) => "list",
            KeyDescriptor::Directed(_) => "object-form",
        }
    }
}

// Manual impl, derive would require `T: Clone`.
impl<T> Clone for KeyDescriptor<T> {
    fn clone(&self) -> Self {
        match self {
            KeyDescriptor::Absent => KeyDescriptor::Absent,
            KeyDescriptor::WholeValue => KeyDescriptor::WholeValue,
            KeyDescriptor::Property(name) => KeyDescriptor::Property(name.clone()),
            KeyDescriptor::Extractor(f) => KeyDescriptor::Extractor(Arc::clone(f)),
            KeyDescriptor::List(items) => KeyDescriptor::List(items.clone()),
            KeyDescriptor::Directed(form) => KeyDescriptor::Directed(form.clone()),
        }
    }
}

impl<T> fmt::Debug for KeyDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyDescriptor::Property(name) => f.debug_tuple("Property").field(name).finish(),
            KeyDescriptor::List(items) => f.debug_tuple("List").field(items).finish(),
            KeyDescriptor::Directed(form) => f.debug_tuple("Directed").field(form).finish(),
            other => f.write_str(other.shape()),
        }
    }
}

impl<T> Default for KeyDescriptor<T> {
    fn default() -> Self {
        KeyDescriptor::Absent
    }
}

impl<T> From<()> for KeyDescriptor<T> {
    fn from(_: ()) -> Self {
        KeyDescriptor::Absent
    }
}

/// `true` compares whole candidates, `false` counts as absent.
impl<T> From<bool> for KeyDescriptor<T> {
    fn from(v: bool) -> Self {
        if v {
            KeyDescriptor::WholeValue
        } else {
            KeyDescriptor::Absent
        }
    }
}

impl<T> From<&str> for KeyDescriptor<T> {
    fn from(name: &str) -> Self {
        KeyDescriptor::Property(name.to_owned())
    }
}

impl<T> From<String> for KeyDescriptor<T> {
    fn from(name: String) -> Self {
        KeyDescriptor::Property(name)
    }
}

impl<T, K: Into<KeyDescriptor<T>>> From<Option<K>> for KeyDescriptor<T> {
    fn from(v: Option<K>) -> Self {
        v.map_or(KeyDescriptor::Absent, Into::into)
    }
}

impl<T, K: Into<KeyDescriptor<T>>> From<Vec<K>> for KeyDescriptor<T> {
    fn from(items: Vec<K>) -> Self {
        KeyDescriptor::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T, K: Into<KeyDescriptor<T>>, const N: usize> From<[K; N]> for KeyDescriptor<T> {
    fn from(items: [K; N]) -> Self {
        KeyDescriptor::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T> From<ObjectForm<T>> for KeyDescriptor<T> {
    fn from(form: ObjectForm<T>) -> Self {
        KeyDescriptor::Directed(Box::new(form))
    }
}

/// Descriptor that carries its own direction and optional comparer.
///
/// At least one of `asc` / `desc` has to be present, `asc` wins if both are.
pub struct ObjectForm<T> {
    pub asc: Option<KeyDescriptor<T>>,
    pub desc: Option<KeyDescriptor<T>>,
    /// Always order handled, see [`crate::comparer::Comparer`].
    pub comparer: Option<CompareFn>,
}

impl<T> ObjectForm<T> {
    pub fn new(direction: Direction, key: impl Into<KeyDescriptor<T>>) -> Self {
        let key = Some(key.into());
        let (asc, desc) = match direction {
            Direction::Ascending => (key, None),
            Direction::Descending => (None, key),
        };

        ObjectForm {
            asc,
            desc,
            comparer: None,
        }
    }

    /// Neither direction set. Only useful to build a form field by field.
    pub fn empty() -> Self {
        ObjectForm {
            asc: None,
            desc: None,
            comparer: None,
        }
    }

    pub fn with_comparer<F>(mut self, comparer: F) -> Self
    where
        F: Fn(&Value, &Value, Direction) -> Ordering + Send + Sync + 'static,
    {
        let comparer: CompareFn = Arc::new(comparer);
        self.comparer = Some(comparer);
        self
    }
}

impl<T> Clone for ObjectForm<T> {
    fn clone(&self) -> Self {
        ObjectForm {
            asc: self.asc.clone(),
            desc: self.desc.clone(),
            comparer: self.comparer.clone(),
        }
    }
}

impl<T> fmt::Debug for ObjectForm<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectForm")
            .field("asc", &self.asc)
            .field("desc", &self.desc)
            .field("comparer", &self.comparer.is_some())
            .finish()
    }
}

/// `{ asc: key }`
pub fn asc<T>(key: impl Into<KeyDescriptor<T>>) -> ObjectForm<T> {
    ObjectForm::new(Direction::Ascending, key)
}

/// `{ desc: key }`
pub fn desc<T>(key: impl Into<KeyDescriptor<T>>) -> ObjectForm<T> {
    ObjectForm::new(Direction::Descending, key)
}

/// Extractor descriptor from an infallible closure.
pub fn key<T, V, F>(f: F) -> KeyDescriptor<T>
where
    V: Into<Value>,
    F: Fn(&T) -> V + Send + Sync + 'static,
{
    KeyDescriptor::Extractor(Arc::new(
        move |candidate: &T| -> Result<Value, ExtractorError> { Ok(f(candidate).into()) },
    ))
}

/// Extractor descriptor from a fallible closure. Errors abort the sort with
/// [`crate::SortError::Extractor`].
pub fn try_key<T, V, E, F>(f: F) -> KeyDescriptor<T>
where
    V: Into<Value>,
    E: Into<BoxError>,
    F: Fn(&T) -> Result<V, E> + Send + Sync + 'static,
{
    KeyDescriptor::Extractor(Arc::new(move |candidate: &T| -> Result<Value, ExtractorError> {
        f(candidate).map(Into::into).map_err(ExtractorError::new)
    }))
}
