//! Sort instances and the ready-made default one.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::comparer::{CompareFn, Comparer};
use crate::descriptor::SortBy;
use crate::direction::Direction;
use crate::error::SortError;
use crate::ordering;
use crate::stable::{RustStdStable, StableSort};
use crate::value::{Record, Value};

/// Options for [`create_instance`].
#[derive(Clone, Default)]
pub struct SortOptions {
    /// Replaces the default comparer.
    pub comparer: Option<CompareFn>,
    /// Hand `comparer` the direction but don't multiply its result by it. The comparer has to
    /// apply the direction itself.
    pub prevent_default_order_handling: bool,
}

impl SortOptions {
    pub fn new() -> Self {
        SortOptions::default()
    }

    pub fn comparer<F>(mut self, comparer: F) -> Self
    where
        F: Fn(&Value, &Value, Direction) -> Ordering + Send + Sync + 'static,
    {
        let comparer: CompareFn = Arc::new(comparer);
        self.comparer = Some(comparer);
        self
    }

    pub fn prevent_default_order_handling(mut self, prevent: bool) -> Self {
        self.prevent_default_order_handling = prevent;
        self
    }
}

impl fmt::Debug for SortOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortOptions")
            .field("comparer", &self.comparer.is_some())
            .field(
                "prevent_default_order_handling",
                &self.prevent_default_order_handling,
            )
            .finish()
    }
}

/// A configured comparer bound to a stable sort primitive.
///
/// Every call sorts the given slice in place and returns it.
pub struct SortInstance<S = RustStdStable> {
    comparer: Comparer,
    _primitive: PhantomData<fn() -> S>,
}

impl<S: StableSort> SortInstance<S> {
    pub fn new(options: SortOptions) -> Self {
        let comparer = match options.comparer {
            None => Comparer::base(),
            Some(func) if options.prevent_default_order_handling => Comparer::raw(func),
            Some(func) => Comparer::order_handled(func),
        };

        SortInstance {
            comparer,
            _primitive: PhantomData,
        }
    }

    pub fn comparer(&self) -> &Comparer {
        &self.comparer
    }

    /// Ascending order. `spec` defaults to whole-value comparison when `()` is passed.
    pub fn sort_ascending<'s, T: Record>(
        &self,
        v: &'s mut [T],
        spec: impl Into<SortBy<T>>,
    ) -> Result<&'s mut [T], SortError> {
        self.sort_in(v, Direction::Ascending, spec)
    }

    pub fn sort_descending<'s, T: Record>(
        &self,
        v: &'s mut [T],
        spec: impl Into<SortBy<T>>,
    ) -> Result<&'s mut [T], SortError> {
        self.sort_in(v, Direction::Descending, spec)
    }

    /// Direction comes from `spec`, usually an object-form or a list of them. Anything without
    /// its own direction sorts ascending.
    pub fn sort_by<'s, T: Record>(
        &self,
        v: &'s mut [T],
        spec: impl Into<SortBy<T>>,
    ) -> Result<&'s mut [T], SortError> {
        self.sort_in(v, Direction::Ascending, spec)
    }

    /// Sorts `target` if it is a [`Value::List`], anything else is left as is.
    pub fn sort_value(
        &self,
        target: &mut Value,
        direction: Direction,
        spec: impl Into<SortBy<Value>>,
    ) -> Result<(), SortError> {
        ordering::sort_value::<S>(target, direction, &spec.into(), self.comparer.clone())
    }

    fn sort_in<'s, T: Record>(
        &self,
        v: &'s mut [T],
        direction: Direction,
        spec: impl Into<SortBy<T>>,
    ) -> Result<&'s mut [T], SortError> {
        ordering::sort::<S, T>(v, direction, &spec.into(), self.comparer.clone())
    }
}

impl<S: StableSort> Default for SortInstance<S> {
    fn default() -> Self {
        SortInstance::new(SortOptions::default())
    }
}

impl<S> Clone for SortInstance<S> {
    fn clone(&self) -> Self {
        SortInstance {
            comparer: self.comparer.clone(),
            _primitive: PhantomData,
        }
    }
}

impl<S: StableSort> fmt::Debug for SortInstance<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortInstance")
            .field("comparer", &self.comparer)
            .field("primitive", &S::name())
            .finish()
    }
}

pub fn create_instance(options: SortOptions) -> SortInstance {
    SortInstance::new(options)
}

/// Instance using the default comparer and the std stable sort.
pub static DEFAULT: Lazy<SortInstance> = Lazy::new(SortInstance::default);

pub fn sort_ascending<T: Record>(
    v: &mut [T],
    spec: impl Into<SortBy<T>>,
) -> Result<&mut [T], SortError> {
    DEFAULT.sort_ascending(v, spec)
}

pub fn sort_descending<T: Record>(
    v: &mut [T],
    spec: impl Into<SortBy<T>>,
) -> Result<&mut [T], SortError> {
    DEFAULT.sort_descending(v, spec)
}

pub fn sort_by<T: Record>(v: &mut [T], spec: impl Into<SortBy<T>>) -> Result<&mut [T], SortError> {
    DEFAULT.sort_by(v, spec)
}
