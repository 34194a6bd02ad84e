use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::direction::Direction;
use crate::value::Value;

/// Three-argument comparison, `(a, b, direction) -> ordering`.
pub type CompareFn = Arc<dyn Fn(&Value, &Value, Direction) -> Ordering + Send + Sync>;

/// Default comparer.
///
/// Null-like values always sort after everything else and tie with each other, the direction only
/// applies to two non-null-like values.
pub fn base_compare(a: &Value, b: &Value, direction: Direction) -> Ordering {
    match (a.is_null_like(), b.is_null_like()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => direction.apply(a.compare(b)),
    }
}

/// A comparer together with how it composes with the direction.
///
/// An order handled comparer gets the direction and its result is multiplied by it once more, so
/// a direction-agnostic function sorts correctly both ways. A raw comparer is responsible for
/// applying the direction itself.
#[derive(Clone)]
pub struct Comparer {
    func: CompareFn,
    order_handled: bool,
}

impl Comparer {
    pub fn base() -> Self {
        Comparer::raw(Arc::new(base_compare))
    }

    pub fn raw(func: CompareFn) -> Self {
        Comparer {
            func,
            order_handled: false,
        }
    }

    pub fn order_handled(func: CompareFn) -> Self {
        Comparer {
            func,
            order_handled: true,
        }
    }

    pub fn is_order_handled(&self) -> bool {
        self.order_handled
    }

    #[inline]
    pub fn compare(&self, a: &Value, b: &Value, direction: Direction) -> Ordering {
        let ord = (self.func)(a, b, direction);
        if self.order_handled {
            direction.apply(ord)
        } else {
            ord
        }
    }
}

impl Default for Comparer {
    fn default() -> Self {
        Comparer::base()
    }
}

impl fmt::Debug for Comparer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparer")
            .field("order_handled", &self.order_handled)
            .finish_non_exhaustive()
    }
}
