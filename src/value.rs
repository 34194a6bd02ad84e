//! Dynamic comparison keys.
//!
//! Every key handed to a comparer is a [`Value`]. Candidates expose their keys through the
//! [`Record`] trait, either as a whole or by property name.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Arc;

/// Numeric key. Integers compare exactly with each other, anything involving a float compares as
/// `f64`.
#[derive(Copy, Clone, Debug)]
pub enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(v) => v as f64,
            Number::UInt(v) => v as f64,
            Number::Float(v) => v,
        }
    }

    pub fn is_nan(self) -> bool {
        matches!(self, Number::Float(v) if v.is_nan())
    }

    /// Total order over numbers. NaN sorts after every other number and equals itself.
    pub fn compare(self, other: Number) -> Ordering {
        match (self.as_i128(), other.as_i128()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(a), None) => compare_int_float(a, other.as_f64()),
            (None, Some(b)) => compare_int_float(b, self.as_f64()).reverse(),
            (None, None) => compare_floats(self.as_f64(), other.as_f64()),
        }
    }

    fn as_i128(self) -> Option<i128> {
        match self {
            Number::Int(v) => Some(v as i128),
            Number::UInt(v) => Some(v as i128),
            Number::Float(_) => None,
        }
    }
}

fn compare_floats(a: f64, b: f64) -> Ordering {
    match a.partial_cmp(&b) {
        Some(ord) => ord,
        None => a.is_nan().cmp(&b.is_nan()),
    }
}

// Exact, an `f64` round trip would lose integers above 2^53.
fn compare_int_float(a: i128, b: f64) -> Ordering {
    // 2^127, rounded up from `i128::MAX`.
    const BOUND: f64 = i128::MAX as f64;

    if b.is_nan() || b >= BOUND {
        return Ordering::Less;
    }
    if b < -BOUND {
        return Ordering::Greater;
    }

    // `trunc` is integral and within `i128`, the cast is exact.
    match a.cmp(&(b.trunc() as i128)) {
        Ordering::Equal if b.fract() > 0.0 => Ordering::Less,
        Ordering::Equal if b.fract() < 0.0 => Ordering::Greater,
        ord => ord,
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.compare(*other) == Ordering::Equal
    }
}

impl Eq for Number {}

/// A comparison key.
///
/// `Undefined` and `Null` are the null-like markers. `Undefined` is what a missing property
/// resolves to.
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// Builds an object from `(name, value)` pairs.
    pub fn object<K, V, I>(entries: I) -> Value
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn is_null_like(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(name),
            Value::List(items) => name.parse::<usize>().ok().and_then(|idx| items.get(idx)),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    // Mixed kinds fall back to this rank so comparisons never fail.
    fn rank(&self) -> u8 {
        match self {
            Value::Bool(_) => 0,
            Value::Number(_) => 1,
            Value::String(_) => 2,
            Value::List(_) => 3,
            Value::Object(_) => 4,
            Value::Null => 5,
            Value::Undefined => 6,
        }
    }

    /// Natural order between two keys, ignoring direction.
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Number(a), Value::Number(b)) => a.compare(*b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::List(a), Value::List(b)) => a.iter().cmp(b.iter()),
            (Value::Object(a), Value::Object(b)) => a.iter().cmp(b.iter()),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

macro_rules! value_from_number {
    ($variant:ident as $target:ty: $($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Number(Number::$variant(v as $target))
                }
            }
        )*
    };
}

value_from_number!(Int as i64: i8, i16, i32, i64, isize);
value_from_number!(UInt as u64: u8, u16, u32, u64, usize);
value_from_number!(Float as f64: f32, f64);

impl From<Number> for Value {
    fn from(v: Number) -> Self {
        Value::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::String(v.to_string())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Undefined
    }
}

impl<V: Into<Value>> From<Option<V>> for Value {
    fn from(v: Option<V>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<V: Into<Value>> From<Vec<V>> for Value {
    fn from(v: Vec<V>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

/// A sortable candidate.
///
/// `key` is the whole-value key used when no property or extractor is given. `property` resolves
/// a property-name descriptor; the default reports every property as `Undefined`.
pub trait Record {
    fn key(&self) -> Cow<'_, Value>;

    fn property(&self, name: &str) -> Cow<'_, Value> {
        let _ = name;
        Cow::Owned(Value::Undefined)
    }
}

impl Record for Value {
    fn key(&self) -> Cow<'_, Value> {
        Cow::Borrowed(self)
    }

    fn property(&self, name: &str) -> Cow<'_, Value> {
        match self.get(name) {
            Some(v) => Cow::Borrowed(v),
            None => Cow::Owned(Value::Undefined),
        }
    }
}

macro_rules! record_by_copy {
    ($($t:ty),*) => {
        $(
            impl Record for $t {
                fn key(&self) -> Cow<'_, Value> {
                    Cow::Owned(Value::from(*self))
                }
            }
        )*
    };
}

record_by_copy!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
record_by_copy!(f32, f64, bool, char);

impl Record for str {
    fn key(&self) -> Cow<'_, Value> {
        Cow::Owned(Value::from(self))
    }
}

impl Record for String {
    fn key(&self) -> Cow<'_, Value> {
        Cow::Owned(Value::from(self.as_str()))
    }
}

impl<T: Record> Record for Option<T> {
    fn key(&self) -> Cow<'_, Value> {
        match self {
            Some(v) => v.key(),
            None => Cow::Owned(Value::Null),
        }
    }

    fn property(&self, name: &str) -> Cow<'_, Value> {
        match self {
            Some(v) => v.property(name),
            None => Cow::Owned(Value::Undefined),
        }
    }
}

macro_rules! record_by_deref {
    ($($wrapper:ident),*) => {
        $(
            impl<T: Record + ?Sized> Record for $wrapper<T> {
                fn key(&self) -> Cow<'_, Value> {
                    (**self).key()
                }

                fn property(&self, name: &str) -> Cow<'_, Value> {
                    (**self).property(name)
                }
            }
        )*
    };
}

record_by_deref!(Box, Rc, Arc);

impl<T: Record + ?Sized> Record for &T {
    fn key(&self) -> Cow<'_, Value> {
        (**self).key()
    }

    fn property(&self, name: &str) -> Cow<'_, Value> {
        (**self).property(name)
    }
}

#[cfg(feature = "serde_json")]
mod json {
    use super::*;

    impl From<&serde_json::Value> for Value {
        fn from(v: &serde_json::Value) -> Self {
            match v {
                serde_json::Value::Null => Value::Null,
                serde_json::Value::Bool(b) => Value::Bool(*b),
                serde_json::Value::Number(n) => {
                    if let Some(i) = n.as_i64() {
                        Value::Number(Number::Int(i))
                    } else if let Some(u) = n.as_u64() {
                        Value::Number(Number::UInt(u))
                    } else {
                        Value::Number(Number::Float(n.as_f64().unwrap_or(f64::NAN)))
                    }
                }
                serde_json::Value::String(s) => Value::String(s.clone()),
                serde_json::Value::Array(items) => {
                    Value::List(items.iter().map(Value::from).collect())
                }
                serde_json::Value::Object(map) => Value::Object(
                    map.iter()
                        .map(|(k, v)| (k.clone(), Value::from(v)))
                        .collect(),
                ),
            }
        }
    }

    impl From<serde_json::Value> for Value {
        fn from(v: serde_json::Value) -> Self {
            Value::from(&v)
        }
    }

    impl Record for serde_json::Value {
        fn key(&self) -> Cow<'_, Value> {
            Cow::Owned(Value::from(self))
        }

        fn property(&self, name: &str) -> Cow<'_, Value> {
            let found = match self {
                serde_json::Value::Object(map) => map.get(name),
                serde_json::Value::Array(items) => {
                    name.parse::<usize>().ok().and_then(|idx| items.get(idx))
                }
                _ => None,
            };

            Cow::Owned(found.map_or(Value::Undefined, Value::from))
        }
    }
}
