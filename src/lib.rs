//! Configurable comparison sorting.
//!
//! A sort specification ([`SortBy`]) is resolved into a single two-argument ordering that is
//! handed to a stable in-place sort. Specifications can be a property name, an extractor
//! closure, a list of those compared lexicographically, or an object-form that carries its own
//! direction and comparer:
//!
//! ```ignore
//! use multisort::{asc, desc, key, sort_by, sort_descending};
//!
//! sort_descending(&mut users, "age")?;
//! sort_by(&mut users, vec![asc("last_name").into(), desc(key(|u: &User| u.zip)).into()])?;
//! ```
//!
//! Null-like keys (`Undefined`, `Null`) sort last in both directions with the default comparer.

pub mod comparer;
pub mod descriptor;
pub mod direction;
pub mod error;
pub mod extract;
pub mod instance;
pub mod multi_key;
pub mod ordering;
pub mod stable;
pub mod unpack;
pub mod value;

pub use comparer::{base_compare, CompareFn, Comparer};
pub use descriptor::{asc, desc, key, try_key, KeyDescriptor, ObjectForm, SortBy};
pub use direction::Direction;
pub use error::{BoxError, ExtractorError, SortError};
pub use instance::{
    create_instance, sort_ascending, sort_by, sort_descending, SortInstance, SortOptions, DEFAULT,
};
pub use stable::{RustStdStable, StableSort};
pub use value::{Number, Record, Value};
