//! The stable sort primitive the ordering functions are handed to.
//!
//! Nothing in this crate sorts by itself. An implementation only has to be stable, ties from the
//! multi-key resolution keep their input order.

use std::cmp::Ordering;

pub trait StableSort {
    fn name() -> String;

    fn sort_by<T, F>(arr: &mut [T], compare: F)
    where
        F: FnMut(&T, &T) -> Ordering;
}

macro_rules! stable_sort_impl {
    ($name:expr, $impl_name:ident) => {
        #[derive(Copy, Clone, Debug, Default)]
        pub struct $impl_name;

        impl crate::stable::StableSort for $impl_name {
            fn name() -> String {
                $name.into()
            }

            #[inline]
            fn sort_by<T, F>(arr: &mut [T], compare: F)
            where
                F: FnMut(&T, &T) -> Ordering,
            {
                sort_by(arr, compare);
            }
        }
    };
}

pub mod rust_std;

pub use rust_std::RustStdStable;
