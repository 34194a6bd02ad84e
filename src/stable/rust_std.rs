use std::cmp::Ordering;

stable_sort_impl!("rust_std_stable", RustStdStable);

#[inline]
pub fn sort_by<T, F>(v: &mut [T], compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    v.sort_by(compare);
}
