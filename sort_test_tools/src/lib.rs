use multisort::SortInstance;

/// A configured sort under test.
pub trait Sort {
    fn name() -> String;

    fn instance() -> SortInstance;
}

#[doc(hidden)]
pub use paste;

pub mod patterns;
pub mod tests;
