use std::error::Error as StdError;

pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Error raised by a key extractor, passed through untouched.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ExtractorError(#[from] pub BoxError);

impl ExtractorError {
    pub fn new<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        ExtractorError(err.into())
    }

    pub fn into_inner(self) -> BoxError {
        self.0
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SortError {
    /// An object-form descriptor sets neither `asc` nor `desc`.
    #[error("Invalid sort config")]
    InvalidSortConfig,

    #[error(transparent)]
    Extractor(#[from] ExtractorError),
}
