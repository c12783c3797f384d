use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The projection named a field the index does not have.
    #[error("Could not find a property named '{0}'")]
    FieldMismatch(String),

    #[error("Search unavailable: {0}")]
    Unavailable(String),
}
