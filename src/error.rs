use thiserror::Error;

/// Problems found while turning a tabular source into a [`Dataset`].
///
/// These are the only hard failures in the crate; everything downstream of a
/// loaded dataset (filtering, aggregation) is infallible.
///
/// [`Dataset`]: crate::data::model::Dataset
#[derive(Debug, Error, PartialEq)]
pub enum DataError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: column '{column}' has invalid value '{value}'")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("row {row}: payload mass {value} must be finite and non-negative")]
    InvalidPayload { row: usize, value: f64 },

    #[error("dataset contains no launch records")]
    EmptyDataset,
}
