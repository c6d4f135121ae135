//! Error types for axes and pickers.

/// Errors from building a quantized axis.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AxisError {
    #[error("axis has no values")]
    Empty,
    #[error("item extent must be positive and finite, got {0}")]
    InvalidExtent(f64),
    #[error("duplicate axis value at index {index}")]
    Duplicate { index: usize },
}

/// Errors reported by picker operations that opt into strict checking.
///
/// The lenient operations (`initialize`, `parse_lenient`) never return these;
/// they fall back to defaults instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PickerError {
    #[error("value {value} is not in the axis domain")]
    ValueNotInDomain { value: String },
    #[error("invalid time {input:?}: {message}")]
    InvalidTime { input: String, message: String },
    #[error("invalid date {input:?}: {message}")]
    InvalidDate { input: String, message: String },
    #[error(transparent)]
    Axis(#[from] AxisError),
}
