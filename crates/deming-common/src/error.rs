//! Error types and utilities for deming

use thiserror::Error;

/// Result type alias for deming operations
pub type Result<T> = std::result::Result<T, DemingError>;

/// Main error type for chart derivation, rendering and configuration
#[derive(Error, Debug)]
pub enum DemingError {
    /// A referenced column is absent from the dataset or has the wrong kind
    #[error("Invalid column '{column}': {reason}")]
    InvalidColumn {
        /// Name of the offending column
        column: String,
        /// Why the column cannot be used
        reason: String,
    },

    /// The dataset has too few rows for the requested operation
    #[error("Insufficient data: at least {required} rows required, got {actual}")]
    InsufficientData {
        /// Minimum number of rows the operation needs
        required: usize,
        /// Number of rows supplied
        actual: usize,
    },

    /// The vector control chart was requested without a goal value
    #[error("A goal value is required for the vector control chart")]
    MissingGoal,

    /// A statistic could not be computed (non-finite input or result)
    #[error("Computation error: {message}")]
    Computation {
        /// Description of the numeric failure
        message: String,
    },

    /// Malformed input structure, e.g. ragged dataset columns
    #[error("Validation error: {message}")]
    Validation {
        /// Description of the problem
        message: String,
        /// Field the problem relates to, if any
        field: Option<String>,
    },

    /// Drawing the chart failed
    #[error("Render error: {message}")]
    Render {
        /// Description of the failure
        message: String,
        /// Underlying backend error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Encoding the rendered chart failed
    #[error("Encoding error: {message}")]
    Encode {
        /// Description of the failure
        message: String,
        /// Underlying encoder error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The interactive window could not be created or driven
    #[error("Window error: {message}")]
    Window {
        /// Description of the failure
        message: String,
        /// Underlying windowing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Render settings could not be parsed or failed validation
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the failure
        message: String,
        /// Underlying parser or validator error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DemingError {
    /// Create an invalid column error
    pub fn invalid_column(column: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidColumn {
            column: column.into(),
            reason: reason.into(),
        }
    }

    /// Create an insufficient data error
    pub const fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// Create a computation error
    pub fn computation(msg: impl Into<String>) -> Self {
        Self::Computation {
            message: msg.into(),
        }
    }

    /// Create a validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Create a render error
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a render error with source
    pub fn render_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Render {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an encoding error
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode {
            message: msg.into(),
            source: None,
        }
    }

    /// Create an encoding error with source
    pub fn encode_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Encode {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a window error
    pub fn window(msg: impl Into<String>) -> Self {
        Self::Window {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Convert from `serde_yaml::Error` to `DemingError`
impl From<serde_yaml::Error> for DemingError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::config_with_source("YAML parsing error", err)
    }
}

/// Convert from `toml::de::Error` to `DemingError`
impl From<toml::de::Error> for DemingError {
    fn from(err: toml::de::Error) -> Self {
        Self::config_with_source("TOML parsing error", err)
    }
}

/// Convert from `image::ImageError` to `DemingError`
impl From<image::ImageError> for DemingError {
    fn from(err: image::ImageError) -> Self {
        Self::encode_with_source("PNG encoding failed", err)
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to `DemingError`
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for DemingError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::render_with_source("Chart rendering failed", err)
    }
}
