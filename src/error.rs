use thiserror::Error;

/// Main error type for the collage library
#[derive(Error, Debug)]
pub enum CollageError {
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Imaging error: {0}")]
    Imaging(#[from] ImagingError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

/// Errors about the images and dimensions a collage is requested from
#[derive(Error, Debug)]
pub enum InputError {
    #[error("File does not exist: {path}")]
    MissingFile { path: String },

    #[error("Invalid canvas dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Errors raised by an image backend
#[derive(Error, Debug)]
pub enum ImagingError {
    #[error("Failed to decode image {path}: {reason}")]
    DecodeFailed { path: String, reason: String },

    #[error("Failed to write collage to {path}: {reason}")]
    OutputWriteFailed { path: String, reason: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using CollageError
pub type Result<T> = std::result::Result<T, CollageError>;

impl CollageError {
    /// Create a generic error with a custom message
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into())
    }

    /// Whether composition can carry on past this error by dropping one input
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Input(InputError::MissingFile { .. })
                | Self::Imaging(ImagingError::DecodeFailed { .. })
        )
    }

    /// Whether this is a failure to write the finished collage
    pub fn is_output_failure(&self) -> bool {
        matches!(self, Self::Imaging(ImagingError::OutputWriteFailed { .. }))
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Input(InputError::MissingFile { path }) => {
                format!("File does not exist. Skipping {}", path)
            }
            Self::Input(InputError::InvalidDimensions { width, height }) => {
                format!("Canvas must be at least 1x1 pixels, got {}x{}.", width, height)
            }
            Self::Imaging(ImagingError::DecodeFailed { path, .. }) => {
                format!("Could not read image '{}'. Please check it is a supported format.", path)
            }
            Self::Imaging(ImagingError::OutputWriteFailed { path, .. }) => {
                format!("Could not write collage to '{}'.", path)
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}
