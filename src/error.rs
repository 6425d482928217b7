/// Error types for pinetools
///
/// The simulated tools themselves never fail. These variants cover the
/// store lookups, input checks, config loading and run cancellation around them.

use thiserror::Error;

/// Main error type for pinetools operations
#[derive(Error, Debug)]
pub enum PineError {
    /// I/O errors (config file, upload metadata)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// File id not present in the file brain
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Rejected user input (empty link, unknown file type name, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Workflow run was cancelled before it finished
    #[error("Workflow run was cancelled")]
    Cancelled,

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Result type alias for pinetools operations
pub type Result<T> = std::result::Result<T, PineError>;

/// Convert PineError to a user-friendly error message
impl PineError {
    pub fn user_message(&self) -> String {
        match self {
            PineError::Io(e) => {
                format!("File system error. Check permissions. Details: {}", e)
            }
            PineError::Serialization(e) => {
                format!("Data format error: {}", e)
            }
            PineError::FileNotFound(id) => {
                format!("No file with id '{}' in your file brain", id)
            }
            PineError::InvalidInput(reason) => {
                format!("Invalid input: {}", reason)
            }
            PineError::Config(msg) => {
                format!("Configuration issue: {}", msg)
            }
            PineError::Cancelled => "The workflow was stopped before it finished".to_string(),
            PineError::Generic(msg) => msg.clone(),
        }
    }
}
