use thiserror::Error;

#[derive(Error, Debug)]
pub enum PairingError {
    #[error("Data source error for '{path}': {message}")]
    DataSourceError { path: String, message: String },

    #[error("Data is not in the correct format: {message}")]
    DataFormatError { message: String },

    #[error("Invalid argument '{name}': {message}")]
    InvalidArgument { name: String, message: String },

    #[error("Record has no 'name' field: {record}")]
    MissingNameError { record: String },

    #[error("Pairing worker failed: {message}")]
    WorkerError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Precondition,
    Runtime,
    Output,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for a run that ended with an error of this severity.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl PairingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PairingError::DataSourceError { .. } | PairingError::DataFormatError { .. } => {
                ErrorCategory::Input
            }
            PairingError::InvalidArgument { .. } | PairingError::MissingNameError { .. } => {
                ErrorCategory::Precondition
            }
            PairingError::WorkerError { .. } => ErrorCategory::Runtime,
            PairingError::IoError(_)
            | PairingError::SerializationError(_)
            | PairingError::CsvError(_) => ErrorCategory::Output,
            PairingError::ConfigValidationError { .. }
            | PairingError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Precondition | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::High,
            ErrorCategory::Runtime => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PairingError::DataSourceError { .. } => {
                "Check that the data file exists and contains a JSON array of objects"
            }
            PairingError::DataFormatError { .. } => {
                "Every record must be a JSON object whose values are strings, numbers, booleans or null"
            }
            PairingError::InvalidArgument { .. } => "Use a positive chunk or worker count",
            PairingError::MissingNameError { .. } => "Add a 'name' field to every record",
            PairingError::WorkerError { .. } => "Re-run the job, or disable concurrency",
            PairingError::IoError(_) => "Check file permissions and the output directory",
            PairingError::SerializationError(_) | PairingError::CsvError(_) => {
                "Check the output format settings"
            }
            PairingError::ConfigValidationError { .. }
            | PairingError::InvalidConfigValueError { .. } => "Fix the configuration and run again",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PairingError::DataSourceError { path, .. } => {
                format!("Could not read records from {}", path)
            }
            PairingError::DataFormatError { .. } => "The input records are malformed".to_string(),
            PairingError::MissingNameError { .. } => {
                "A record without a name cannot be paired".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PairingError>;
