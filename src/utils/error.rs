use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Invalid budget '{input}': {reason}")]
    InvalidBudget { input: String, reason: String },

    #[error("Upstream generator unavailable: {message}")]
    UpstreamUnavailable { message: String },

    #[error("Upstream response malformed: {message}")]
    UpstreamMalformed { message: String },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Upstream,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AdvisorError {
    pub fn invalid_budget(input: &str, reason: impl Into<String>) -> Self {
        AdvisorError::InvalidBudget {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AdvisorError::InvalidBudget { .. } => ErrorCategory::Input,
            AdvisorError::UpstreamUnavailable { .. }
            | AdvisorError::UpstreamMalformed { .. }
            | AdvisorError::HttpError(_) => ErrorCategory::Upstream,
            AdvisorError::ConfigValidationError { .. }
            | AdvisorError::InvalidConfigValueError { .. }
            | AdvisorError::MissingConfigError { .. } => ErrorCategory::Configuration,
            AdvisorError::IoError(_) | AdvisorError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    /// Upstream failures never reach the user; the advisor falls back on them.
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Upstream => ErrorSeverity::Low,
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn is_upstream(&self) -> bool {
        self.category() == ErrorCategory::Upstream
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            AdvisorError::InvalidBudget { .. } => {
                "Enter a budget greater than zero, e.g. --budget 35000".to_string()
            }
            AdvisorError::UpstreamUnavailable { .. } | AdvisorError::HttpError(_) => {
                "Check the upstream endpoint and API token, or run with --offline".to_string()
            }
            AdvisorError::UpstreamMalformed { .. } => {
                "The rule-based allocator is used instead; no action needed".to_string()
            }
            AdvisorError::ConfigValidationError { field, .. }
            | AdvisorError::InvalidConfigValueError { field, .. } => {
                format!("Fix the '{}' entry in your configuration file", field)
            }
            AdvisorError::MissingConfigError { field } => {
                format!("Add '{}' to your configuration file", field)
            }
            AdvisorError::IoError(_) => "Check that the file exists and is readable".to_string(),
            AdvisorError::SerializationError(_) => {
                "Report this as a bug with the input that triggered it".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AdvisorError::InvalidBudget { .. } => {
                "Please enter a valid budget amount".to_string()
            }
            AdvisorError::UpstreamUnavailable { .. }
            | AdvisorError::UpstreamMalformed { .. }
            | AdvisorError::HttpError(_) => {
                "AI generation failed, showing the rule-based build instead".to_string()
            }
            AdvisorError::ConfigValidationError { .. }
            | AdvisorError::InvalidConfigValueError { .. }
            | AdvisorError::MissingConfigError { .. } => {
                format!("Configuration problem: {}", self)
            }
            AdvisorError::IoError(e) => format!("Could not read input: {}", e),
            AdvisorError::SerializationError(e) => format!("Could not render output: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
