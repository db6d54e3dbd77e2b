use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlaceGenError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Could not resolve region '{search_string}': {reason}")]
    ResolutionFailed {
        search_string: String,
        reason: String,
    },

    #[error(
        "Unable to match region '{region}' against geocoded locations after {fail_limit} attempts \
         ({places_found} places found, matching on '{match_on}')"
    )]
    RegionUnresolvable {
        region: String,
        match_on: String,
        fail_limit: usize,
        places_found: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Storage,
    Data,
    Generation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PlaceGenError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) | Self::ResolutionFailed { .. } => ErrorCategory::Network,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. }
            | Self::ConfigValidationError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) => ErrorCategory::Storage,
            Self::CsvError(_) | Self::SerializationError(_) | Self::ProcessingError { .. } => {
                ErrorCategory::Data
            }
            Self::RegionUnresolvable { .. } => ErrorCategory::Generation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data | ErrorCategory::Generation => {
                ErrorSeverity::High
            }
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    /// 針對錯誤給出的修正建議
    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::ApiError(_) => {
                "Check network connectivity and the geocoder endpoints, then retry".to_string()
            }
            Self::ResolutionFailed { .. } => {
                "Make the region search string more specific or check the resolver endpoint"
                    .to_string()
            }
            Self::CsvError(_) => {
                "Check that the reverse geocoder CSV has lat, lon and name columns".to_string()
            }
            Self::IoError(_) => "Check file paths and permissions".to_string(),
            Self::SerializationError(_) => "Check the shape of the generated data".to_string(),
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. }
            | Self::ConfigValidationError { .. } => {
                "Fix the configuration file and try again".to_string()
            }
            Self::ProcessingError { .. } => "Re-run with --verbose for more detail".to_string(),
            Self::RegionUnresolvable { match_on, .. } => format!(
                "Check search queries, or match_on (\"{}\") or increase match_fail_limit and try again",
                match_on
            ),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::RegionUnresolvable {
                region,
                places_found,
                ..
            } => format!(
                "No places could be generated for '{}' ({} found); nothing was written",
                region, places_found
            ),
            Self::ResolutionFailed { search_string, .. } => {
                format!("Region '{}' could not be found; nothing was written", search_string)
            }
            other => other.to_string(),
        }
    }

    /// CLI 退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, PlaceGenError>;
