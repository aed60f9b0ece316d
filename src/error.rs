use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadTestError {
    #[error("Login response did not contain a token")]
    MissingToken,

    #[error("Setup failed: {0}")]
    SetupFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

pub type LoadTestResult<T> = Result<T, LoadTestError>;

impl LoadTestError {
    /// Setup and configuration problems abort the run; everything else is reported.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            LoadTestError::MissingToken
                | LoadTestError::SetupFailed(_)
                | LoadTestError::ConfigError(_)
                | LoadTestError::InvalidThreshold(_)
        )
    }
}

pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> LoadTestResult<T>;
    fn with_context<F>(self, f: F) -> LoadTestResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn context(self, msg: &str) -> LoadTestResult<T> {
        self.map_err(|e| LoadTestError::Unknown(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> LoadTestResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| LoadTestError::Unknown(format!("{}: {}", f(), e)))
    }
}

#[macro_export]
macro_rules! loadtest_error {
    ($error_type:ident, $msg:expr) => {
        $crate::error::LoadTestError::$error_type($msg.to_string())
    };
    ($error_type:ident, $fmt:expr, $($arg:tt)*) => {
        $crate::error::LoadTestError::$error_type(format!($fmt, $($arg)*))
    };
}
