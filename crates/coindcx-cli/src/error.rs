//! CLI error type and exit codes

use coindcx_rest::{ErrorKind, RestError, TypesError};
use thiserror::Error;

/// Exit code for malformed invocations (sysexits `EX_USAGE`)
pub const EXIT_USAGE: i32 = 64;

/// Errors surfaced by the `coindcx` binary
#[derive(Debug, Error)]
pub enum CliError {
    /// Bad method name, parameter or value
    #[error("{message}")]
    Usage {
        message: String,
        /// Usage line for the method, when one is known
        usage: Option<String>,
    },

    /// Failure reported by the client
    #[error(transparent)]
    Rest(#[from] RestError),

    /// Response could not be rendered
    #[error("failed to render output: {0}")]
    Output(#[source] serde_json::Error),
}

impl CliError {
    /// Usage error without a usage line
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
            usage: None,
        }
    }

    /// Attach a usage line if none is set yet
    pub fn with_usage(self, line: impl Into<String>) -> Self {
        match self {
            Self::Usage { message, usage: None } => Self::Usage {
                message,
                usage: Some(line.into()),
            },
            other => other,
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage { .. } => EXIT_USAGE,
            Self::Rest(e) => match e.kind() {
                ErrorKind::Authentication => 2,
                ErrorKind::InvalidOrder | ErrorKind::InvalidParameter => 3,
                ErrorKind::RateLimited => 4,
                ErrorKind::Api => 5,
                ErrorKind::Request => 6,
                ErrorKind::Serialization => 7,
            },
            Self::Output(_) => 7,
        }
    }

    /// Message printed to stderr
    pub fn report(&self) -> String {
        match self {
            Self::Usage { message, usage } => match usage {
                Some(line) => format!("Error: {message}\n{line}"),
                None => format!("Error: {message}"),
            },
            Self::Rest(e) => format!("Error ({}): {e}", e.kind()),
            Self::Output(e) => format!("Error: failed to render output: {e}"),
        }
    }
}

impl From<TypesError> for CliError {
    fn from(err: TypesError) -> Self {
        Self::Rest(RestError::from(err))
    }
}
