//! Framework-wide error types
//!
//! Every error carries an HTTP status code and converts into a plain-text
//! `HttpResponse`, so handlers can propagate failures with `?`.

use thiserror::Error;

/// Simple wrapper for one-off domain errors
///
/// # Example
///
/// ```rust,ignore
/// use crud_kit::{AppError, Response};
///
/// pub async fn show(req: Request) -> Response {
///     let user = store.find(id).ok_or_else(|| AppError::not_found("User not found"))?;
///     // ...
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AppError {
    message: String,
    status_code: u16,
}

impl AppError {
    /// Create a new AppError with status 500 (Internal Server Error)
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: 500,
        }
    }

    /// Set the HTTP status code
    pub fn status(mut self, code: u16) -> Self {
        self.status_code = code;
        self
    }

    /// Create a 404 Not Found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(message).status(404)
    }

    /// Create a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(message).status(400)
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl From<AppError> for FrameworkError {
    fn from(e: AppError) -> Self {
        FrameworkError::Domain {
            message: e.message,
            status_code: e.status_code,
        }
    }
}

/// Framework-wide error type
///
/// Converts into an `HttpResponse` (see `http::response`), which is what lets
/// `?` work inside handlers returning `Response`.
#[derive(Debug, Clone, Error)]
pub enum FrameworkError {
    /// Shared state not registered on the router
    #[error("Service '{type_name}' not registered in container")]
    ServiceNotFound {
        /// The type name of the state that was not found
        type_name: &'static str,
    },

    /// A route parameter was not captured by the matched pattern
    #[error("Missing required parameter: {param_name}")]
    ParamError {
        /// The name of the missing parameter
        param_name: String,
    },

    /// Malformed request (unparseable body, bad path segment)
    #[error("{message}")]
    BadRequest {
        /// Message sent back to the client verbatim
        message: String,
    },

    /// Request body exceeded the configured limit
    #[error("Request body exceeds the limit of {limit} bytes")]
    PayloadTooLarge {
        /// The configured limit in bytes
        limit: usize,
    },

    /// Generic internal server error
    #[error("Internal server error: {message}")]
    Internal {
        /// The error message
        message: String,
    },

    /// Domain/application error with custom status code
    #[error("{message}")]
    Domain {
        /// The error message
        message: String,
        /// HTTP status code
        status_code: u16,
    },
}

impl FrameworkError {
    /// Create a ServiceNotFound error for a given type
    pub fn service_not_found<T: ?Sized>() -> Self {
        Self::ServiceNotFound {
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Create a ParamError for a missing parameter
    pub fn param(name: impl Into<String>) -> Self {
        Self::ParamError {
            param_name: name.into(),
        }
    }

    /// Create a BadRequest error (400)
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Create a PayloadTooLarge error (413)
    pub fn payload_too_large(limit: usize) -> Self {
        Self::PayloadTooLarge { limit }
    }

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::ServiceNotFound { .. } => 500,
            Self::ParamError { .. } => 400,
            Self::BadRequest { .. } => 400,
            Self::PayloadTooLarge { .. } => 413,
            Self::Internal { .. } => 500,
            Self::Domain { status_code, .. } => *status_code,
        }
    }
}

impl From<serde_json::Error> for FrameworkError {
    fn from(e: serde_json::Error) -> Self {
        Self::internal(format!("Failed to serialize JSON: {}", e))
    }
}
