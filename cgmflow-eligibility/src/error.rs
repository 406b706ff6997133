use thiserror::Error;

/// Failure talking to the patient API, classified by what went wrong
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
  /// Bad request data, or a response that isn't the expected shape (400)
  #[error("{message}")]
  Validation { message: String, field: Option<&'static str> },

  /// 401 or 403
  #[error("{0}")]
  Auth(String),

  /// 404
  #[error("{0}")]
  NotFound(String),

  /// 500, 502, 503 or 504
  #[error("{message}")]
  Server { message: String, status: u16 },

  /// Any other non-success status
  #[error("{message}")]
  Api { message: String, status: u16 },

  /// The request never got a response (connection failure, timeout)
  #[error("Network request failed. Please check your connection and try again.")]
  Network { detail: String },

  /// The client could not be set up
  #[error("Patient API is not configured: {0}")]
  Config(String),
}

impl ApiError {
  pub fn validation<S: Into<String>>(message: S) -> Self {
    ApiError::Validation { message: message.into(), field: None }
  }

  /// Classify an unsuccessful response status
  pub fn from_status(status: u16, message: String) -> Self {
    match status {
      400 => ApiError::Validation { message, field: None },
      401 | 403 => ApiError::Auth(message),
      404 => ApiError::NotFound(message),
      500 | 502 | 503 | 504 => ApiError::Server { message, status },
      _ => ApiError::Api { message, status },
    }
  }

  /// Status this error stands for, `None` when there was no HTTP exchange
  pub fn status_code(&self) -> Option<u16> {
    match self {
      ApiError::Validation { .. } => Some(400),
      ApiError::Auth(_) => Some(401),
      ApiError::NotFound(_) => Some(404),
      ApiError::Server { status, .. } |
      ApiError::Api { status, .. } => Some(*status),
      ApiError::Network { .. } |
      ApiError::Config(_) => None,
    }
  }

  /// Error name for JSON error bodies
  pub fn code(&self) -> &'static str {
    match self {
      ApiError::Validation { .. } => "ValidationError",
      ApiError::Auth(_) => "AuthError",
      ApiError::NotFound(_) => "NotFoundError",
      ApiError::Server { .. } => "ServerError",
      ApiError::Api { .. } => "APIError",
      ApiError::Network { .. } => "NetworkError",
      ApiError::Config(_) => "ConfigError",
    }
  }
}
