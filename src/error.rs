//! Error types for prompt-cache-llm operations.
//!
//! The main error type is [`LlmError`], which covers every failure a turn can
//! surface to its caller:
//! - Configuration errors (missing API keys, malformed header values)
//! - Precondition violations (history shorter than the cached prefix)
//! - Transport and provider failures (network, rate limits, bad responses)
//! - Cancellation by a caller-supplied review hook
//!
//! An unknown provider identifier is deliberately *not* an error: the handler
//! factory falls back to the default provider instead.
//!
//! # Error Handling Example
//!
//! ```rust
//! use prompt_cache_llm::{LlmError, error::ErrorCategory};
//!
//! fn handle_error(err: &LlmError) -> &'static str {
//!     if err.is_cancellation() {
//!         return "user declined";
//!     }
//!     match err.category() {
//!         ErrorCategory::Transient => "try again later",
//!         ErrorCategory::Client => "fix the request",
//!         _ => "provider issue",
//!     }
//! }
//!
//! assert_eq!(handle_error(&LlmError::Cancelled), "user declined");
//! ```

use thiserror::Error;

// ============================================================================
// Error categorization types
// ============================================================================

/// High-level categorization of errors for routing and handling decisions.
///
/// Use [`LlmError::category()`] to get the category for any error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Expected outcomes that are not failures of the system, such as the
    /// user declining to send a request.
    BusinessLogic,

    /// External service failures (LLM providers, network issues).
    External,

    /// Internal contract violations between the caller and this crate.
    ///
    /// A caller rewrote history that was already sent to the provider cache.
    Internal,

    /// Client errors (invalid input, authentication, configuration).
    Client,

    /// Temporary failures that may succeed when the caller retries.
    Transient,
}

/// Severity level for logging and alerting decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Cache bookkeeping no longer matches the provider.
    Critical,
    /// Action failed but system is stable.
    Error,
    /// Unexpected but recoverable situation.
    Warning,
    /// Expected outcome, log at info/debug level.
    Info,
}

// ============================================================================
// LLM Error types
// ============================================================================

/// Convenient result type for prompt-cache-llm operations.
pub type LlmResult<T> = std::result::Result<T, LlmError>;

/// Errors that can occur while building or dispatching a turn.
///
/// | Variant | Category | Retryable |
/// |---------|----------|-----------|
/// | `ConfigurationError` | Client | No |
/// | `PreconditionViolation` | Internal | No |
/// | `RequestFailed` | External | Yes |
/// | `ResponseParsingError` | External | No |
/// | `RateLimitExceeded` | Transient | Yes |
/// | `Timeout` | Transient | Yes |
/// | `AuthenticationFailed` | Client | No |
/// | `Cancelled` | BusinessLogic | No |
///
/// None of these are ever committed to the cache state: a failed or cancelled
/// turn leaves the handler exactly as it was before the call.
#[derive(Error, Debug)]
pub enum LlmError {
    /// Provider configuration is invalid or incomplete.
    #[error("Provider configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration problem.
        message: String,
    },

    /// The supplied conversation is shorter than the prefix already cached.
    ///
    /// The caller truncated or rewrote history that was already sent, so the
    /// provider-side cache no longer corresponds to the claimed conversation.
    #[error(
        "Conversation has {supplied} messages but {cached} were already cached; \
         history that was sent must not be rewritten"
    )]
    PreconditionViolation {
        /// Number of messages recorded as cached.
        cached: usize,
        /// Number of messages in the conversation supplied this turn.
        supplied: usize,
    },

    /// The HTTP request to the provider failed.
    #[error("Request failed: {message}")]
    RequestFailed {
        /// Description of the failure.
        message: String,
        /// The underlying error, if available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to parse the provider's response.
    #[error("Response parsing failed: {message}")]
    ResponseParsingError {
        /// Details about the parsing failure.
        message: String,
    },

    /// Provider rate limit exceeded.
    #[error("Rate limit exceeded, retry after {retry_after_seconds}s")]
    RateLimitExceeded {
        /// Recommended wait time before retrying.
        retry_after_seconds: u64,
    },

    /// Request timed out in the transport.
    #[error("Request timed out after {timeout_seconds}s")]
    Timeout {
        /// The timeout duration that was exceeded.
        timeout_seconds: u64,
    },

    /// Authentication with the provider failed.
    #[error("Authentication failed: {message}")]
    AuthenticationFailed {
        /// Details about the authentication failure.
        message: String,
    },

    /// The request was declined at the review step before dispatch.
    #[error("Request cancelled before it was sent")]
    Cancelled,
}

impl LlmError {
    /// Get the error category for routing and handling decisions.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigurationError { .. } => ErrorCategory::Client,
            Self::PreconditionViolation { .. } => ErrorCategory::Internal,
            Self::RequestFailed { .. } => ErrorCategory::External,
            Self::ResponseParsingError { .. } => ErrorCategory::External,
            Self::RateLimitExceeded { .. } => ErrorCategory::Transient,
            Self::Timeout { .. } => ErrorCategory::Transient,
            Self::AuthenticationFailed { .. } => ErrorCategory::Client,
            Self::Cancelled => ErrorCategory::BusinessLogic,
        }
    }

    /// Get the error severity for logging and alerting.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ConfigurationError { .. } => ErrorSeverity::Error,
            Self::PreconditionViolation { .. } => ErrorSeverity::Critical,
            Self::RequestFailed { .. } => ErrorSeverity::Error,
            Self::ResponseParsingError { .. } => ErrorSeverity::Warning,
            Self::RateLimitExceeded { .. } => ErrorSeverity::Warning,
            Self::Timeout { .. } => ErrorSeverity::Warning,
            Self::AuthenticationFailed { .. } => ErrorSeverity::Error,
            Self::Cancelled => ErrorSeverity::Info,
        }
    }

    /// Whether the caller may retry the same turn.
    ///
    /// This crate never retries on its own; the flag is guidance for the
    /// caller or its transport.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimitExceeded { .. } | Self::Timeout { .. } | Self::RequestFailed { .. }
        )
    }

    /// Whether this error is the user-cancelled outcome rather than a failure.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Convert to a user-friendly message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            Self::ConfigurationError { .. } => {
                "AI service configuration issue. Please check your settings".to_string()
            }
            Self::PreconditionViolation { .. } => {
                "Conversation history changed unexpectedly. Please start a new task".to_string()
            }
            Self::RequestFailed { .. } => {
                "Unable to communicate with AI service. Please try again".to_string()
            }
            Self::ResponseParsingError { .. } => {
                "Received an invalid response from AI service".to_string()
            }
            Self::RateLimitExceeded {
                retry_after_seconds,
            } => {
                format!("Service is busy. Please wait {retry_after_seconds} seconds and try again")
            }
            Self::Timeout { .. } => "Request timed out. Please try again".to_string(),
            Self::AuthenticationFailed { .. } => {
                "Authentication failed. Please check your credentials".to_string()
            }
            Self::Cancelled => "Request was cancelled".to_string(),
        }
    }

    // =========================================================================
    // Constructor methods
    // =========================================================================

    pub fn configuration_error(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    pub fn precondition_violation(cached: usize, supplied: usize) -> Self {
        Self::PreconditionViolation { cached, supplied }
    }

    pub fn request_failed(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::RequestFailed {
            message: message.into(),
            source,
        }
    }

    pub fn response_parsing_error(message: impl Into<String>) -> Self {
        Self::ResponseParsingError {
            message: message.into(),
        }
    }

    pub fn rate_limit_exceeded(retry_after_seconds: u64) -> Self {
        Self::RateLimitExceeded {
            retry_after_seconds,
        }
    }

    pub fn timeout(timeout_seconds: u64) -> Self {
        Self::Timeout { timeout_seconds }
    }

    pub fn authentication_failed(message: impl Into<String>) -> Self {
        Self::AuthenticationFailed {
            message: message.into(),
        }
    }
}
