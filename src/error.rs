//! Error types for the multi-payment client.
//!
//! All errors implement the standard [`std::error::Error`] trait via
//! [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Transport failures** ([`MulpayError::HttpError`],
//!   [`MulpayError::ServerError`]): network errors and gateway 5xx responses
//! - **Argument errors** ([`MulpayError::MissingRequiredFields`],
//!   [`MulpayError::UnknownApiMethod`]): rejected before any network call
//! - **Decode errors** ([`MulpayError::MalformedResultFile`]): result-file
//!   payloads that do not match the fixed record schema
//! - **Provider errors** ([`MulpayError::ProviderError`]): business-level
//!   error codes inside an otherwise successful response, raised only by the
//!   opt-in error-checking step

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, MulpayError>;

/// Errors that can occur while talking to the payment gateway.
///
/// Transport-level failures (network errors, 5xx responses) are always
/// surfaced; business-level error codes inside a decoded body are left to the
/// caller via [`provider_error_check`](crate::client::provider_error_check).
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum MulpayError {
    /// The gateway answered with a server error (HTTP status >= 500).
    ///
    /// No body parsing is attempted for these responses; the raw body is
    /// carried verbatim for diagnostics.
    #[error("gateway server error (HTTP {http_status})")]
    ServerError {
        /// HTTP status code, always >= 500.
        http_status: u16,
        /// Raw response body, decoded lossily for display.
        body: String,
    },

    /// Required fields configured for the endpoint were not supplied.
    ///
    /// Raised before dispatch; the transport is never invoked.
    #[error("method '{method}' requires missing fields: {}", missing.join(", "))]
    MissingRequiredFields {
        /// Symbolic method name that was invoked.
        method: String,
        /// Required field names absent from the supplied arguments.
        missing: Vec<String>,
    },

    /// The symbolic method name is not bound in the client's catalog.
    ///
    /// This is a programmer error: the call site asked for an operation the
    /// selected product variant does not offer.
    #[error("API method '{0}' is not bound in this catalog")]
    UnknownApiMethod(String),

    /// The gateway reported one or more business-level error codes.
    ///
    /// Only produced by the error-checking callback; the dispatcher itself
    /// never interprets provider error codes.
    #[error("gateway returned error codes: {}", codes.join("|"))]
    ProviderError {
        /// Provider error codes (`ErrCode`), pipe-list split.
        codes: Vec<String>,
        /// Detail codes (`ErrInfo`), pipe-list split.
        info: Vec<String>,
    },

    /// A recurring result file payload did not divide into whole records.
    #[error("result file token count {token_count} is not a multiple of {record_width}")]
    MalformedResultFile {
        /// Number of tokens found in the payload.
        token_count: usize,
        /// Expected fields per record.
        record_width: usize,
    },

    /// HTTP request failed at the network level.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Invalid gateway, catalog, or transport configuration.
    #[error("invalid configuration: {0}")]
    ConfigError(String),
}
