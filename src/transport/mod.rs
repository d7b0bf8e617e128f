//! Transport capability abstraction.
//!
//! The client never performs network I/O itself; it delegates to an injected
//! [`Transport`]. The production implementation is [`HttpTransport`] over
//! reqwest, and tests inject in-memory fakes.
//!
//! A transport performs exactly one request per [`Transport::send`] call and
//! reports network-level failures only. HTTP status classification (the 5xx
//! cutoff) is the dispatcher's job, so transports must return non-success
//! statuses as ordinary responses.

#[allow(
    redundant_imports,
    reason = "Future needed for RPITIT despite being in Edition 2024 prelude"
)]
use std::future::Future;

use crate::{error::Result, params::ParamMap};

pub mod config;
pub mod http;

pub use config::HttpConfig;
pub use http::HttpTransport;

/// HTTP verb for a gateway call.
///
/// The gateway dialect uses only GET and POST; the verb is fixed per call
/// site by the method catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    /// Parameters carried in the query string.
    Get,
    /// Parameters carried as a form-encoded body.
    Post,
}

impl Verb {
    /// Returns the verb name for logging.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Raw result of a single transport invocation.
///
/// Owned by the dispatcher until handed to a decoder; immutable thereafter.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body bytes, encoding unknown at this point.
    pub body: Vec<u8>,
    /// Response headers in arrival order.
    pub headers: Vec<(String, String)>,
}

/// Performs the actual network call for the client.
///
/// Implementations must be safe for concurrent use; the client holds one
/// transport for its whole lifetime and calls are independent.
pub trait Transport: Send + Sync {
    /// Executes one request and returns the raw status, headers, and body.
    ///
    /// # Errors
    ///
    /// Returns an error only for network-level failures (connect, timeout,
    /// TLS). Any received HTTP response, including 4xx/5xx, is returned as a
    /// [`RawResponse`].
    fn send<'a>(
        &'a self,
        verb: Verb,
        url: &'a str,
        params: &'a ParamMap,
    ) -> impl Future<Output = Result<RawResponse>> + Send + 'a;
}
