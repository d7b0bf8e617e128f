//! HTTP transport implementation over reqwest.

use std::sync::LazyLock;

use reqwest::Client;
use tracing::instrument;

use super::{RawResponse, Transport, Verb, config::HttpConfig};
use crate::{
    error::{MulpayError, Result},
    params::ParamMap,
};

/// Default HTTP client with connection pooling enabled.
///
/// Using a singleton avoids recreating the client per transport instance,
/// preserving connection pooling benefits across all default transports.
static DEFAULT_HTTP_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    let config = HttpConfig::default();
    Client::builder()
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .timeout(config.timeout())
        .connect_timeout(config.connect_timeout())
        .build()
        .expect("Failed to create default HTTP client")
});

/// Reqwest-backed transport for the payment gateway.
///
/// GET requests carry parameters in the query string; POST requests send a
/// form-encoded body, which is the only body encoding the gateway accepts.
///
/// # Examples
///
/// ```rust,no_run
/// use mulpay::transport::{HttpTransport, Transport, Verb};
///
/// # async fn example() -> mulpay::error::Result<()> {
/// let transport = HttpTransport::new()?;
/// let params = mulpay::params::ParamMap::new();
/// let response = transport
///     .send(Verb::Post, "https://p01.mul-pay.jp/payment/SearchTrade.idPass", &params)
///     .await?;
/// println!("status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport backed by the shared default client.
    ///
    /// # Errors
    ///
    /// This method is infallible but returns `Result` for API consistency
    /// with [`Self::with_config`].
    pub fn new() -> Result<Self> {
        Ok(Self { client: DEFAULT_HTTP_CLIENT.clone() })
    }

    /// Creates a transport with its own client built from `config`.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is out of bounds or HTTP client
    /// creation fails.
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(MulpayError::HttpError)?;
        Ok(Self { client })
    }

    #[instrument(skip(self, params), fields(verb = verb.as_str(), url))]
    async fn execute(&self, verb: Verb, url: &str, params: &ParamMap) -> Result<RawResponse> {
        let pairs: Vec<(&str, &str)> =
            params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();

        let request = match verb {
            Verb::Get => self.client.get(url).query(&pairs),
            Verb::Post => self.client.post(url).form(&pairs),
        };

        let response = request.send().await?;

        let status = response.status().as_u16();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (name.to_string(), value.to_str().unwrap_or_default().to_owned())
            })
            .collect();

        // Non-success statuses are classified by the dispatcher, not here.
        let body = response.bytes().await.map_err(MulpayError::HttpError)?.to_vec();

        Ok(RawResponse { status, body, headers })
    }
}

impl Transport for HttpTransport {
    async fn send<'a>(
        &'a self,
        verb: Verb,
        url: &'a str,
        params: &'a ParamMap,
    ) -> Result<RawResponse> {
        self.execute(verb, url, params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_transport_new() {
        assert!(HttpTransport::new().is_ok());
    }

    #[test]
    fn test_http_transport_with_config() {
        let config = HttpConfig {
            pool_max_idle_per_host: 5,
            timeout_secs: 60,
            connect_timeout_secs: 15,
        };
        assert!(HttpTransport::with_config(&config).is_ok());
    }

    #[test]
    fn test_http_transport_rejects_invalid_config() {
        let config = HttpConfig { timeout_secs: 0, ..Default::default() };
        let result = HttpTransport::with_config(&config);
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), MulpayError::ConfigError(_)));
    }

    #[tokio::test]
    async fn test_http_transport_invalid_url_is_network_error() {
        let transport = HttpTransport::new().unwrap();
        let params = ParamMap::new();
        let result = transport.send(Verb::Get, "not-a-url", &params).await;
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), MulpayError::HttpError(_)));
    }

    #[test]
    fn test_default_http_client_is_singleton() {
        let first = HttpTransport::new().unwrap();
        let second = HttpTransport::new().unwrap();
        // Both clones share the same pooled client.
        let _ = (first, second);
    }

    #[test]
    fn test_http_transport_debug_format() {
        let transport = HttpTransport::new().unwrap();
        let debug_str = format!("{transport:?}");
        assert!(debug_str.contains("HttpTransport"));
    }
}
