//! Gateway client and request dispatcher.
//!
//! [`ApiClient`] binds three pieces of configuration together: the gateway
//! host ([`GatewayConfig`]), the permitted operations for one product variant
//! ([`MethodCatalog`]), and an injected [`Transport`]. Each call resolves the
//! method, verifies required fields, performs exactly one transport
//! invocation, classifies 5xx statuses, and decodes the body with the
//! strategy matching the operation family.

use std::fmt;

use tracing::{debug, instrument, warn};

use crate::{
    catalog::MethodCatalog,
    config::GatewayConfig,
    decode::{FieldMap, ResultFileBatch, decode_form, decode_result_file},
    encoding::to_utf8,
    error::{MulpayError, Result},
    params::{ParamMap, to_provider_params},
    transport::{HttpTransport, RawResponse, Transport, Verb},
};

/// Post-decode validation hook for flat responses.
pub type ErrorCheckFn<'a> = dyn Fn(&FieldMap) -> Result<()> + Send + Sync + 'a;

/// Post-decode validation hook for result file responses.
pub type FileCheckFn<'a> = dyn Fn(&ResultFileBatch) -> Result<()> + Send + Sync + 'a;

/// Which raw transport component to return instead of the decoded body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpComponent {
    /// The HTTP status code.
    Status,
    /// The response headers.
    Headers,
    /// The raw, undecoded body bytes.
    Body,
}

/// A raw transport component selected via [`HttpComponent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawComponent {
    /// HTTP status code.
    Status(u16),
    /// Response headers in arrival order.
    Headers(Vec<(String, String)>),
    /// Raw body bytes.
    Body(Vec<u8>),
}

/// Result of a flat-response call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Decoded and normalized field map.
    Fields(FieldMap),
    /// Requested raw component; the decoded body was still computed for the
    /// error-checking step.
    Raw(RawComponent),
}

/// Result of a recurring-result-file call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileReply {
    /// Decoded fixed-field records.
    Records(ResultFileBatch),
    /// Requested raw component.
    Raw(RawComponent),
}

/// Per-call options for flat-response operations.
#[derive(Default)]
pub struct CallOptions<'a> {
    /// When set, return this raw component instead of the decoded body.
    pub http_component: Option<HttpComponent>,
    /// Invoked with the decoded body so callers can raise business-level
    /// errors; the dispatcher itself only classifies transport 5xx.
    pub error_check: Option<&'a ErrorCheckFn<'a>>,
}

impl fmt::Debug for CallOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallOptions")
            .field("http_component", &self.http_component)
            .field("error_check", &self.error_check.map(|_| "<fn>"))
            .finish()
    }
}

/// Per-call options for result-file operations.
#[derive(Default)]
pub struct FileCallOptions<'a> {
    /// When set, return this raw component instead of the decoded records.
    pub http_component: Option<HttpComponent>,
    /// Invoked with the decoded records before the reply is returned.
    pub error_check: Option<&'a FileCheckFn<'a>>,
}

impl fmt::Debug for FileCallOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileCallOptions")
            .field("http_component", &self.http_component)
            .field("error_check", &self.error_check.map(|_| "<fn>"))
            .finish()
    }
}

/// Ready-made error check: fails when the gateway reports a non-empty
/// `ErrCode`.
///
/// `ErrCode` and `ErrInfo` are pipe-separated lists when several checks fail
/// at once; both are split into their components.
///
/// # Errors
///
/// Returns [`MulpayError::ProviderError`] carrying the split code and info
/// lists.
pub fn provider_error_check(body: &FieldMap) -> Result<()> {
    match body.get("ErrCode") {
        Some(code) if !code.is_empty() => {
            let codes = code.split('|').map(str::to_owned).collect();
            let info = body
                .get("ErrInfo")
                .map(|detail| detail.split('|').map(str::to_owned).collect())
                .unwrap_or_default();
            Err(MulpayError::ProviderError { codes, info })
        }
        _ => Ok(()),
    }
}

/// Client for one product variant of the payment gateway.
///
/// # Examples
///
/// ```rust,no_run
/// use mulpay::{
///     client::{ApiClient, CallOptions, Reply, provider_error_check},
///     config::GatewayConfig,
///     params::ParamMap,
/// };
///
/// # async fn example() -> mulpay::error::Result<()> {
/// let client = ApiClient::shop(GatewayConfig::new("p01.mul-pay.jp"))?;
///
/// let mut args = ParamMap::new();
/// args.insert("shop_id".to_owned(), "tshop001".to_owned());
/// args.insert("shop_pass".to_owned(), "secret".to_owned());
/// args.insert("order_id".to_owned(), "order-0001".to_owned());
/// args.insert("job_cd".to_owned(), "CAPTURE".to_owned());
/// args.insert("amount".to_owned(), "1000".to_owned());
///
/// let opts = CallOptions { error_check: Some(&provider_error_check), ..Default::default() };
/// let reply = client.post("entry_tran", &args, opts).await?;
///
/// if let Reply::Fields(body) = reply {
///     println!("AccessID: {}", body["AccessID"]);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ApiClient<T> {
    config: GatewayConfig,
    catalog: MethodCatalog,
    transport: T,
}

impl ApiClient<HttpTransport> {
    /// Shop API client over the default HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid.
    pub fn shop(config: GatewayConfig) -> Result<Self> {
        Self::new(config, MethodCatalog::shop(), HttpTransport::new()?)
    }

    /// Site API client over the default HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid.
    pub fn site(config: GatewayConfig) -> Result<Self> {
        Self::new(config, MethodCatalog::site(), HttpTransport::new()?)
    }

    /// Shop-and-site API client over the default HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid.
    pub fn shop_and_site(config: GatewayConfig) -> Result<Self> {
        Self::new(config, MethodCatalog::shop_and_site(), HttpTransport::new()?)
    }

    /// Remittance API client over the default HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid.
    pub fn remittance(config: GatewayConfig) -> Result<Self> {
        Self::new(config, MethodCatalog::remittance(), HttpTransport::new()?)
    }
}

impl<T: Transport> ApiClient<T> {
    /// Creates a client from explicit parts.
    ///
    /// # Errors
    ///
    /// Returns [`MulpayError::ConfigError`] if the gateway configuration
    /// fails validation.
    pub fn new(config: GatewayConfig, catalog: MethodCatalog, transport: T) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, catalog, transport })
    }

    /// Returns the gateway configuration.
    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Returns the bound method catalog.
    #[must_use]
    pub fn catalog(&self) -> &MethodCatalog {
        &self.catalog
    }

    /// Returns the underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Calls `method` with the verb configured in the catalog.
    ///
    /// # Errors
    ///
    /// See [`Self::post`].
    pub async fn call(
        &self,
        method: &str,
        args: &ParamMap,
        opts: CallOptions<'_>,
    ) -> Result<Reply> {
        self.call_form(method, args, opts, None).await
    }

    /// Calls `method` as a GET request.
    ///
    /// Arguments are sent as supplied; GET call sites address provider field
    /// names directly.
    ///
    /// # Errors
    ///
    /// See [`Self::post`].
    pub async fn get(&self, method: &str, args: &ParamMap, opts: CallOptions<'_>) -> Result<Reply> {
        self.call_form(method, args, opts, Some(Verb::Get)).await
    }

    /// Calls `method` as a POST request, translating symbolic argument names
    /// to provider field names first.
    ///
    /// # Errors
    ///
    /// - [`MulpayError::UnknownApiMethod`] if the catalog does not bind
    ///   `method`
    /// - [`MulpayError::MissingRequiredFields`] if required arguments are
    ///   absent (checked before any network call)
    /// - [`MulpayError::ServerError`] for gateway 5xx responses
    /// - [`MulpayError::HttpError`] for network failures
    /// - whatever `opts.error_check` returns
    pub async fn post(
        &self,
        method: &str,
        args: &ParamMap,
        opts: CallOptions<'_>,
    ) -> Result<Reply> {
        self.call_form(method, args, opts, Some(Verb::Post)).await
    }

    /// Calls a recurring-result-file method and decodes the fixed-field
    /// record payload.
    ///
    /// # Errors
    ///
    /// As [`Self::post`], plus [`MulpayError::MalformedResultFile`] when the
    /// payload does not divide into whole records.
    pub async fn post_recurring_result_file(
        &self,
        method: &str,
        args: &ParamMap,
        opts: FileCallOptions<'_>,
    ) -> Result<FileReply> {
        let bound = self.catalog.resolve(method)?;
        self.assert_required(method, &bound.required, args)?;

        let params = to_provider_params(args);
        let raw = self.dispatch(&bound.path, Verb::Post, &params).await?;

        let batch = decode_result_file(&raw.body)?;
        if let Some(check) = opts.error_check {
            check(&batch)?;
        }

        match opts.http_component {
            Some(part) => Ok(FileReply::Raw(select_component(part, raw))),
            None => Ok(FileReply::Records(batch)),
        }
    }

    async fn call_form(
        &self,
        method: &str,
        args: &ParamMap,
        opts: CallOptions<'_>,
        verb_override: Option<Verb>,
    ) -> Result<Reply> {
        let bound = self.catalog.resolve(method)?;
        self.assert_required(method, &bound.required, args)?;

        let verb = verb_override.unwrap_or(bound.verb);
        // POST bodies use provider field names; GET query strings are sent
        // as supplied, matching the upstream dialect.
        let params = match verb {
            Verb::Post => to_provider_params(args),
            Verb::Get => args.clone(),
        };

        let raw = self.dispatch(&bound.path, verb, &params).await?;

        let fields = decode_form(&raw.body);
        if let Some(check) = opts.error_check {
            check(&fields)?;
        }

        match opts.http_component {
            Some(part) => Ok(Reply::Raw(select_component(part, raw))),
            None => Ok(Reply::Fields(fields)),
        }
    }

    /// Performs the single transport invocation and classifies 5xx.
    #[instrument(skip(self, params), fields(catalog = self.catalog.name(), verb = verb.as_str(), path))]
    async fn dispatch(&self, path: &str, verb: Verb, params: &ParamMap) -> Result<RawResponse> {
        let path = self.config.namespaced_path(path);
        let url = self.config.url_for(&path);

        let result = self.transport.send(verb, &url, params).await?;

        if result.status >= 500 {
            warn!(status = result.status, "gateway server error");
            return Err(MulpayError::ServerError {
                http_status: result.status,
                body: to_utf8(&result.body),
            });
        }

        debug!(status = result.status, bytes = result.body.len(), "gateway response");
        Ok(result)
    }

    fn assert_required(&self, method: &str, required: &[String], args: &ParamMap) -> Result<()> {
        let missing: Vec<String> = required
            .iter()
            .filter(|field| !args.contains_key(*field))
            .cloned()
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(MulpayError::MissingRequiredFields { method: method.to_owned(), missing })
        }
    }
}

fn select_component(part: HttpComponent, raw: RawResponse) -> RawComponent {
    match part {
        HttpComponent::Status => RawComponent::Status(raw.status),
        HttpComponent::Headers => RawComponent::Headers(raw.headers),
        HttpComponent::Body => RawComponent::Body(raw.body),
    }
}
