//! Client-side translation layer for the MULPAY payment gateway.
//!
//! The gateway speaks a text dialect of its own: requests are flat key-value
//! parameter sets, responses are `&`-separated `key=value` bodies (or, for
//! recurring result files, comma/CRLF-delimited fixed-field records), and
//! payloads may arrive in legacy Japanese encodings. This crate translates
//! between that dialect and ordinary Rust types.
//!
//! The moving parts:
//!
//! - [`params`] translates symbolic argument names (`order_id`) into the
//!   gateway's field names (`OrderID`).
//! - [`catalog`] binds symbolic method names to endpoint paths, verbs, and
//!   required fields, one table per product variant.
//! - [`transport`] is the injected network capability; [`transport::HttpTransport`]
//!   is the reqwest-backed production implementation.
//! - [`client`] dispatches calls: resolve, validate, send once, classify
//!   5xx, decode.
//! - [`decode`] turns raw body bytes into field maps or fixed-field records,
//!   normalizing text through [`encoding`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use mulpay::{
//!     client::{ApiClient, CallOptions, Reply, provider_error_check},
//!     config::GatewayConfig,
//!     params::ParamMap,
//! };
//!
//! # async fn example() -> mulpay::error::Result<()> {
//! let client = ApiClient::shop(GatewayConfig::new("p01.mul-pay.jp"))?;
//!
//! let mut args = ParamMap::new();
//! args.insert("shop_id".to_owned(), "tshop001".to_owned());
//! args.insert("shop_pass".to_owned(), "secret".to_owned());
//! args.insert("order_id".to_owned(), "order-0001".to_owned());
//! args.insert("job_cd".to_owned(), "AUTH".to_owned());
//! args.insert("amount".to_owned(), "1000".to_owned());
//!
//! let opts = CallOptions { error_check: Some(&provider_error_check), ..Default::default() };
//! if let Reply::Fields(body) = client.post("entry_tran", &args, opts).await? {
//!     println!("AccessID={}", body["AccessID"]);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod catalog;
pub mod client;
pub mod config;
pub mod decode;
pub mod encoding;
pub mod error;
pub mod params;
pub mod transport;

pub use catalog::{ApiMethod, MethodCatalog};
pub use client::{
    ApiClient, CallOptions, FileCallOptions, FileReply, HttpComponent, RawComponent, Reply,
    provider_error_check,
};
pub use config::GatewayConfig;
pub use decode::{FieldMap, RecurringResult, ResultFileBatch};
pub use error::{MulpayError, Result};
pub use params::ParamMap;
pub use transport::{HttpTransport, RawResponse, Transport, Verb};
