//! Blocking, typed client for the Paystack REST API.
//!
//! # Overview
//! Every resource service (products, refunds, splits, disputes, dedicated
//! accounts) delegates to one shared pipeline: encode the request, send it
//! with the bearer credential, then decode the `{status, message, data}`
//! envelope or map the failure to an `ApiError`.
//!
//! # Design
//! - `Dispatcher` holds only immutable state (credential, base URL, timeout,
//!   transport), so concurrent calls need no locking.
//! - The HTTP round trip sits behind the `Transport` trait; `UreqTransport`
//!   is the default and tests plug in a recording double.
//! - Calls block the current thread. `Dispatcher::call_with_deadline` bounds
//!   a call and fails with `ApiError::Timeout` once the deadline passes.
//! - Nothing is retried.
//!
//! ```no_run
//! use paystack_core::{Client, ClientConfig};
//!
//! # fn main() -> paystack_core::Result<()> {
//! let client = Client::new(ClientConfig::new("sk_test_xxx"))?;
//! let products = client.products().list()?;
//! println!("{} of {} products", products.len(), products.meta.total);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod decode;
pub mod dispatch;
pub mod encode;
pub mod error;
pub mod http;
pub mod pagination;
pub mod services;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::Client;
pub use config::{ClientConfig, SecretKey};
pub use decode::ResponseShape;
pub use dispatch::{Dispatcher, Endpoint, NO_BODY};
pub use encode::BodyEncoding;
pub use error::{ApiError, ErrorKind, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use pagination::{paginate_url, List, ListMeta, Page};
pub use transport::UreqTransport;
pub use types::{Acknowledgement, CustomerRef, Envelope, Metadata};
