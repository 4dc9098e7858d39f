#![forbid(unsafe_code)]

//! Rust client for the Aeris Weather data API.
//!
//! A [`Client`] accumulates an endpoint, an action and query parameters through
//! chainable setters, compiles them into a request and sends it with a blocking
//! HTTP GET. Several requests can be bundled into one call with the batch API:
//! every [`Client::add_batch`] freezes the current state into a sub-request, so
//! parameters may change between entries.
//!
//! **Single request**
//! ```no_run
//! use aeris_weather::Client;
//!
//! let mut api = Client::new("my-client-id", "my-client-secret")?;
//! let json = api
//!     .endpoint("observations/summary")
//!     .action("closest")
//!     .place("94024")
//!     .process()?;
//! println!("{}", json["success"]);
//! # Ok::<(), aeris_weather::Error>(())
//! ```
//!
//! **Batch**
//! ```no_run
//! use aeris_weather::{Client, Envelope, Filter};
//!
//! let mut api = Client::from_env()?;
//! api.action("closest").place("-45.039948,168.695312").limit(1).filter(Filter::AllStations);
//! api.batch("observations,observations/summary")?;
//! api.limit(7).filter("day");
//! api.batch("forecasts")?;
//!
//! let env: Envelope = api.process_as()?;
//! for sub in env.batch()?.responses {
//!     println!("{} -> success={}", sub.request, sub.success);
//! }
//! # Ok::<(), aeris_weather::Error>(())
//! ```
//!
//! Notes:
//! - Parameters holding an empty string, zero or null are never sent.
//! - The batch queue is emptied as soon as a batch call is dispatched.
//! - Provider warnings such as `warn_no_data` come back as successful responses.

mod client;
mod credentials;
mod date;
mod error;
mod filter;
mod params;
mod response;
mod sources;
mod transport;
mod url_builder;

pub use crate::client::{BatchSpec, Client, ClientOptions};
pub use crate::credentials::{Credentials, ENV_CLIENT_ID, ENV_CLIENT_SECRET};
pub use crate::date::{Offset, OffsetUnit, parse_date_like};
pub use crate::error::{Error, Result};
pub use crate::filter::{Filter, UnknownFilter};
pub use crate::params::{ParamKey, ParamValue, Params};
pub use crate::response::{ApiError, BatchBody, Envelope, SubResponse};
pub use crate::sources::DEFAULT_BASE_URL;
pub use crate::transport::{HttpTransport, Transport};
pub use crate::url_builder::CompiledRequest;
