use std::time::Duration;

use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::credentials::Credentials;
use crate::error::{Error, Result};
use crate::params::{ParamKey, ParamValue, Params};
use crate::sources::{DEFAULT_BASE_URL, is_http_url, normalize_base_url};
use crate::transport::{HttpTransport, Transport};
use crate::url_builder::{
    CompiledRequest, REQUESTS_PARAM, batch_url, join_batch_entries, leaf_url,
};

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Option<Duration>,
    pub verify_tls: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: concat!("aeris-weather-rs/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Some(Duration::from_secs(30)),
            verify_tls: true,
        }
    }
}

/// Endpoint names for [`Client::batch`]: either one comma-separated string or a list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSpec(Vec<String>);

impl BatchSpec {
    fn from_items<S: AsRef<str>>(items: impl IntoIterator<Item = S>) -> Self {
        Self(
            items
                .into_iter()
                .map(|s| s.as_ref().trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }
}

impl From<&str> for BatchSpec {
    fn from(value: &str) -> Self {
        Self::from_items(value.split(','))
    }
}

impl From<String> for BatchSpec {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Vec<&str>> for BatchSpec {
    fn from(value: Vec<&str>) -> Self {
        Self::from_items(value)
    }
}

impl From<Vec<String>> for BatchSpec {
    fn from(value: Vec<String>) -> Self {
        Self::from_items(value)
    }
}

impl<const N: usize> From<[&str; N]> for BatchSpec {
    fn from(value: [&str; N]) -> Self {
        Self::from_items(value)
    }
}

/// Stateful request builder for the Aeris API.
///
/// Endpoint, action and parameters accumulate across calls. [`Client::add_batch`]
/// freezes the current state into a `path?query` string; once anything is queued,
/// [`Client::process`] sends a single batch call instead of a plain request.
///
/// ```no_run
/// use aeris_weather::{Client, Filter};
///
/// let mut api = Client::new("my-id", "my-secret")?;
/// let json = api
///     .endpoint("observations/summary")
///     .action("closest")
///     .place("-45.039948,168.695312")
///     .filter(Filter::AllStations)
///     .limit(1)
///     .process()?;
/// println!("{json}");
/// # Ok::<(), aeris_weather::Error>(())
/// ```
#[derive(Debug)]
pub struct Client<T = HttpTransport> {
    credentials: Credentials,
    base_url: String,
    transport: T,
    endpoint: String,
    action: String,
    params: Params,
    batch_queue: Vec<String>,
    last_request: Option<CompiledRequest>,
}

impl Client<HttpTransport> {
    /// Fails with [`Error::MissingAppId`] / [`Error::MissingSecretKey`] when a credential is empty.
    pub fn new(app_id: impl Into<String>, secret_key: impl Into<String>) -> Result<Self> {
        Self::with_options(Credentials::new(app_id, secret_key)?, ClientOptions::default())
    }

    /// Credentials from `AERIS_CLIENT_ID` / `AERIS_CLIENT_SECRET`.
    pub fn from_env() -> Result<Self> {
        Self::with_options(Credentials::from_env()?, ClientOptions::default())
    }

    pub fn with_options(credentials: Credentials, opts: ClientOptions) -> Result<Self> {
        let transport = HttpTransport::new(&opts.user_agent, opts.timeout, opts.verify_tls)?;
        Self::with_transport(credentials, opts, transport)
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(credentials: Credentials, opts: ClientOptions, transport: T) -> Result<Self> {
        if !is_http_url(&opts.base_url) {
            return Err(Error::Url(url::ParseError::RelativeUrlWithoutBase));
        }
        let base_url = normalize_base_url(&opts.base_url);
        Url::parse(&base_url)?;

        Ok(Self {
            credentials,
            base_url,
            transport,
            endpoint: String::new(),
            action: String::new(),
            params: Params::default(),
            batch_queue: Vec::new(),
            last_request: None,
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn current_endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn current_action(&self) -> &str {
        &self.action
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Frozen `path?query` strings waiting to be sent as one batch call.
    pub fn batch_requests(&self) -> &[String] {
        &self.batch_queue
    }

    /// The request most recently handed to the transport by [`Client::process`].
    pub fn last_request(&self) -> Option<&CompiledRequest> {
        self.last_request.as_ref()
    }

    pub fn set_param(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> &mut Self {
        self.params.set(name, value);
        self
    }

    /// Merge several parameters; keys not mentioned keep their values.
    pub fn set_params<K, V>(&mut self, pairs: impl IntoIterator<Item = (K, V)>) -> &mut Self
    where
        K: Into<String>,
        V: Into<ParamValue>,
    {
        self.params.merge(pairs);
        self
    }

    pub fn set_key(&mut self, key: ParamKey, value: impl Into<ParamValue>) -> &mut Self {
        self.set_param(key.as_str(), value)
    }

    /// Set a parameter to null so it is left out of later requests.
    pub fn clear_param(&mut self, name: impl Into<String>) -> &mut Self {
        self.set_param(name, ParamValue::Null)
    }

    pub fn clear_key(&mut self, key: ParamKey) -> &mut Self {
        self.clear_param(key.as_str())
    }

    pub fn reset_params(&mut self) -> &mut Self {
        self.params = Params::default();
        self
    }

    pub fn place(&mut self, v: impl Into<ParamValue>) -> &mut Self {
        self.set_key(ParamKey::Place, v)
    }

    pub fn endpoint(&mut self, name: impl Into<String>) -> &mut Self {
        self.endpoint = name.into();
        self
    }

    pub fn action(&mut self, name: impl Into<String>) -> &mut Self {
        self.action = name.into();
        self
    }

    // One setter per documented parameter.
    pub fn limit(&mut self, v: impl Into<ParamValue>) -> &mut Self {
        self.set_key(ParamKey::Limit, v)
    }

    pub fn p(&mut self, v: impl Into<ParamValue>) -> &mut Self {
        self.set_key(ParamKey::Place, v)
    }

    pub fn radius(&mut self, v: impl Into<ParamValue>) -> &mut Self {
        self.set_key(ParamKey::Radius, v)
    }

    /// Any filter string is accepted, including composites like `allstations,1hr`.
    pub fn filter(&mut self, v: impl Into<ParamValue>) -> &mut Self {
        self.set_key(ParamKey::Filter, v)
    }

    pub fn query(&mut self, v: impl Into<ParamValue>) -> &mut Self {
        self.set_key(ParamKey::Query, v)
    }

    pub fn sort(&mut self, v: impl Into<ParamValue>) -> &mut Self {
        self.set_key(ParamKey::Sort, v)
    }

    pub fn skip(&mut self, v: impl Into<ParamValue>) -> &mut Self {
        self.set_key(ParamKey::Skip, v)
    }

    pub fn from(&mut self, v: impl Into<ParamValue>) -> &mut Self {
        self.set_key(ParamKey::From, v)
    }

    pub fn to(&mut self, v: impl Into<ParamValue>) -> &mut Self {
        self.set_key(ParamKey::To, v)
    }

    pub fn plimit(&mut self, v: impl Into<ParamValue>) -> &mut Self {
        self.set_key(ParamKey::PLimit, v)
    }

    pub fn psort(&mut self, v: impl Into<ParamValue>) -> &mut Self {
        self.set_key(ParamKey::PSort, v)
    }

    pub fn pskip(&mut self, v: impl Into<ParamValue>) -> &mut Self {
        self.set_key(ParamKey::PSkip, v)
    }

    pub fn callback(&mut self, v: impl Into<ParamValue>) -> &mut Self {
        self.set_key(ParamKey::Callback, v)
    }

    pub fn fields(&mut self, v: impl Into<ParamValue>) -> &mut Self {
        self.set_key(ParamKey::Fields, v)
    }

    /// Queue one batch entry per endpoint, each compiled from the state at this moment.
    ///
    /// Stops at the first endpoint that cannot be compiled; entries queued before it stay.
    pub fn batch(&mut self, spec: impl Into<BatchSpec>) -> Result<&mut Self> {
        for endpoint in spec.into().0 {
            self.add_batch(endpoint)?;
        }
        Ok(self)
    }

    /// Switch to `endpoint` and queue the current state as a batch entry.
    pub fn add_batch(&mut self, endpoint: impl Into<String>) -> Result<&mut Self> {
        self.endpoint(endpoint);
        self.add_batch_current()
    }

    /// Queue the current endpoint/action/parameters as a batch entry.
    pub fn add_batch_current(&mut self) -> Result<&mut Self> {
        let entry = self.compile_url(true)?.to_batch_entry();
        debug!("queued batch request #{}: {entry}", self.batch_queue.len() + 1);
        self.batch_queue.push(entry);
        Ok(self)
    }

    /// Clear endpoint, action and batch queue, and restore default parameters.
    pub fn reset(&mut self) -> &mut Self {
        self.endpoint.clear();
        self.action.clear();
        self.batch_queue.clear();
        self.reset_params()
    }

    pub fn reset_batch(&mut self) -> &mut Self {
        self.batch_queue.clear();
        self
    }

    /// Compile the current state into a URL and outbound parameters.
    ///
    /// With `batch_mode` the result is a single leaf rooted at `/`, without
    /// credentials, ready to be embedded in a batch call. Otherwise a non-empty
    /// batch queue produces `<base>batch?requests=...`, and an empty one a plain
    /// `<base><endpoint>/<action>` request. Falsy parameters are never sent.
    pub fn compile_url(&self, batch_mode: bool) -> Result<CompiledRequest> {
        let root = if batch_mode { "/" } else { self.base_url.as_str() };

        let (url, mut params) = if self.batch_queue.is_empty() || batch_mode {
            (
                leaf_url(root, &self.endpoint, &self.action)?,
                self.params.outbound(),
            )
        } else {
            // Each entry already carries its own parameters.
            let requests = join_batch_entries(&self.batch_queue);
            (batch_url(root), vec![(REQUESTS_PARAM.to_string(), requests)])
        };

        if !batch_mode {
            params.extend(self.credentials.query_pairs());
        }

        Ok(CompiledRequest { url, params })
    }

    /// [`Client::compile_url`] for a top-level request.
    pub fn compile(&self) -> Result<CompiledRequest> {
        self.compile_url(false)
    }

    /// Compile, send and parse the response body as JSON.
    ///
    /// On a compile error nothing is sent and no state changes. Otherwise the
    /// batch queue is cleared before the network call, whatever its outcome.
    pub fn process(&mut self) -> Result<Value> {
        let request = self.compile().inspect_err(|e| debug!("not sending request: {e}"))?;

        if !self.batch_queue.is_empty() {
            debug!("sending {} batched requests", self.batch_queue.len());
            self.reset_batch();
        }

        info!("GET {}", request.url);
        debug!("query: {}", redacted_query(&request));
        self.last_request = Some(request.clone());

        let body = self
            .transport
            .get(&request.url, &request.params)
            .inspect_err(|e| warn!("request to {} failed: {e}", request.url))?;

        match serde_json::from_str::<Value>(&body) {
            Ok(json) => Ok(json),
            Err(source) => {
                warn!("response from {} is not valid json: {source}", request.url);
                Err(Error::Parse { source, body })
            }
        }
    }

    /// Callback flavour of [`Client::process`].
    pub fn process_with<R>(&mut self, callback: impl FnOnce(Result<Value>) -> R) -> R {
        let result = self.process();
        callback(result)
    }

    /// [`Client::process`] and deserialize, e.g. into [`crate::Envelope`].
    pub fn process_as<D: DeserializeOwned>(&mut self) -> Result<D> {
        Ok(serde_json::from_value(self.process()?)?)
    }
}

fn redacted_query(request: &CompiledRequest) -> String {
    let visible: Vec<(String, String)> = request
        .params
        .iter()
        .filter(|(k, _)| k != "client_secret")
        .cloned()
        .collect();
    crate::url_builder::encode_query(&visible)
}
