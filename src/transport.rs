use std::time::Duration;

use log::warn;
use reqwest::blocking::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};

use crate::error::{Error, Result};

/// Performs `GET url?query` and returns the raw response body.
///
/// Retries and cancellation are the transport's business; [`crate::Client`]
/// calls it once per `process`.
pub trait Transport {
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<String>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<String> {
        (**self).get(url, query)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<String> {
        (**self).get(url, query)
    }
}

/// Blocking `reqwest` transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: HttpClient,
}

impl HttpTransport {
    pub fn new(user_agent: &str, timeout: Option<Duration>, verify_tls: bool) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("aeris-weather-rs")),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = HttpClient::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        if !verify_tls {
            builder = builder.danger_accept_invalid_certs(true);
        }
        Ok(Self { http: builder.build()? })
    }

    pub fn from_client(http: HttpClient) -> Self {
        Self { http }
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<String> {
        let resp = self.http.get(url).query(query).send()?;
        let status = resp.status();
        let body = resp.text()?;
        if !status.is_success() {
            warn!("{url} answered with status {status}");
            return Err(Error::Status { status: status.as_u16(), body });
        }
        Ok(body)
    }
}
