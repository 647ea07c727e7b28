use reqwest::{header, Method, StatusCode};
use serde::de::DeserializeOwned;
use std::{
    future::Future,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc,
    },
};
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_API_BASE: &str = "https://greetings-and-worlds-api.brian-mabry-edwards.workers.dev";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP {code}: {reason}")]
    Status { code: u16, reason: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Failure raised by a [`Transport`] that is not backed by `reqwest`.
    #[error("request failed: {0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub content_type: &'static str,
    pub body: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// The wire underneath [`ApiClient`]. Production code uses [`HttpTransport`].
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, ClientError>> + Send;
}

#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let mut builder = self
            .http
            .request(request.method, &request.url)
            .header(header::CONTENT_TYPE, request.content_type);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();
        Ok(ApiResponse { status, body })
    }
}

/// Global loading indicator. Each call shows it and hides it again when its guard drops,
/// so overlapping calls hide it as soon as the first one settles.
#[derive(Debug, Clone, Default)]
pub struct Spinner {
    inner: Arc<SpinnerState>,
}

#[derive(Debug, Default)]
struct SpinnerState {
    visible: AtomicBool,
    shown: AtomicUsize,
    hidden: AtomicUsize,
}

impl Spinner {
    pub fn show(&self) -> SpinnerGuard {
        self.inner.visible.store(true, Ordering::SeqCst);
        self.inner.shown.fetch_add(1, Ordering::SeqCst);
        SpinnerGuard {
            spinner: self.clone(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.inner.visible.load(Ordering::SeqCst)
    }

    pub fn times_shown(&self) -> usize {
        self.inner.shown.load(Ordering::SeqCst)
    }

    pub fn times_hidden(&self) -> usize {
        self.inner.hidden.load(Ordering::SeqCst)
    }
}

#[must_use = "the spinner hides as soon as the guard is dropped"]
pub struct SpinnerGuard {
    spinner: Spinner,
}

impl Drop for SpinnerGuard {
    fn drop(&mut self) {
        let state = &self.spinner.inner;
        state.visible.store(false, Ordering::SeqCst);
        state.hidden.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct ApiClient<T> {
    base: String,
    transport: T,
    spinner: Spinner,
}

impl ApiClient<HttpTransport> {
    pub fn http(base: Option<&str>) -> Self {
        Self::new(base, HttpTransport::default())
    }
}

impl<T: Transport> ApiClient<T> {
    /// Falls back to [`DEFAULT_API_BASE`] when `base` is unset or blank.
    pub fn new(base: Option<&str>, transport: T) -> Self {
        let base = match base {
            Some(base) if !base.trim().is_empty() => base.trim_end_matches('/'),
            _ => DEFAULT_API_BASE,
        };
        Self {
            base: base.to_string(),
            transport,
            spinner: Spinner::default(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn spinner(&self) -> &Spinner {
        &self.spinner
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn get<R: DeserializeOwned>(&self, endpoint: &str) -> Result<R, ClientError> {
        self.fetch(endpoint, Method::GET, None).await
    }

    pub async fn post<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> Result<R, ClientError> {
        self.fetch(endpoint, Method::POST, Some(body.to_string())).await
    }

    async fn fetch<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<String>,
    ) -> Result<R, ClientError> {
        debug!("fetching {endpoint}");
        let _spinner = self.spinner.show();

        let request = ApiRequest {
            method,
            url: format!("{}{endpoint}", self.base),
            content_type: "application/json",
            body,
        };

        let result: Result<R, ClientError> = async {
            let response = self.transport.send(request).await?;
            if !response.status.is_success() {
                return Err(ClientError::Status {
                    code: response.status.as_u16(),
                    reason: response
                        .status
                        .canonical_reason()
                        .unwrap_or_default()
                        .to_string(),
                });
            }
            Ok(serde_json::from_slice(&response.body)?)
        }
        .await;

        if let Err(err) = &result {
            warn!("error fetching {endpoint}: {err}");
        }
        result
    }
}
