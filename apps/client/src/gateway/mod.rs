//! Gateway: the single point of entry for every backend call.
//!
//! One HTTP client, one base URL, one timeout table. Each `Operation` carries its own
//! latency class, so the timeout applied to a call is never a caller decision.
//! Errors are handed to the observer and returned; nothing here retries.
#![allow(dead_code)]

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use reqwest::header::{HeaderMap, ACCEPT};
use reqwest::multipart::Form;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::{extract_detail, ClientError};

pub mod download;
pub mod endpoints;
pub mod observer;
pub mod operations;

pub use download::Download;
pub use observer::{GatewayObserver, TracingObserver};
pub use operations::{ExportKind, LatencyClass, Operation, ResponseKind, Route};

/// Accept header for export calls. Exports are PDFs or ZIPs, never JSON.
const BINARY_ACCEPT: &str = "application/octet-stream, application/pdf, application/zip";

/// Timeout per latency class. Fixed once the gateway is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutPolicy {
    pub standard: Duration,
    pub extended: Duration,
    pub fast: Duration,
}

impl Default for TimeoutPolicy {
    fn default() -> Self {
        Self {
            standard: Duration::from_secs(30),
            // Multiple LLM calls behind one request can exceed a minute.
            extended: Duration::from_secs(180),
            fast: Duration::from_secs(10),
        }
    }
}

impl TimeoutPolicy {
    pub fn timeout(&self, class: LatencyClass) -> Duration {
        match class {
            LatencyClass::Standard => self.standard,
            LatencyClass::Extended => self.extended,
            LatencyClass::Fast => self.fast,
        }
    }
}

/// A completed HTTP exchange with a 2xx status.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
    pub elapsed: Duration,
}

pub(crate) enum Payload {
    Empty,
    Json(Value),
    Multipart(Form),
}

#[derive(Clone)]
pub struct Gateway {
    http: Client,
    base_url: String,
    policy: TimeoutPolicy,
    observer: Arc<dyn GatewayObserver>,
}

impl Gateway {
    pub fn new(
        base_url: &str,
        policy: TimeoutPolicy,
        observer: Arc<dyn GatewayObserver>,
    ) -> Result<Self, ClientError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }

        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.to_string(),
            policy,
            observer,
        })
    }

    /// Default timeouts, tracing observer.
    pub fn with_defaults(base_url: &str) -> Result<Self, ClientError> {
        Self::new(base_url, TimeoutPolicy::default(), Arc::new(TracingObserver))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn policy(&self) -> TimeoutPolicy {
        self.policy
    }

    /// Runs one operation end to end: send, read the whole body, classify the status.
    /// The class timeout bounds all of it.
    pub(crate) async fn execute(
        &self,
        op: Operation,
        payload: Payload,
    ) -> Result<Exchange, ClientError> {
        let route = op.route();
        let url = format!("{}{}", self.base_url, route.path);
        let limit = self.policy.timeout(route.class);

        let mut request = self.http.request(route.method.clone(), &url);
        request = match payload {
            Payload::Empty => request,
            Payload::Json(body) => request.json(&body),
            Payload::Multipart(form) => request.multipart(form),
        };
        if route.response == ResponseKind::Binary {
            request = request.header(ACCEPT, BINARY_ACCEPT);
        }

        let result = with_deadline(route.operation, limit, exchange(request)).await;

        match &result {
            Ok(exchange) => self.observer.on_response(&route, exchange),
            Err(err) => self.observer.on_error(&route, err),
        }
        result
    }

    /// Executes and decodes a JSON body. A decode failure reaches the observer too.
    pub(crate) async fn json<T: DeserializeOwned>(
        &self,
        op: Operation,
        payload: Payload,
    ) -> Result<T, ClientError> {
        let exchange = self.execute(op, payload).await?;
        serde_json::from_slice(&exchange.body).map_err(|e| {
            let err = ClientError::Decode(e);
            self.observer.on_error(&op.route(), &err);
            err
        })
    }
}

async fn exchange(request: RequestBuilder) -> Result<Exchange, ClientError> {
    let started = Instant::now();
    let response = request.send().await?;
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.bytes().await?;

    if !status.is_success() {
        return Err(ClientError::Api {
            status: status.as_u16(),
            detail: extract_detail(&body),
        });
    }

    Ok(Exchange {
        status,
        headers,
        body,
        elapsed: started.elapsed(),
    })
}

/// Fails with `ClientError::Timeout` once `limit` elapses. There is no other cancellation.
async fn with_deadline<T>(
    operation: &'static str,
    limit: Duration,
    fut: impl Future<Output = Result<T, ClientError>>,
) -> Result<T, ClientError> {
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(ClientError::Timeout {
            operation,
            after: limit,
        }),
    }
}
