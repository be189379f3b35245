use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::Form;
use reqwest::Method;
use serde::Serialize;

#[derive(Debug)]
pub(crate) enum Body {
    Empty,
    Json(Vec<u8>),
    Multipart(Form),
    /// Serialization failed while building the request; reported on send.
    Invalid(String),
}

/// Whether the held bearer token goes out with the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AuthPolicy {
    Attach,
    Skip,
}

/// Everything needed to issue one backend call. Built per call and consumed
/// by `ApiClient::send`.
#[derive(Debug)]
pub struct ApiRequest {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) body: Body,
    pub(crate) headers: HeaderMap,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) timeout: Option<Duration>,
    pub(crate) auth: AuthPolicy,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: Body::Empty,
            headers: HeaderMap::new(),
            query: Vec::new(),
            timeout: None,
            auth: AuthPolicy::Attach,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        self.body = match serde_json::to_vec(body) {
            Ok(bytes) => Body::Json(bytes),
            Err(e) => Body::Invalid(e.to_string()),
        };
        self
    }

    pub fn multipart(mut self, form: Form) -> Self {
        self.body = Body::Multipart(form);
        self
    }

    /// Override or add a header. Applied after the defaults.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn query_param(mut self, name: &str, value: impl ToString) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    /// Replace the client's default timeout for this call only.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Never send the bearer token, even when one is held.
    pub fn without_auth(mut self) -> Self {
        self.auth = AuthPolicy::Skip;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}
