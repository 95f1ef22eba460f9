//! Route and request/response descriptor types

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::MockError;

/// The fixed set of HTTP verbs the registry understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = MockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            "HEAD" => Ok(Method::Head),
            "OPTIONS" => Ok(Method::Options),
            _ => Err(MockError::UnknownMethod(s.to_string())),
        }
    }
}

/// How a route decides whether it covers a URL.
#[derive(Debug, Clone)]
pub enum PathPattern {
    /// Matches any URL containing the string.
    Literal(String),

    /// Matches any URL the regex matches.
    Regex(Regex),
}

impl PathPattern {
    /// Compile a regex pattern.
    pub fn regex(pattern: &str) -> Result<Self, MockError> {
        Ok(PathPattern::Regex(Regex::new(pattern)?))
    }

    pub fn matches(&self, url: &str) -> bool {
        match self {
            PathPattern::Literal(fragment) => url.contains(fragment.as_str()),
            PathPattern::Regex(re) => re.is_match(url),
        }
    }
}

impl From<&str> for PathPattern {
    fn from(fragment: &str) -> Self {
        PathPattern::Literal(fragment.to_string())
    }
}

impl From<String> for PathPattern {
    fn from(fragment: String) -> Self {
        PathPattern::Literal(fragment)
    }
}

impl From<Regex> for PathPattern {
    fn from(re: Regex) -> Self {
        PathPattern::Regex(re)
    }
}

/// An already-parsed request descriptor, as delivered by the host
/// framework's interception hook. Doubles as the recorded-request log
/// entry; log entries are appended and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockRequest {
    pub method: Method,
    pub url: String,

    #[serde(default)]
    pub headers: HashMap<String, String>,

    #[serde(default)]
    pub body: Option<String>,
}

impl MockRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self { method, url: url.into(), headers: HashMap::new(), body: None }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Parse the body as JSON. Errors on a missing body as well as on
    /// malformed JSON.
    pub fn body_json(&self) -> Result<serde_json::Value, MockError> {
        let body = self.body.as_deref().unwrap_or("");
        Ok(serde_json::from_str(body)?)
    }
}

/// The response descriptor handed back to the host framework, which
/// takes care of serializing it onto the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockResponse {
    pub status: u16,

    #[serde(default)]
    pub headers: HashMap<String, String>,

    #[serde(default)]
    pub body: Option<serde_json::Value>,
}

impl MockResponse {
    /// An empty 200 response.
    pub fn ok() -> Self {
        Self::status(200)
    }

    /// An empty response with the given status.
    pub fn status(status: u16) -> Self {
        Self { status, headers: HashMap::new(), body: None }
    }

    /// A JSON response with the given status and body.
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self { status, headers: HashMap::new(), body: Some(body) }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Produces the response for a matched route: either a canned response
/// or a generator invoked per request.
pub enum Responder {
    Fixed(MockResponse),
    Fn(Box<dyn Fn(&MockRequest) -> MockResponse + Send + Sync>),
}

impl Responder {
    /// Wrap a response generator.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&MockRequest) -> MockResponse + Send + Sync + 'static,
    {
        Responder::Fn(Box::new(f))
    }

    pub fn respond(&self, request: &MockRequest) -> MockResponse {
        match self {
            Responder::Fixed(response) => response.clone(),
            Responder::Fn(f) => f(request),
        }
    }
}

impl fmt::Debug for Responder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Responder::Fixed(response) => f.debug_tuple("Fixed").field(response).finish(),
            Responder::Fn(_) => f.write_str("Fn(..)"),
        }
    }
}

impl From<MockResponse> for Responder {
    fn from(response: MockResponse) -> Self {
        Responder::Fixed(response)
    }
}

/// A registered (method, pattern) -> response mapping.
#[derive(Debug)]
pub struct MockRoute {
    pub method: Method,
    pub pattern: PathPattern,
    pub responder: Responder,
}

impl MockRoute {
    pub fn new(
        method: Method,
        pattern: impl Into<PathPattern>,
        responder: impl Into<Responder>,
    ) -> Self {
        Self { method, pattern: pattern.into(), responder: responder.into() }
    }

    pub fn matches(&self, request: &MockRequest) -> bool {
        self.method == request.method && self.pattern.matches(&request.url)
    }
}
