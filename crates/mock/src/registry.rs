//! The request-matching mock registry
//!
//! One registry per test context, constructed explicitly and passed by
//! reference to whatever drives it. There is no process-global
//! instance, so nothing leaks across tests. Registration and recording
//! happen from a single logical test context at a time; no locking is
//! implemented or required.

use std::collections::HashMap;

use tracing::debug;

use crate::route::{Method, MockRequest, MockRoute, PathPattern, Responder};

/// Declarative (method, pattern) -> response routes plus an append-only
/// log of every request observed.
///
/// Route lookup is deterministic: for a given (method, url) the first
/// registered route whose pattern matches wins, and repeated lookups
/// select the same winner until routes are added or removed.
#[derive(Debug, Default)]
pub struct MockRegistry {
    routes: HashMap<Method, Vec<MockRoute>>,
    log: Vec<MockRequest>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route under its method bucket. Later routes for the same
    /// method never replace earlier ones; they are tried after them.
    pub fn register(
        &mut self,
        method: Method,
        pattern: impl Into<PathPattern>,
        responder: impl Into<Responder>,
    ) {
        self.register_route(MockRoute::new(method, pattern, responder));
    }

    pub fn register_route(&mut self, route: MockRoute) {
        debug!("Registering mock route {} {:?}", route.method, route.pattern);
        self.routes.entry(route.method).or_default().push(route);
    }

    /// The first registered route covering the request, scanning the
    /// request's method bucket in registration order. `None` is a plain
    /// miss, not an error; the caller decides whether that is fatal.
    pub fn match_request(&self, request: &MockRequest) -> Option<&MockRoute> {
        self.routes
            .get(&request.method)?
            .iter()
            .find(|route| route.pattern.matches(&request.url))
    }

    /// Append to the request log. Recording is independent of matching.
    pub fn record(&mut self, request: MockRequest) {
        self.log.push(request);
    }

    /// Every recorded request, in insertion order.
    pub fn requests(&self) -> &[MockRequest] {
        &self.log
    }

    /// Recorded requests passing the filter, in insertion order.
    pub fn query(&self, filter: &RequestFilter) -> Vec<&MockRequest> {
        self.log.iter().filter(|request| filter.accepts(request)).collect()
    }

    /// Reset routes and log together; no partially cleared state is
    /// observable.
    pub fn clear(&mut self) {
        self.routes.clear();
        self.log.clear();
    }

    /// Reset the request log, keeping registered routes.
    pub fn clear_requests(&mut self) {
        self.log.clear();
    }

    pub fn route_count(&self) -> usize {
        self.routes.values().map(Vec::len).sum()
    }
}

/// Criteria for [`MockRegistry::query`]; unset fields accept everything.
#[derive(Debug, Clone, Default)]
pub struct RequestFilter {
    pub method: Option<Method>,
    pub url_contains: Option<String>,
}

impl RequestFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn url_contains(mut self, fragment: impl Into<String>) -> Self {
        self.url_contains = Some(fragment.into());
        self
    }

    fn accepts(&self, request: &MockRequest) -> bool {
        self.method.map_or(true, |method| method == request.method)
            && self
                .url_contains
                .as_deref()
                .map_or(true, |fragment| request.url.contains(fragment))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::route::MockResponse;

    fn get(url: &str) -> MockRequest {
        MockRequest::new(Method::Get, url)
    }

    #[test]
    fn first_registered_route_wins() {
        let mut registry = MockRegistry::new();
        registry.register(Method::Get, "/a", MockResponse::json(200, json!({ "which": 1 })));
        registry.register(Method::Get, "/a", MockResponse::json(200, json!({ "which": 2 })));

        let route = registry.match_request(&get("/a")).expect("matches");
        let response = route.responder.respond(&get("/a"));
        assert_eq!(response.body.unwrap()["which"], 1);
    }

    #[test]
    fn lookup_is_deterministic_until_routes_change() {
        let mut registry = MockRegistry::new();
        registry.register(Method::Get, "/api", MockResponse::status(200));
        registry.register(Method::Get, "/api/users", MockResponse::status(201));

        let request = get("/api/users");
        let first = registry.match_request(&request).expect("matches").responder.respond(&request);
        let second = registry.match_request(&request).expect("matches").responder.respond(&request);
        // "/api" is a substring of "/api/users", so the earlier, broader
        // route wins both times
        assert_eq!(first.status, 200);
        assert_eq!(second.status, 200);
    }

    #[test]
    fn buckets_are_per_method() {
        let mut registry = MockRegistry::new();
        registry.register(Method::Post, "/api/users", MockResponse::status(201));

        assert!(registry.match_request(&get("/api/users")).is_none());
        assert!(registry
            .match_request(&MockRequest::new(Method::Post, "/api/users"))
            .is_some());
    }

    #[test]
    fn miss_is_none_not_error() {
        let registry = MockRegistry::new();
        assert!(registry.match_request(&get("/anything")).is_none());
    }

    #[test]
    fn query_filters_preserve_insertion_order() {
        let mut registry = MockRegistry::new();
        registry.record(get("/api/users"));
        registry.record(MockRequest::new(Method::Post, "/api/users"));
        registry.record(get("/api/teams"));

        let gets = registry.query(&RequestFilter::new().method(Method::Get));
        assert_eq!(gets.len(), 2);
        assert_eq!(gets[0].url, "/api/users");
        assert_eq!(gets[1].url, "/api/teams");

        let users = registry.query(&RequestFilter::new().url_contains("/api/users"));
        assert_eq!(users.len(), 2);

        let both = registry
            .query(&RequestFilter::new().method(Method::Post).url_contains("/api/users"));
        assert_eq!(both.len(), 1);
    }

    #[test]
    fn empty_filter_returns_everything() {
        let mut registry = MockRegistry::new();
        assert!(registry.query(&RequestFilter::new()).is_empty());

        registry.record(get("/api/users"));
        assert_eq!(registry.query(&RequestFilter::new().method(Method::Get)).len(), 1);
    }

    #[test]
    fn clear_resets_routes_and_log_together() {
        let mut registry = MockRegistry::new();
        registry.register(Method::Get, "/a", MockResponse::ok());
        registry.record(get("/a"));

        registry.clear();

        assert_eq!(registry.route_count(), 0);
        assert!(registry.requests().is_empty());
    }

    #[test]
    fn clear_requests_keeps_routes() {
        let mut registry = MockRegistry::new();
        registry.register(Method::Get, "/a", MockResponse::ok());
        registry.record(get("/a"));

        registry.clear_requests();

        assert_eq!(registry.route_count(), 1);
        assert!(registry.requests().is_empty());
    }
}
