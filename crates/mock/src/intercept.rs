//! Adapter onto the host framework's request-interception hook
//!
//! The host automation framework parses requests off the wire and calls
//! the hook with a descriptor; whatever descriptor comes back is
//! serialized by the host. Nothing here binds a socket.

use tracing::{debug, warn};

use crate::registry::MockRegistry;
use crate::route::{MockRequest, MockResponse};

/// The seam the host framework drives. Returning `None` tells the host
/// to let the request continue to its real destination.
pub trait RequestInterceptor {
    fn intercept(&mut self, request: MockRequest) -> Option<MockResponse>;
}

/// What to do with a request no registered route matches. A miss is
/// never an error at the registry level; the caller picks the outcome.
#[derive(Debug, Clone)]
pub enum UnmatchedPolicy {
    /// Let the request through to the real destination.
    Passthrough,

    /// Serve a fixed fallback response.
    Respond(MockResponse),
}

/// Serves a [`MockRegistry`] through the interception hook.
///
/// Every observed request is recorded before matching, so assertions
/// made afterwards see unmatched traffic too.
#[derive(Debug)]
pub struct RegistryInterceptor {
    registry: MockRegistry,
    unmatched: UnmatchedPolicy,
}

impl RegistryInterceptor {
    pub fn new(registry: MockRegistry) -> Self {
        Self::with_unmatched(registry, UnmatchedPolicy::Passthrough)
    }

    pub fn with_unmatched(registry: MockRegistry, unmatched: UnmatchedPolicy) -> Self {
        Self { registry, unmatched }
    }

    pub fn registry(&self) -> &MockRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut MockRegistry {
        &mut self.registry
    }

    /// Tear down the adapter and keep the registry, typically to run
    /// assertions over the request log.
    pub fn into_registry(self) -> MockRegistry {
        self.registry
    }
}

impl RequestInterceptor for RegistryInterceptor {
    fn intercept(&mut self, request: MockRequest) -> Option<MockResponse> {
        self.registry.record(request.clone());

        match self.registry.match_request(&request) {
            Some(route) => {
                debug!("Serving {} {} from mock route", request.method, request.url);
                Some(route.responder.respond(&request))
            }
            None => match &self.unmatched {
                UnmatchedPolicy::Passthrough => {
                    warn!("No mock route for {} {}, passing through", request.method, request.url);
                    None
                }
                UnmatchedPolicy::Respond(fallback) => {
                    warn!("No mock route for {} {}, serving fallback", request.method, request.url);
                    Some(fallback.clone())
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::registry::RequestFilter;
    use crate::route::Method;

    #[test]
    fn matched_requests_are_served_and_recorded() {
        let mut registry = MockRegistry::new();
        registry.register(Method::Get, "/api/users", MockResponse::json(200, json!([{ "id": 1 }])));

        let mut interceptor = RegistryInterceptor::new(registry);
        let response = interceptor
            .intercept(MockRequest::new(Method::Get, "/api/users"))
            .expect("route matches");

        assert_eq!(response.status, 200);
        assert_eq!(interceptor.registry().requests().len(), 1);
    }

    #[test]
    fn unmatched_requests_are_recorded_then_passed_through() {
        let mut interceptor = RegistryInterceptor::new(MockRegistry::new());

        let response = interceptor.intercept(MockRequest::new(Method::Get, "/not-mocked"));

        assert!(response.is_none());
        let registry = interceptor.into_registry();
        assert_eq!(registry.query(&RequestFilter::new().url_contains("/not-mocked")).len(), 1);
    }

    #[test]
    fn unmatched_requests_can_serve_a_fallback() {
        let mut interceptor = RegistryInterceptor::with_unmatched(
            MockRegistry::new(),
            UnmatchedPolicy::Respond(MockResponse::status(502)),
        );

        let response = interceptor
            .intercept(MockRequest::new(Method::Get, "/not-mocked"))
            .expect("fallback is served");

        assert_eq!(response.status, 502);
    }
}
