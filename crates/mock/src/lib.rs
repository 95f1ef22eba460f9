//! Testlab Mock
//!
//! A request-matching mock registry for test suites driving the host
//! automation framework's HTTP interception hook. The registry never
//! binds a socket: the host hands over already-parsed request
//! descriptors, and whatever response descriptor comes back is
//! serialized by the host.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  RegistryInterceptor (host hook adapter)                 │
//! │    intercept(request)                                    │
//! │      ├── record(request)         append-only log         │
//! │      ├── match_request(request)  first matching route    │
//! │      └── Responder::respond      fixed or generated      │
//! ├──────────────────────────────────────────────────────────┤
//! │  MockRegistry                                            │
//! │    ├── routes: Method bucket -> [MockRoute], in order    │
//! │    └── log: [MockRequest], cleared explicitly            │
//! ├──────────────────────────────────────────────────────────┤
//! │  RouteSet (YAML)                                         │
//! │    └── apply() registers routes in file order            │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod fixtures;
pub mod intercept;
pub mod registry;
pub mod route;

pub use error::{MockError, MockResult};
pub use fixtures::{ResponseSpec, RouteSet, RouteSpec};
pub use intercept::{RegistryInterceptor, RequestInterceptor, UnmatchedPolicy};
pub use registry::{MockRegistry, RequestFilter};
pub use route::{Method, MockRequest, MockResponse, MockRoute, PathPattern, Responder};
