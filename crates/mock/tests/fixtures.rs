//! Route-set files loaded from disk

use std::fs;

use tracing_subscriber::EnvFilter;

use testlab_mock::{Method, MockRegistry, MockRequest, RouteSet};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

const USERS_SET: &str = r#"
name: users-api
description: Canned /api/users responses
routes:
  - method: GET
    path: /api/users
    response:
      status: 200
      body: [{ id: 1 }]
  - method: GET
    pattern: "^/api/users/\\d+$"
    response:
      status: 404
"#;

const HEALTH_SET: &str = r#"
name: health
routes:
  - method: GET
    path: /health
    response:
      status: 200
      headers:
        content-type: text/plain
"#;

#[test]
fn load_all_discovers_yaml_and_yml_files() {
    init_logging();

    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("users.yaml"), USERS_SET).unwrap();
    fs::write(dir.path().join("health.yml"), HEALTH_SET).unwrap();
    fs::write(dir.path().join("notes.txt"), "not a route set").unwrap();

    let sets = RouteSet::load_all(dir.path()).expect("loads");
    assert_eq!(sets.len(), 2);

    let mut registry = MockRegistry::new();
    for set in &sets {
        set.apply(&mut registry).expect("applies");
    }
    assert_eq!(registry.route_count(), 3);

    assert!(registry.match_request(&MockRequest::new(Method::Get, "/health")).is_some());
    assert!(registry.match_request(&MockRequest::new(Method::Get, "/api/users/9")).is_some());
}

#[test]
fn from_file_round_trips_a_single_set() {
    init_logging();

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("users.yaml");
    fs::write(&path, USERS_SET).unwrap();

    let set = RouteSet::from_file(&path).expect("parses");
    assert_eq!(set.name, "users-api");
    assert_eq!(set.routes.len(), 2);

    let mut registry = MockRegistry::new();
    set.apply(&mut registry).expect("applies");

    let request = MockRequest::new(Method::Get, "/api/users/42");
    // The literal "/api/users" route was registered first and also
    // matches by substring, so it wins over the 404 pattern route
    let response = registry.match_request(&request).unwrap().responder.respond(&request);
    assert_eq!(response.status, 200);
}

#[test]
fn malformed_file_surfaces_a_parse_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.yaml");
    fs::write(&path, "routes: [").unwrap();

    assert!(RouteSet::from_file(&path).is_err());
}
