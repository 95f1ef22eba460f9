//! Declarative YAML route sets

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MockError, MockResult};
use crate::registry::MockRegistry;
use crate::route::{Method, MockResponse, MockRoute, PathPattern};

/// A named collection of routes parsed from YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteSet {
    /// Unique name for this set
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Routes to register, in order
    pub routes: Vec<RouteSpec>,
}

/// A single declarative route. Exactly one of `path` (literal substring
/// match) or `pattern` (regex) must be present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteSpec {
    pub method: Method,

    #[serde(default)]
    pub path: Option<String>,

    #[serde(default)]
    pub pattern: Option<String>,

    pub response: ResponseSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseSpec {
    #[serde(default = "default_status")]
    pub status: u16,

    #[serde(default)]
    pub headers: HashMap<String, String>,

    #[serde(default)]
    pub body: Option<serde_json::Value>,
}

fn default_status() -> u16 {
    200
}

impl RouteSpec {
    fn to_route(&self) -> MockResult<MockRoute> {
        let pattern = match (&self.path, &self.pattern) {
            (Some(path), None) => PathPattern::Literal(path.clone()),
            (None, Some(pattern)) => PathPattern::regex(pattern)?,
            (Some(_), Some(_)) => {
                return Err(MockError::RouteSpec(format!(
                    "{} route declares both `path` and `pattern`",
                    self.method
                )))
            }
            (None, None) => {
                return Err(MockError::RouteSpec(format!(
                    "{} route declares neither `path` nor `pattern`",
                    self.method
                )))
            }
        };

        let response = MockResponse {
            status: self.response.status,
            headers: self.response.headers.clone(),
            body: self.response.body.clone(),
        };

        Ok(MockRoute::new(self.method, pattern, response))
    }
}

impl RouteSet {
    /// Parse a route set from a YAML string
    pub fn from_yaml(yaml: &str) -> MockResult<Self> {
        serde_yaml::from_str(yaml).map_err(MockError::from)
    }

    /// Parse a route set from a YAML file
    pub fn from_file(path: &Path) -> MockResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load all route sets from a directory
    pub fn load_all(dir: &Path) -> MockResult<Vec<Self>> {
        let mut sets = Vec::new();

        for entry in walkdir::WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
            })
        {
            let set = Self::from_file(entry.path())?;
            sets.push(set);
        }

        Ok(sets)
    }

    /// Compile and register every route in file order, preserving the
    /// registry's first-match precedence within the set.
    pub fn apply(&self, registry: &mut MockRegistry) -> MockResult<()> {
        for spec in &self.routes {
            registry.register_route(spec.to_route()?);
        }
        debug!("Applied route set '{}' ({} routes)", self.name, self.routes.len());
        Ok(())
    }
}
