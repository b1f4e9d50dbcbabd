//! manifest
//!
//! Declarative component manifests.
//!
//! # Overview
//!
//! A manifest lists named components and their dependency edges, in TOML
//! or JSON, and is the usual way a batch reaches the verifier: load the
//! manifest, build the vertex batch, sort it, start components in order.
//!
//! # Format
//!
//! ```toml
//! [components.store]
//! description = "persistence layer"
//!
//! [components.engine]
//! depends-on = ["store"]
//!
//! [components.api]
//! depends-on = ["engine", "store"]
//! ```
//!
//! # Example
//!
//! ```
//! use strata::manifest::Manifest;
//!
//! let manifest = Manifest::from_toml_str(r#"
//!     [components.store]
//!     [components.engine]
//!     depends-on = ["store"]
//! "#).unwrap();
//!
//! let order = manifest.startup_order().unwrap();
//! let names: Vec<&str> = order.iter().map(|n| n.as_str()).collect();
//! assert_eq!(names, ["store", "engine"]);
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::types::{TypeError, VertexName};
use crate::verify::{self, GraphError};
use crate::vertex::Vertex;

/// Errors from manifest operations.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse manifest '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("unsupported manifest format '{path}': expected .toml or .json")]
    UnsupportedFormat { path: PathBuf },

    #[error("invalid name in component '{component}': {source}")]
    InvalidName {
        component: String,
        source: TypeError,
    },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// One component entry in a manifest.
///
/// Unknown fields are rejected so a typo like `depends_on` fails loudly
/// instead of silently dropping edges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentSpec {
    /// Names of components that must be ready before this one.
    #[serde(default, rename = "depends-on", skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,

    /// Free-form description, surfaced to operators only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A parsed component manifest.
///
/// Components are keyed by name in a `BTreeMap`, so batch construction
/// and therefore startup ordering are deterministic across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub components: BTreeMap<String, ComponentSpec>,
}

impl Manifest {
    /// Parse a manifest from TOML text.
    ///
    /// # Errors
    ///
    /// `ManifestError::ParseError` with the path recorded as `<string>`.
    pub fn from_toml_str(text: &str) -> Result<Self, ManifestError> {
        toml::from_str(text).map_err(|e| ManifestError::ParseError {
            path: PathBuf::from("<string>"),
            message: e.to_string(),
        })
    }

    /// Parse a manifest from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ManifestError> {
        serde_json::from_str(text).map_err(|e| ManifestError::ParseError {
            path: PathBuf::from("<string>"),
            message: e.to_string(),
        })
    }

    /// Load a manifest from a `.toml` or `.json` file, dispatching on the
    /// extension.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let extension = path.extension().and_then(|e| e.to_str());
        let parse: fn(&str) -> Result<Self, ManifestError> = match extension {
            Some("toml") => Self::from_toml_str,
            Some("json") => Self::from_json_str,
            _ => {
                return Err(ManifestError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        let text = fs::read_to_string(path).map_err(|source| ManifestError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "loaded component manifest");

        parse(&text).map_err(|e| match e {
            // Re-anchor the diagnostic on the real path.
            ManifestError::ParseError { message, .. } => ManifestError::ParseError {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    /// Build the verification batch described by this manifest.
    ///
    /// Every component name and every `depends-on` entry is validated
    /// into a [`VertexName`]. Referential completeness and acyclicity are
    /// the verifier's job, not checked here.
    pub fn vertices(&self) -> Result<Vec<Vertex<ComponentSpec>>, ManifestError> {
        let mut batch = Vec::with_capacity(self.components.len());
        for (component, spec) in &self.components {
            let name = VertexName::new(component.clone()).map_err(|source| {
                ManifestError::InvalidName {
                    component: component.clone(),
                    source,
                }
            })?;
            let mut vertex = Vertex::new(name, spec.clone());
            for dependency in &spec.depends_on {
                let dependency = VertexName::new(dependency.clone()).map_err(|source| {
                    ManifestError::InvalidName {
                        component: component.clone(),
                        source,
                    }
                })?;
                vertex.add_dependency(dependency);
            }
            batch.push(vertex);
        }
        Ok(batch)
    }

    /// Compute the startup order for this manifest's components.
    ///
    /// Dependencies come before dependents; the reverse of the returned
    /// sequence is a valid shutdown order.
    ///
    /// # Errors
    ///
    /// Name validation failures, plus every [`GraphError`] the verifier
    /// can report (cycles, dangling `depends-on` entries).
    pub fn startup_order(&self) -> Result<Vec<VertexName>, ManifestError> {
        let mut batch = self.vertices()?;
        verify::topological_sort(&mut batch)?;
        Ok(batch.into_iter().map(|v| v.name().clone()).collect())
    }
}
