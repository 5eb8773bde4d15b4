//! The v2/package endpoints: single lookup and bulk `mget`.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::client::Client;
use crate::error::Error;
use crate::search::Score;

/// Raw information gathered about a package from its sources.
///
/// The service returns large, loosely-specified documents here; they are
/// exposed free-form rather than modeled field by field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Collected {
    /// Data collected from the npm registry.
    pub npm: Option<Value>,
    /// Normalized package metadata.
    pub metadata: Option<Value>,
    /// Data collected from GitHub, when a repository is linked.
    pub github: Option<Value>,
    /// Data collected from the source code itself.
    pub source: Option<Value>,
}

/// Per-dimension evaluation figures feeding the final score.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Evaluation {
    /// Quality evaluation figures.
    pub quality: Value,
    /// Popularity evaluation figures.
    pub popularity: Value,
    /// Maintenance evaluation figures.
    pub maintenance: Value,
}

/// Analysis of a single package from the package endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PackageResult {
    /// When the analysis ran, RFC 3339.
    pub analyzed_at: String,
    /// Collected source data.
    pub collected: Collected,
    /// Evaluation figures.
    pub evaluation: Evaluation,
    /// Aggregate score.
    pub score: Score,
    /// Analysis error, if the last run failed.
    pub error: Option<Value>,
}

/// Package analyses indexed by package name, as returned by `mget`.
pub type PackageMap = HashMap<String, PackageResult>;

impl Client {
    /// Fetch the analysis of a single package via GET `package/<name>`.
    ///
    /// The name is interpolated verbatim; scoped names are passed through
    /// unescaped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on transport failure, a non-2xx status, or
    /// an undecodable response body.
    pub async fn package(&self, name: &str) -> Result<PackageResult, Error> {
        self.get_json(&format!("package/{name}")).await
    }

    /// Fetch multiple package analyses via POST `package/mget`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on transport failure, a non-2xx status, or
    /// an undecodable response body.
    pub async fn packages(&self, names: &[&str]) -> Result<PackageMap, Error> {
        self.post_json("package/mget", names).await
    }
}
