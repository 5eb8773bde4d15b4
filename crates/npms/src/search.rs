//! The v2/search and v2/search/suggestions endpoints.
//!
//! Response records mirror the service's JSON loosely: optional fields are
//! `Option`, free-form fields are [`serde_json::Value`], and missing fields
//! decode to their defaults. Responses are not otherwise validated.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::Client;
use crate::error::Error;
use crate::qualifiers::{SearchQualifiers, search_query};

/// The default (and maximum) result count of the suggestions endpoint.
pub const MAX_SUGGESTIONS: usize = 100;

/// Parameters for the search and suggestions endpoints.
///
/// `q` carries the combined free-text query and qualifier string; use
/// [`SearchParams::new`] to build it from a [`SearchQualifiers`]. An empty
/// `q` is omitted from the request rather than sent blank.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchParams {
    /// Free-text query plus serialized qualifiers.
    #[serde(skip_serializing_if = "str::is_empty")]
    pub q: String,
    /// Number of results to return (service default: 25).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    /// Offset of the first result, for pagination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<u32>,
}

impl SearchParams {
    /// Build params from a free-text query and optional qualifiers.
    pub fn new(q: &str, qualifiers: Option<&SearchQualifiers>) -> Self {
        Self {
            q: search_query(q, qualifiers),
            size: None,
            from: None,
        }
    }

    /// Set the number of results to return.
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the offset of the first result.
    pub fn with_from(mut self, from: u32) -> Self {
        self.from = Some(from);
        self
    }
}

/// External links attached to a package record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Links {
    /// Link to the package on the npm registry.
    pub npm: Option<String>,
    /// Package homepage.
    pub homepage: Option<String>,
    /// Source repository.
    pub repository: Option<String>,
    /// Issue tracker.
    pub bugs: Option<String>,
}

/// A package description as returned inside search results.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Package {
    /// Package name.
    pub name: String,
    /// Scope of the package (`unscoped`, or the `@scope` name).
    pub scope: Option<String>,
    /// Latest analyzed version.
    pub version: String,
    /// Package description.
    pub description: Option<String>,
    /// Keywords declared in the package manifest.
    pub keywords: Vec<String>,
    /// External links.
    pub links: Option<Links>,
    /// Author, as published — a string or an object, so left free-form.
    pub author: Option<Value>,
    /// SPDX license expression.
    pub license: Option<String>,
    /// Publication date of the analyzed version.
    pub date: Option<String>,
}

/// Per-dimension score detail.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct ScoreDetail {
    /// Quality score, 0.0 to 1.0.
    pub quality: f32,
    /// Popularity score, 0.0 to 1.0.
    pub popularity: f32,
    /// Maintenance score, 0.0 to 1.0.
    pub maintenance: f32,
}

/// Aggregate analysis score for a package.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct Score {
    /// Weighted overall score, 0.0 to 1.0.
    #[serde(rename = "final")]
    pub final_score: f64,
    /// Per-dimension breakdown.
    pub detail: ScoreDetail,
}

/// A single result from the search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchResult {
    /// The matched package.
    pub package: Package,
    /// Analysis flags (`deprecated`, `unstable`, `insecure`), free-form.
    pub flags: Option<Value>,
    /// Relevance of the match for the given query.
    pub search_score: f32,
    /// Analysis score of the package.
    pub score: Score,
}

/// A collection of search results plus the total number of matches.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchResults {
    /// Results for the requested page.
    pub results: Vec<SearchResult>,
    /// Total matches across all pages.
    pub total: u64,
}

/// A single result from the suggestions endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SuggestionsResult {
    /// The underlying search result.
    #[serde(flatten)]
    pub result: SearchResult,
    /// Excerpt of the package name with the match highlighted.
    pub highlight: Option<String>,
}

impl Client {
    /// Search packages via GET `search`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on transport failure, a non-2xx status, or
    /// an undecodable response body.
    pub async fn search(&self, params: &SearchParams) -> Result<SearchResults, Error> {
        self.get_json_query("search", params).await
    }

    /// Fetch lightweight search suggestions via GET `search/suggestions`.
    ///
    /// The service caps the result count at [`MAX_SUGGESTIONS`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on transport failure, a non-2xx status, or
    /// an undecodable response body.
    pub async fn suggestions(
        &self,
        params: &SearchParams,
    ) -> Result<Vec<SuggestionsResult>, Error> {
        self.get_json_query("search/suggestions", params).await
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;

    use super::*;
    use crate::qualifiers::SearchQualifiers;

    #[test]
    fn params_carry_the_serialized_query() {
        let quals = SearchQualifiers {
            author: Some("rjz".to_string()),
            ..SearchQualifiers::default()
        };
        let params = SearchParams::new("fzbz", Some(&quals)).with_size(10).with_from(20);
        assert_eq!(params.q, "fzbz author:rjz");
        assert_eq!(params.size, Some(10));
        assert_eq!(params.from, Some(20));
    }

    #[tokio::test]
    async fn search_sends_q_parameter() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("GET", "/search")
            .match_query(Matcher::UrlEncoded("q".into(), "fzbz author:rjz".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        let client = Client::with_base_url(server.url());
        let results = client
            .search(&SearchParams {
                q: "fzbz author:rjz".to_string(),
                ..SearchParams::default()
            })
            .await
            .unwrap();

        assert!(results.results.is_empty());
        assert_eq!(results.total, 0);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn search_decodes_results() {
        let mut server = mockito::Server::new_async().await;

        let body = r#"{
            "total": 3163,
            "results": [
                {
                    "package": {
                        "name": "express",
                        "scope": "unscoped",
                        "version": "4.16.2",
                        "description": "Fast, unopinionated, minimalist web framework",
                        "keywords": ["express", "framework", "web"],
                        "links": { "npm": "https://www.npmjs.com/package/express" },
                        "author": { "name": "TJ Holowaychuk" },
                        "license": "MIT",
                        "date": "2017-10-09T02:33:23.936Z"
                    },
                    "flags": { "deprecated": "use something else" },
                    "score": {
                        "final": 0.9331,
                        "detail": {
                            "quality": 0.9479,
                            "popularity": 0.9355,
                            "maintenance": 0.9189
                        }
                    },
                    "searchScore": 100000.04
                }
            ]
        }"#;

        let _m = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let client = Client::with_base_url(server.url());
        let results = client.search(&SearchParams::new("express", None)).await.unwrap();

        assert_eq!(results.total, 3163);
        assert_eq!(results.results.len(), 1);

        let first = &results.results[0];
        assert_eq!(first.package.name, "express");
        assert_eq!(first.package.version, "4.16.2");
        assert_eq!(first.package.keywords.len(), 3);
        assert!(first.flags.is_some());
        assert!((first.score.final_score - 0.9331).abs() < 1e-9);
        assert!((first.score.detail.quality - 0.9479).abs() < 1e-6);
    }

    #[tokio::test]
    async fn search_omits_empty_q() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("GET", "/search")
            .match_query(Matcher::Missing)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        let client = Client::with_base_url(server.url());
        client.search(&SearchParams::default()).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn suggestions_decode_highlight() {
        let mut server = mockito::Server::new_async().await;

        let body = r#"[
            {
                "package": { "name": "fzbz-lite", "version": "1.0.0" },
                "score": { "final": 0.5, "detail": {} },
                "searchScore": 0.1,
                "highlight": "<em>fzbz</em>-lite"
            }
        ]"#;

        let mock = server
            .mock("GET", "/search/suggestions")
            .match_query(Matcher::UrlEncoded("q".into(), "fzbz".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let client = Client::with_base_url(server.url());
        let suggestions = client
            .suggestions(&SearchParams::new("fzbz", None))
            .await
            .unwrap();

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].result.package.name, "fzbz-lite");
        assert_eq!(suggestions[0].highlight.as_deref(), Some("<em>fzbz</em>-lite"));
        mock.assert_async().await;
    }
}
