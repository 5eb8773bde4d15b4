//! Client for the npms.io v2 package search and analysis API.
//!
//! See: <https://api-docs.npms.io>
//!
//! Search queries combine free text with typed qualifiers, serialized by
//! [`qualifiers`] into the service's `key:value` syntax:
//!
//! ```no_run
//! use npms::{Client, SearchParams, SearchQualifiers};
//! use npms::qualifiers::QualifierFilter::NotDeprecated;
//!
//! # async fn run() -> Result<(), npms::Error> {
//! let client = Client::new();
//!
//! let quals = SearchQualifiers {
//!     maintainer: Some("dougwilson".to_string()),
//!     filters: NotDeprecated.into(),
//!     ..SearchQualifiers::default()
//! };
//! let results = client.search(&SearchParams::new("express", Some(&quals))).await?;
//! println!("{} matches", results.total);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod package;
pub mod qualifiers;
pub mod search;

pub use client::{Client, DEFAULT_BASE_URL};
pub use error::Error;
pub use package::{PackageMap, PackageResult};
pub use qualifiers::{FilterSet, QualifierFilter, SearchQualifiers, search_query};
pub use search::{
    MAX_SUGGESTIONS, SearchParams, SearchResult, SearchResults, SuggestionsResult,
};

/// User Agent string sent with every request
pub const USER_AGENT: &str = concat!("npms/", env!("CARGO_PKG_VERSION"));
