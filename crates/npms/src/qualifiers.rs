//! Search qualifier serialization for the v2/search API.
//!
//! Qualifiers are `key:value` tokens appended to the free-text query, e.g.
//! `express author:dougwilson,not:deprecated`. The token order and the
//! numeric formatting here are pinned by the service's query syntax, so the
//! emission sequence is hard-coded rather than derived from field order.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// A filter flag for a search query.
///
/// `Is*` flags select packages carrying the named mark; `Not*` flags exclude
/// them. Contradictory combinations (e.g. [`QualifierFilter::IsDeprecated`]
/// together with [`QualifierFilter::NotDeprecated`]) are representable and
/// serialized independently; the service decides what they mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualifierFilter {
    /// Exclude deprecated packages (`not:deprecated`).
    NotDeprecated,
    /// Exclude unstable (pre-1.0.0) packages (`not:unstable`).
    NotUnstable,
    /// Exclude packages with security advisories (`not:insecure`).
    NotInsecure,
    /// Select only deprecated packages (`is:deprecated`).
    IsDeprecated,
    /// Select only unstable packages (`is:unstable`).
    IsUnstable,
    /// Select only insecure packages (`is:insecure`).
    IsInsecure,
}

impl QualifierFilter {
    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// A set of [`QualifierFilter`] flags.
///
/// Sets are cheap to copy and can be built with `|`:
///
/// ```
/// use npms::qualifiers::QualifierFilter::{self, NotDeprecated, NotInsecure};
///
/// let filters = NotDeprecated | NotInsecure;
/// assert!(filters.contains(NotDeprecated));
/// assert!(!filters.contains(QualifierFilter::IsDeprecated));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSet(u8);

impl FilterSet {
    /// Create an empty set.
    pub const fn new() -> Self {
        Self(0)
    }

    /// Whether `flag` is a member of the set.
    pub const fn contains(self, flag: QualifierFilter) -> bool {
        self.0 & flag.bit() != 0
    }

    /// Add `flag` to the set.
    pub fn insert(&mut self, flag: QualifierFilter) {
        self.0 |= flag.bit();
    }

    /// Whether the set holds no flags.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl From<QualifierFilter> for FilterSet {
    fn from(flag: QualifierFilter) -> Self {
        Self(flag.bit())
    }
}

impl BitOr for QualifierFilter {
    type Output = FilterSet;

    fn bitor(self, rhs: Self) -> FilterSet {
        FilterSet(self.bit() | rhs.bit())
    }
}

impl BitOr<QualifierFilter> for FilterSet {
    type Output = Self;

    fn bitor(self, rhs: QualifierFilter) -> Self {
        Self(self.0 | rhs.bit())
    }
}

impl BitOrAssign<QualifierFilter> for FilterSet {
    fn bitor_assign(&mut self, rhs: QualifierFilter) {
        self.insert(rhs);
    }
}

/// Structured qualifiers for the v2/search API.
///
/// All fields default to "absent"; only present fields produce tokens.
/// Weights are `Option<f32>` so that an unset weight stays distinguishable
/// from an explicit `0.0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQualifiers {
    /// Match packages by author username (`author:<name>`).
    pub author: Option<String>,
    /// Rank exact-name matches higher (`boost-exact:true`). `false` emits
    /// no token.
    pub boost_exact: bool,
    /// Filter flags; see [`QualifierFilter`].
    pub filters: FilterSet,
    /// Keyword list, comma-joined into a single `keywords:` token. Entries
    /// may be excluded by prefixing with a dash (`-test`); they are passed
    /// through verbatim, without validation or escaping.
    pub keywords: Vec<String>,
    /// Match packages by maintainer username (`maintainer:<name>`).
    pub maintainer: Option<String>,
    /// Weight applied to the maintenance score (`maintenance-weight:<f>`).
    pub maintenance_weight: Option<f32>,
    /// Weight applied to the popularity score (`popularity-weight:<f>`).
    pub popularity_weight: Option<f32>,
    /// Weight applied to the quality score (`quality-weight:<f>`).
    pub quality_weight: Option<f32>,
    /// How much the overall score affects ranking (`score-effect:<f>`).
    pub score_effect: Option<f32>,
}

/// Render a float-valued qualifier with exactly two decimal digits.
fn float_qualifier(key: &str, value: f32) -> String {
    format!("{key}:{value:.2}")
}

impl SearchQualifiers {
    /// Serialize the qualifiers to their query-string form.
    ///
    /// Tokens are emitted in a fixed order (the service's query syntax, not
    /// field declaration order) and joined by `,` with no spaces. If no
    /// field is set the result is the empty string.
    pub fn to_qualifier_string(&self) -> String {
        let mut qualifiers: Vec<String> = Vec::new();

        if let Some(author) = self.author.as_deref().filter(|a| !a.is_empty()) {
            qualifiers.push(format!("author:{author}"));
        }

        if self.boost_exact {
            qualifiers.push("boost-exact:true".to_string());
        }

        if !self.keywords.is_empty() {
            qualifiers.push(format!("keywords:{}", self.keywords.join(",")));
        }

        // The is:/not: groups are ordered by final token text, alphabetically.
        if self.filters.contains(QualifierFilter::IsDeprecated) {
            qualifiers.push("is:deprecated".to_string());
        }

        if self.filters.contains(QualifierFilter::IsInsecure) {
            qualifiers.push("is:insecure".to_string());
        }

        if self.filters.contains(QualifierFilter::IsUnstable) {
            qualifiers.push("is:unstable".to_string());
        }

        if let Some(maintainer) = self.maintainer.as_deref().filter(|m| !m.is_empty()) {
            qualifiers.push(format!("maintainer:{maintainer}"));
        }

        if let Some(weight) = self.maintenance_weight {
            qualifiers.push(float_qualifier("maintenance-weight", weight));
        }

        if self.filters.contains(QualifierFilter::NotDeprecated) {
            qualifiers.push("not:deprecated".to_string());
        }

        if self.filters.contains(QualifierFilter::NotInsecure) {
            qualifiers.push("not:insecure".to_string());
        }

        if self.filters.contains(QualifierFilter::NotUnstable) {
            qualifiers.push("not:unstable".to_string());
        }

        if let Some(weight) = self.popularity_weight {
            qualifiers.push(float_qualifier("popularity-weight", weight));
        }

        if let Some(weight) = self.quality_weight {
            qualifiers.push(float_qualifier("quality-weight", weight));
        }

        if let Some(effect) = self.score_effect {
            qualifiers.push(float_qualifier("score-effect", effect));
        }

        qualifiers.join(",")
    }
}

impl fmt::Display for SearchQualifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_qualifier_string())
    }
}

/// Build the `q` parameter value for the v2/search API.
///
/// Joins a free-text query and serialized qualifiers with a single space.
/// Either side may be empty and is then omitted; if both are empty the
/// result is the empty string (callers should omit the parameter entirely
/// rather than send a blank one).
///
/// # Example
///
/// ```
/// use npms::qualifiers::{SearchQualifiers, search_query};
///
/// let quals = SearchQualifiers {
///     author: Some("dougwilson".to_string()),
///     ..SearchQualifiers::default()
/// };
/// assert_eq!(search_query("express", Some(&quals)), "express author:dougwilson");
/// ```
pub fn search_query(q: &str, qualifiers: Option<&SearchQualifiers>) -> String {
    let mut parts: Vec<String> = Vec::new();

    if !q.is_empty() {
        parts.push(q.to_string());
    }

    if let Some(quals) = qualifiers {
        let qual_str = quals.to_qualifier_string();
        if !qual_str.is_empty() {
            parts.push(qual_str);
        }
    }

    parts.join(" ")
}
