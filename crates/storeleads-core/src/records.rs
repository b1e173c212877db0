use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upper bound of a review-site star rating.
pub const MAX_RATING: f64 = 5.0;

/// Social platforms recognised by the profile extractor.
///
/// Twitter and X are the same platform; both URL shapes map to [`SocialNetwork::X`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialNetwork {
    X,
    Facebook,
    Instagram,
    Youtube,
    Linkedin,
    Tiktok,
}

impl SocialNetwork {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SocialNetwork::X => "x",
            SocialNetwork::Facebook => "facebook",
            SocialNetwork::Instagram => "instagram",
            SocialNetwork::Youtube => "youtube",
            SocialNetwork::Linkedin => "linkedin",
            SocialNetwork::Tiktok => "tiktok",
        }
    }
}

impl std::fmt::Display for SocialNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A social profile link found on a company's page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialProfile {
    pub network: SocialNetwork,
    pub url: String,
    pub username: String,
    /// Only populated by platform API integrations; HTML-derived profiles
    /// always carry `None`.
    pub follower_count: Option<u64>,
}

/// Business fields of a company record, before provenance is stamped.
///
/// `Default` yields the documented defaults: empty strings, `None` metrics and
/// empty collections. Every field is always serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyDraft {
    pub region: String,
    pub detailed_region: String,
    pub title: String,
    /// Store domain or URL as found on the page; may be empty.
    pub domain: String,
    /// Formatted amount, e.g. `"USD $1,234.50"`.
    pub monthly_sales: String,
    pub annual_sales: String,
    pub location: String,
    pub country: String,
    pub employees: Option<u64>,
    pub monthly_visits: Option<u64>,
    pub monthly_page_views: Option<u64>,
    /// Always within `0.0..=5.0`; see [`clamp_rating`].
    pub trustpilot_avg_rating: Option<f64>,
    pub trustpilot_review_count: Option<u64>,
    pub social_networks: Vec<SocialProfile>,
    /// Sorted ascending, no duplicates.
    pub technologies: Vec<String>,
    pub cluster_domains: Vec<String>,
    pub features: Vec<String>,
}

impl CompanyDraft {
    /// Stamps provenance onto the draft, producing the immutable output record.
    #[must_use]
    pub fn finalize(self, provenance: Provenance) -> CompanyRecord {
        CompanyRecord {
            company: self,
            source_query: provenance.source_query,
            scraped_at: provenance.scraped_at,
            mock: provenance.mock,
        }
    }
}

/// Where a record came from and when.
#[derive(Debug, Clone)]
pub struct Provenance {
    pub source_query: String,
    pub scraped_at: DateTime<Utc>,
    /// `true` for records produced by the synthetic generator.
    pub mock: bool,
}

/// Canonical output unit handed to the JSON writers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    #[serde(flatten)]
    pub company: CompanyDraft,
    pub source_query: String,
    pub scraped_at: DateTime<Utc>,
    pub mock: bool,
}

/// Clamps a rating into `0.0..=5.0`. `NaN` maps to `0.0`.
#[must_use]
pub fn clamp_rating(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, MAX_RATING)
}
