//! Deterministic synthetic company records for network-free runs.
//!
//! Every numeric field is derived from a 32-bit seed taken from the SHA-256
//! of the query, so the same query always yields the same draft.

use sha2::{Digest, Sha256};
use storeleads_core::{clamp_rating, CompanyDraft, SocialNetwork, SocialProfile};

const SYNTH_TECHNOLOGIES: [&str; 3] = ["Cloudflare", "Node.js", "React"];
const SYNTH_FEATURES: [&str; 3] = ["https", "cdn", "spa"];

/// Seed for `query`: the first four bytes of its SHA-256 digest, big-endian.
#[must_use]
pub fn query_seed(query: &str) -> u32 {
    let digest = Sha256::digest(query.as_bytes());
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// Best-effort domain for a query: the host of a URL, the part before the
/// first `/` of a path-like string, or the query itself.
#[must_use]
pub fn domain_from_query(query: &str) -> &str {
    if let Some((_, rest)) = query.split_once("://") {
        return rest.split('/').next().unwrap_or(rest);
    }
    query.split('/').next().unwrap_or(query)
}

/// Synthesizes a complete draft from `query`. Pure: no clock, no RNG.
#[must_use]
pub fn synthesize_from_query(query: &str) -> CompanyDraft {
    let seed = query_seed(query);
    let domain = domain_from_query(query);
    let label = domain.split('.').next().unwrap_or(domain);

    let monthly_visits = u64::from(seed % 5_000_000) + 100_000;
    let employees = u64::from(seed % 5000) + 10;
    let sales = f64::from(seed % 5_000_000) * 2.37;
    let rating = (f64::from(seed % 45) / 10.0 + 1.0) * 10.0;
    let rating = clamp_rating(rating.round() / 10.0);

    // visits < 5.1M, well inside f64's exact integer range.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let monthly_page_views = (monthly_visits as f64 * 2.7).floor() as u64;

    CompanyDraft {
        region: "Americas".to_owned(),
        detailed_region: "Northern America".to_owned(),
        title: capitalize(label),
        domain: domain.to_owned(),
        monthly_sales: format_usd(sales),
        annual_sales: format_usd(sales * 12.0),
        location: "Remote".to_owned(),
        country: "United States".to_owned(),
        employees: Some(employees),
        monthly_visits: Some(monthly_visits),
        monthly_page_views: Some(monthly_page_views),
        trustpilot_avg_rating: Some(rating),
        trustpilot_review_count: Some(u64::from(seed % 50_000)),
        social_networks: vec![SocialProfile {
            network: SocialNetwork::X,
            url: format!("https://twitter.com/{label}"),
            username: label.to_owned(),
            follower_count: Some(u64::from(seed % 2_000_000)),
        }],
        technologies: SYNTH_TECHNOLOGIES.iter().map(|t| (*t).to_owned()).collect(),
        cluster_domains: vec![
            domain.to_owned(),
            format!("www.{domain}"),
            format!("shop.{domain}"),
        ],
        features: SYNTH_FEATURES.iter().map(|f| (*f).to_owned()).collect(),
    }
}

/// Formats an amount as `USD $1,234,567.89`.
#[must_use]
pub fn format_usd(amount: f64) -> String {
    let fixed = format!("{amount:.2}");
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let (sign, digits) = whole
        .strip_prefix('-')
        .map_or(("", whole), |rest| ("-", rest));

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("USD ${sign}{grouped}.{cents}")
}

/// Uppercases the first character and lowercases the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
