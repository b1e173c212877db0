//! Best-effort review-score enrichment from Trustpilot.
//!
//! Enrichment is monotonic: a rating or review count is only written when one
//! was parsed, and every failure (missing domain, transport error, no match)
//! leaves the draft untouched.

use std::sync::LazyLock;

use regex::Regex;
use storeleads_core::{clamp_rating, CompanyDraft};

use crate::client::Transport;
use crate::html::document_text;

pub const TRUSTPILOT_REVIEW_BASE: &str = "https://www.trustpilot.com/review/";

/// A 0–5 score with an optional decimal, followed by an optional `/` and a `5`.
static RATING_OUT_OF_FIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-5](?:\.\d)?)\s*/?\s*5").expect("valid rating regex"));
static BARE_RATING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([0-5](?:\.\d)?)\b").expect("valid rating regex"));
static REVIEW_COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([\d,]+)\s+reviews?").expect("valid review count regex"));

/// Builds the Trustpilot review URL for a store domain or URL.
///
/// Returns `None` for non-web schemes such as `file://`, and when nothing
/// usable remains after stripping the scheme and surrounding slashes.
#[must_use]
pub fn review_url(domain: &str) -> Option<String> {
    let trimmed = domain.trim();
    let without_scheme = match trimmed.split_once("://") {
        Some((scheme, rest))
            if scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https") =>
        {
            rest
        }
        Some(_) => return None,
        None => trimmed,
    };
    let slug = without_scheme.trim_matches('/');
    if slug.is_empty() {
        return None;
    }
    Some(format!("{TRUSTPILOT_REVIEW_BASE}{slug}"))
}

/// Extracts a star rating from page text, clamped to `0.0..=5.0`.
///
/// Prefers an "N out of 5"-shaped score and falls back to the first bare
/// 0–5 number.
#[must_use]
pub fn extract_rating(text: &str) -> Option<f64> {
    RATING_OUT_OF_FIVE_RE
        .captures(text)
        .or_else(|| BARE_RATING_RE.captures(text))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .map(clamp_rating)
}

/// Extracts a review count such as `"12,345 reviews"` from page text.
#[must_use]
pub fn extract_review_count(text: &str) -> Option<u64> {
    let caps = REVIEW_COUNT_RE.captures(text)?;
    caps.get(1)?.as_str().replace(',', "").parse::<u64>().ok()
}

/// Fetches the company's Trustpilot page and fills in whatever rating and
/// review count can be parsed. Never fails.
pub async fn enrich_with_trustpilot<T: Transport>(
    mut draft: CompanyDraft,
    transport: &T,
) -> CompanyDraft {
    let Some(url) = review_url(&draft.domain) else {
        return draft;
    };

    let body = match transport.get_text(&url).await {
        Ok(body) => body,
        Err(e) => {
            tracing::debug!(url = %url, error = %e, "trustpilot fetch failed; keeping existing values");
            return draft;
        }
    };

    let text = document_text(&body);
    if let Some(rating) = extract_rating(&text) {
        draft.trustpilot_avg_rating = Some(rating);
    }
    if let Some(count) = extract_review_count(&text) {
        draft.trustpilot_review_count = Some(count);
    }
    draft
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::future::Future;

    use super::*;
    use crate::error::ScraperError;

    struct PageMap(HashMap<String, String>);

    impl Transport for PageMap {
        fn get_text(
            &self,
            url: &str,
        ) -> impl Future<Output = Result<String, ScraperError>> + Send {
            let result = self
                .0
                .get(url)
                .cloned()
                .ok_or_else(|| ScraperError::UnexpectedStatus {
                    status: 404,
                    url: url.to_owned(),
                });
            async move { result }
        }
    }

    fn pages(entries: &[(&str, &str)]) -> PageMap {
        PageMap(
            entries
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
        )
    }

    fn draft_for(domain: &str) -> CompanyDraft {
        CompanyDraft {
            domain: domain.to_owned(),
            ..CompanyDraft::default()
        }
    }

    #[test]
    fn review_url_strips_scheme_and_slashes() {
        assert_eq!(
            review_url("https://acme.example/").as_deref(),
            Some("https://www.trustpilot.com/review/acme.example")
        );
        assert_eq!(
            review_url("acme.example").as_deref(),
            Some("https://www.trustpilot.com/review/acme.example")
        );
        assert_eq!(review_url("  "), None);
        assert_eq!(review_url("https:///"), None);
    }

    #[test]
    fn review_url_accepts_any_case_web_scheme() {
        assert_eq!(
            review_url("HTTPS://Acme.example/").as_deref(),
            Some("https://www.trustpilot.com/review/Acme.example")
        );
    }

    #[test]
    fn review_url_rejects_non_web_schemes() {
        assert_eq!(review_url("file:///tmp/results/out?to=acme"), None);
        assert_eq!(review_url("ftp://acme.example"), None);
    }

    #[test]
    fn rating_and_count_from_summary_sentence() {
        let text = "Excellent 4.5 out of 5 based on 1,234 reviews";
        assert_eq!(extract_rating(text), Some(4.5));
        assert_eq!(extract_review_count(text), Some(1234));
    }

    #[test]
    fn rating_prefers_slash_five_form() {
        assert_eq!(extract_rating("Rated 3.8/5 by 2 people"), Some(3.8));
        assert_eq!(extract_rating("TrustScore 4 / 5"), Some(4.0));
    }

    #[test]
    fn rating_is_none_without_digits_in_range() {
        assert_eq!(extract_rating("no score here"), None);
        assert_eq!(extract_rating("rated 9 by 7 users"), None);
    }

    #[test]
    fn rating_never_exceeds_five() {
        for text in ["5.9 stars", "5.9/5", "score 5.5"] {
            let rating = extract_rating(text).unwrap();
            assert!((0.0..=5.0).contains(&rating), "{text} gave {rating}");
        }
    }

    #[test]
    fn review_count_is_case_insensitive_and_singular() {
        assert_eq!(extract_review_count("1 Review"), Some(1));
        assert_eq!(extract_review_count("98,765 REVIEWS total"), Some(98_765));
        assert_eq!(extract_review_count("no reviews yet"), None);
    }

    #[tokio::test]
    async fn enrich_sets_rating_and_count() {
        let transport = pages(&[(
            "https://www.trustpilot.com/review/acme.example",
            "<html><body><h1>Acme</h1><p>Excellent 4.5 out of 5 based on 1,234 reviews</p></body></html>",
        )]);
        let draft = enrich_with_trustpilot(draft_for("https://acme.example/"), &transport).await;
        assert_eq!(draft.trustpilot_avg_rating, Some(4.5));
        assert_eq!(draft.trustpilot_review_count, Some(1234));
    }

    #[tokio::test]
    async fn enrich_ignores_digits_in_scripts_and_styles() {
        let transport = pages(&[(
            "https://www.trustpilot.com/review/acme.example",
            "<html><head><script>var year = 2025; var id = 30;</script>\
             <style>.a{width:15px}</style></head>\
             <body><p>Excellent 4.5 out of 5 based on 1,234 reviews</p></body></html>",
        )]);
        let draft = enrich_with_trustpilot(draft_for("acme.example"), &transport).await;
        assert_eq!(draft.trustpilot_avg_rating, Some(4.5));
        assert_eq!(draft.trustpilot_review_count, Some(1234));
    }

    #[tokio::test]
    async fn enrich_skips_local_file_domains() {
        let transport = pages(&[(
            "https://www.trustpilot.com/review/file:///tmp/out?to=acme",
            "<p>4.5 out of 5 based on 9 reviews</p>",
        )]);
        let original = draft_for("file:///tmp/out?to=acme");
        let draft = enrich_with_trustpilot(original.clone(), &transport).await;
        assert_eq!(draft, original);
    }

    #[tokio::test]
    async fn enrich_keeps_existing_values_on_fetch_failure() {
        let transport = pages(&[]);
        let mut original = draft_for("acme.example");
        original.trustpilot_avg_rating = Some(3.0);
        original.trustpilot_review_count = Some(10);
        let draft = enrich_with_trustpilot(original.clone(), &transport).await;
        assert_eq!(draft, original);
    }

    #[tokio::test]
    async fn enrich_only_overwrites_parsed_fields() {
        let transport = pages(&[(
            "https://www.trustpilot.com/review/acme.example",
            "<p>7,000 reviews and counting</p>",
        )]);
        let mut original = draft_for("acme.example");
        original.trustpilot_avg_rating = Some(3.0);
        let draft = enrich_with_trustpilot(original, &transport).await;
        assert_eq!(draft.trustpilot_avg_rating, Some(3.0));
        assert_eq!(draft.trustpilot_review_count, Some(7000));
    }

    #[tokio::test]
    async fn enrich_skips_records_without_domain() {
        let transport = pages(&[]);
        let draft = enrich_with_trustpilot(draft_for(""), &transport).await;
        assert_eq!(draft, CompanyDraft::default());
    }
}
