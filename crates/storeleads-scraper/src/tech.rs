//! Technology fingerprinting by case-insensitive substring search.

use std::collections::BTreeSet;

/// Technology label and the needles that betray it. A technology matches when
/// any one of its needles occurs in the lowercased markup.
const FINGERPRINTS: &[(&str, &[&str])] = &[
    ("Cloudflare", &["cf-ray", "__cf_bm", "cloudflare"]),
    (
        "Shopify",
        &["cdn.shopify.com", "shopify.theme", "x-shopify-stage"],
    ),
    ("WooCommerce", &["woocommerce_params", "woocommerce"]),
    ("React", &["data-reactroot", "react.development.js"]),
    ("Next.js", &["__next_data__", "next/data"]),
    ("Vue.js", &["__vue_devtools_global_hook__", "vue.runtime"]),
    (
        "Google Analytics",
        &["gtag('config'", "www.googletagmanager.com/gtag/js"],
    ),
    (
        "Facebook Pixel",
        &["fbq(", "connect.facebook.net/en_us/fbevents.js"],
    ),
    ("Stripe", &["js.stripe.com", "stripe("]),
    ("Node.js", &["x-powered-by", "express"]),
];

/// Returns the technologies fingerprinted in `html`, sorted ascending and
/// free of duplicates.
///
/// Matching is purely textual: no DOM semantics, so needles inside comments,
/// scripts and attribute values all count.
#[must_use]
pub fn detect_technologies(html: &str) -> Vec<String> {
    if html.is_empty() {
        return Vec::new();
    }

    let haystack = html.to_lowercase();
    FINGERPRINTS
        .iter()
        .filter(|(_, needles)| needles.iter().any(|n| haystack.contains(n)))
        .map(|(label, _)| *label)
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}
