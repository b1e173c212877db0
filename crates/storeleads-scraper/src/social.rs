//! Social profile detection from company-card markup.
//!
//! Every platform in [`SOCIAL_PATTERNS`] is matched against each hyperlink
//! target and then against the raw markup, which catches profile URLs that
//! only appear in scripts, `data-*` attributes or plain text. Results follow
//! table order, then document order within a platform.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use storeleads_core::{SocialNetwork, SocialProfile};

/// One row of the platform table. `pattern` must define a `handle` group.
struct SocialPattern {
    network: SocialNetwork,
    pattern: &'static str,
}

/// Twitter and X both record under [`SocialNetwork::X`]; the Twitter row
/// comes first so a handle present on both hosts keeps its twitter.com URL.
const SOCIAL_PATTERNS: &[SocialPattern] = &[
    SocialPattern {
        network: SocialNetwork::X,
        pattern: r"(?i)https?://(?:www\.)?twitter\.com/(?P<handle>[A-Za-z0-9_]{1,15})",
    },
    SocialPattern {
        network: SocialNetwork::X,
        pattern: r"(?i)https?://(?:www\.)?x\.com/(?P<handle>[A-Za-z0-9_]{1,15})",
    },
    SocialPattern {
        network: SocialNetwork::Facebook,
        pattern: r"(?i)https?://(?:www\.)?facebook\.com/(?P<handle>[A-Za-z0-9._\-]+)/?",
    },
    SocialPattern {
        network: SocialNetwork::Instagram,
        pattern: r"(?i)https?://(?:www\.)?instagram\.com/(?P<handle>[A-Za-z0-9._]+)/?",
    },
    SocialPattern {
        network: SocialNetwork::Youtube,
        pattern: r"(?i)https?://(?:www\.)?youtube\.com/(?:@|c/|user/)?(?P<handle>[A-Za-z0-9._\-]+)/?",
    },
    SocialPattern {
        network: SocialNetwork::Linkedin,
        pattern: r"(?i)https?://(?:www\.)?linkedin\.com/company/(?P<handle>[A-Za-z0-9._\-]+)/?",
    },
    SocialPattern {
        network: SocialNetwork::Tiktok,
        pattern: r"(?i)https?://(?:www\.)?tiktok\.com/@(?P<handle>[A-Za-z0-9._\-]+)/?",
    },
];

static SOCIAL_MATCHERS: LazyLock<Vec<(SocialNetwork, Regex)>> = LazyLock::new(|| {
    SOCIAL_PATTERNS
        .iter()
        .map(|p| (p.network, Regex::new(p.pattern).expect("valid social regex")))
        .collect()
});

static ANCHOR_HREF: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid selector"));

/// Extracts social profiles from `html`.
///
/// Entries are unique by `(network, lowercased username)`. Follower counts are
/// always `None`; they need platform APIs.
#[must_use]
pub fn extract_social_profiles(html: &str) -> Vec<SocialProfile> {
    if html.is_empty() {
        return Vec::new();
    }

    let document = Html::parse_document(html);
    let mut sources: Vec<&str> = document
        .select(&ANCHOR_HREF)
        .filter_map(|a| a.value().attr("href"))
        .collect();
    sources.push(html);

    let mut seen: HashSet<(SocialNetwork, String)> = HashSet::new();
    let mut profiles = Vec::new();

    for (network, regex) in SOCIAL_MATCHERS.iter() {
        for source in &sources {
            for caps in regex.captures_iter(source) {
                let (Some(whole), Some(handle)) = (caps.get(0), caps.name("handle")) else {
                    continue;
                };
                let username = handle.as_str();
                if !seen.insert((*network, username.to_lowercase())) {
                    continue;
                }
                profiles.push(SocialProfile {
                    network: *network,
                    url: whole.as_str().to_owned(),
                    username: username.to_owned(),
                    follower_count: None,
                });
            }
        }
    }

    profiles
}
