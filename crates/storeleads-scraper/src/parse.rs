//! Heuristic extraction of company cards from a search-results page.
//!
//! Card containers are located with a prioritized list of selector tiers;
//! the first tier with any match wins. When no tier matches, the whole
//! document becomes a single card titled after `<title>`. Each field is
//! independently optional: a missing selector match yields the field's
//! default and is recorded in [`RawCard::defaulted`], never an error.

use std::sync::LazyLock;

use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use storeleads_core::CompanyDraft;

use crate::html::element_text;

static CLASS_HINT_CARDS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(".company, .result, .store, .company-card, .row").expect("valid selector")
});
static LIST_ITEM_CARDS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li").expect("valid selector"));
static CARD_TITLE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(".name, .title, h2, h3, .company-name").expect("valid selector")
});
static CARD_DOMAIN_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href*='http']").expect("valid selector"));
static CARD_LOCATION: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(".location, .address, .country").expect("valid selector")
});
static DOCUMENT_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("valid selector"));

/// Title used when a page has neither cards nor a `<title>`.
pub const UNKNOWN_TITLE: &str = "Unknown";

/// Which structural hint produced the cards of a [`ParsedPage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardStrategy {
    /// Elements with company-like class names.
    ClassHints,
    /// Generic `<li>` list items.
    ListItems,
    /// No card containers; the document itself is the only card.
    DocumentFallback,
}

/// One extracted company candidate plus the markup it came from.
///
/// `snippet` is the card's outer HTML, kept only so the social and technology
/// matchers can scan it. It never becomes part of a [`storeleads_core::CompanyRecord`].
#[derive(Debug, Clone)]
pub struct RawCard {
    pub draft: CompanyDraft,
    pub snippet: String,
    /// Names of the extracted fields that fell back to their defaults.
    pub defaulted: Vec<&'static str>,
}

#[derive(Debug, Clone)]
pub struct ParsedPage {
    pub strategy: CardStrategy,
    /// Never empty.
    pub cards: Vec<RawCard>,
}

/// Parses a search-results page into company cards.
///
/// Never fails and never returns an empty card list, whatever the markup.
/// `base_url` resolves relative domain links; pass `""` when unknown.
#[must_use]
pub fn parse_company_page(html: &str, base_url: &str) -> ParsedPage {
    let document = Html::parse_document(html);
    let base = Url::parse(base_url).ok();

    for (strategy, selector) in [
        (CardStrategy::ClassHints, &*CLASS_HINT_CARDS),
        (CardStrategy::ListItems, &*LIST_ITEM_CARDS),
    ] {
        let cards: Vec<RawCard> = document
            .select(selector)
            .map(|card| extract_card(card, base.as_ref()))
            .collect();
        if !cards.is_empty() {
            return ParsedPage { strategy, cards };
        }
    }

    ParsedPage {
        strategy: CardStrategy::DocumentFallback,
        cards: vec![document_card(&document, html)],
    }
}

fn extract_card(card: ElementRef<'_>, base: Option<&Url>) -> RawCard {
    let mut defaulted = Vec::new();

    let title = first_text(card, &CARD_TITLE);
    if title.is_empty() {
        defaulted.push("title");
    }

    let domain = card
        .select(&CARD_DOMAIN_LINK)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(|href| resolve_href(href.trim(), base))
        .unwrap_or_default();
    if domain.is_empty() {
        defaulted.push("domain");
    }

    let location = first_text(card, &CARD_LOCATION);
    if location.is_empty() {
        defaulted.push("location");
    }

    RawCard {
        draft: CompanyDraft {
            title,
            domain,
            location,
            ..CompanyDraft::default()
        },
        snippet: card.html(),
        defaulted,
    }
}

fn document_card(document: &Html, html: &str) -> RawCard {
    let title = document
        .select(&DOCUMENT_TITLE)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty());

    let mut defaulted = vec!["domain", "location"];
    if title.is_none() {
        defaulted.insert(0, "title");
    }

    RawCard {
        draft: CompanyDraft {
            title: title.unwrap_or_else(|| UNKNOWN_TITLE.to_owned()),
            ..CompanyDraft::default()
        },
        snippet: html.to_owned(),
        defaulted,
    }
}

fn first_text(card: ElementRef<'_>, selector: &Selector) -> String {
    card.select(selector)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

/// Absolute hrefs are kept verbatim; relative ones are joined onto `base`
/// when it is known.
fn resolve_href(href: &str, base: Option<&Url>) -> String {
    if Url::parse(href).is_ok() {
        return href.to_owned();
    }
    base.and_then(|b| b.join(href).ok())
        .map_or_else(|| href.to_owned(), |u| u.to_string())
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
