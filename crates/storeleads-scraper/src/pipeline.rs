//! Query orchestration: fetch, extract, enrich and finalize.
//!
//! Queries are processed one at a time in input order. A query that fails
//! contributes zero records and never aborts the batch.

use chrono::Utc;
use storeleads_core::{CompanyRecord, Provenance};

use crate::client::Transport;
use crate::error::ScraperError;
use crate::parse::{parse_company_page, RawCard};
use crate::social::extract_social_profiles;
use crate::synth::synthesize_from_query;
use crate::tech::detect_technologies;
use crate::trustpilot::enrich_with_trustpilot;

/// Records produced by [`run_batch`] plus the queries that yielded nothing
/// because processing them failed.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub records: Vec<CompanyRecord>,
    pub failed: Vec<String>,
}

/// Turns one query into finalized records.
///
/// In mock mode the query is synthesized into exactly one record and the
/// transport is never touched. Otherwise the query is fetched as a URL, its
/// cards are extracted, and each card is enriched with social profiles,
/// technologies and Trustpilot scores.
///
/// # Errors
///
/// Returns [`ScraperError`] when the search page itself cannot be fetched.
/// Enrichment failures are absorbed.
pub async fn process_query<T: Transport>(
    query: &str,
    transport: &T,
    mock: bool,
) -> Result<Vec<CompanyRecord>, ScraperError> {
    if mock {
        let record = synthesize_from_query(query).finalize(Provenance {
            source_query: query.to_owned(),
            scraped_at: Utc::now(),
            mock: true,
        });
        return Ok(vec![record]);
    }

    let html = transport.get_text(query).await?;
    let page = parse_company_page(&html, query);
    tracing::debug!(
        query,
        strategy = ?page.strategy,
        cards = page.cards.len(),
        "extracted company cards"
    );

    let mut records = Vec::with_capacity(page.cards.len());
    for card in page.cards {
        records.push(enrich_card(card, query, transport).await);
    }
    Ok(records)
}

async fn enrich_card<T: Transport>(card: RawCard, query: &str, transport: &T) -> CompanyRecord {
    let RawCard {
        mut draft,
        snippet,
        defaulted,
    } = card;

    if !defaulted.is_empty() {
        tracing::debug!(query, title = %draft.title, ?defaulted, "card fields defaulted");
    }

    // Detected values replace anything the card parser set.
    draft.social_networks = extract_social_profiles(&snippet);
    draft.technologies = detect_technologies(&snippet);
    let draft = enrich_with_trustpilot(draft, transport).await;

    draft.finalize(Provenance {
        source_query: query.to_owned(),
        scraped_at: Utc::now(),
        mock: false,
    })
}

/// Processes `queries` sequentially, logging and skipping failures.
pub async fn run_batch<T, Q>(queries: &[Q], transport: &T, mock: bool) -> BatchOutcome
where
    T: Transport,
    Q: AsRef<str>,
{
    let mut outcome = BatchOutcome::default();

    for query in queries {
        let query = query.as_ref();
        match process_query(query, transport, mock).await {
            Ok(records) => {
                tracing::info!(query, records = records.len(), "processed query");
                outcome.records.extend(records);
            }
            Err(e) => {
                tracing::error!(query, error = %e, "failed to process query; skipping");
                outcome.failed.push(query.to_owned());
            }
        }
    }

    if !outcome.failed.is_empty() {
        tracing::warn!(
            failed = outcome.failed.len(),
            total = queries.len(),
            "some queries failed"
        );
    }

    outcome
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
