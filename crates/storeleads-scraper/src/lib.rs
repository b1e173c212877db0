pub mod client;
pub mod error;
pub mod export;
mod html;
pub mod parse;
pub mod pipeline;
pub mod retry;
pub mod social;
pub mod synth;
pub mod tech;
pub mod trustpilot;

pub use client::{HttpClient, Transport};
pub use error::ScraperError;
pub use export::{write_json_array, write_json_lines};
pub use parse::{parse_company_page, CardStrategy, ParsedPage, RawCard};
pub use pipeline::{process_query, run_batch, BatchOutcome};
pub use retry::RetryPolicy;
pub use social::extract_social_profiles;
pub use synth::{format_usd, synthesize_from_query};
pub use tech::detect_technologies;
pub use trustpilot::enrich_with_trustpilot;
