//! Shared record types and configuration for the Storeleads scraper.

pub mod app_config;
pub mod config;
pub mod records;

use thiserror::Error;

pub use app_config::{AppConfig, DEFAULT_USER_AGENT};
pub use config::{load_app_config, load_app_config_from_env};
pub use records::{
    clamp_rating, CompanyDraft, CompanyRecord, Provenance, SocialNetwork, SocialProfile,
    MAX_RATING,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
