// src/matching/mod.rs
use crate::catalog::Listing;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod scoring;

pub use scoring::{Matcher, MatcherConfig};

/// Everything the engine knows about one candidate. Built fresh per matching
/// request and discarded afterwards.
#[derive(Debug, Clone, Default)]
pub struct CandidateProfile {
    pub skills: Vec<String>,
    /// Free text; empty string means "no preference" and never penalizes.
    pub location_preference: String,
    /// Already split and trimmed by the boundary layer.
    pub sector_interests: Vec<String>,
    /// Dial in [0, 1]: 0 = ignore location, 1 = location dominates.
    pub location_weight: f64,
}

/// A listing with its computed fit score in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredListing {
    #[serde(flatten)]
    pub listing: Listing,
    pub match_score: f64,
}

/// A catalog listing that could not be scored: surfaced, never defaulted to 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingDefect {
    pub id: String,
    pub reason: String,
}

/// Result of one recommendation pass: every valid listing exactly once,
/// ranked listings first, plus any listings rejected for integrity defects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendOutcome {
    pub listings: Vec<ScoredListing>,
    pub rejected: Vec<ListingDefect>,
}

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("location weight {0} is outside the valid range [0, 1]")]
    WeightOutOfRange(f64),
}
