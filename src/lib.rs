pub mod catalog;
pub mod environment;
pub mod extraction;
pub mod matching;
pub mod utils;
pub mod web;

pub use catalog::{load_catalog, Listing};
pub use environment::EnvironmentConfig;
pub use matching::{CandidateProfile, Matcher, MatcherConfig, RecommendOutcome, ScoredListing};
pub use web::start_web_server;
