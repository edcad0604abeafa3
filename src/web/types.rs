// src/web/types.rs
use crate::catalog::Listing;
use crate::matching::{ListingDefect, Matcher, ScoredListing};
use chrono::{DateTime, Utc};
use rocket::serde::{Deserialize, Serialize};

/// Read-only state shared by all requests: the startup catalog and the engine.
pub struct ServerConfig {
    pub listings: Vec<Listing>,
    pub matcher: Matcher,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Text,
    Data,
    Error,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct TextResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

// Request envelope with conversation_id support
#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardRequest<T> {
    #[serde(flatten)]
    pub data: T,
    pub conversation_id: Option<String>,
}

pub trait WithConversationId {
    fn conversation_id(&self) -> Option<String>;
}

impl<T> WithConversationId for StandardRequest<T> {
    fn conversation_id(&self) -> Option<String> {
        self.conversation_id.clone()
    }
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ExtractSkillsRequest {
    /// `data:<mimetype>;base64,<encoded_data>`
    pub resume_data_uri: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct SkillsData {
    pub skills: Vec<String>,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct RecommendRequest {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub location_preference: String,
    /// Comma-separated, split and trimmed here at the boundary.
    #[serde(default)]
    pub sector_interests: String,
    pub location_weight: f64,
    /// Catalog override; defaults to the server's startup catalog.
    pub listings: Option<Vec<Listing>>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct RecommendationData {
    pub recommendations: Vec<ScoredListing>,
    pub rejected: Vec<ListingDefect>,
    pub generated_at: DateTime<Utc>,
}

impl TextResponse {
    pub fn success(message: String, conversation_id: Option<String>) -> Self {
        Self {
            response_type: ResponseType::Text,
            success: true,
            message,
            conversation_id,
        }
    }
}

impl<T> DataResponse<T> {
    pub fn success(message: String, data: T, conversation_id: Option<String>) -> Self {
        Self {
            response_type: ResponseType::Data,
            success: true,
            message,
            data,
            conversation_id,
        }
    }
}

impl StandardErrorResponse {
    pub fn new(
        error: String,
        error_code: String,
        suggestions: Vec<String>,
        conversation_id: Option<String>,
    ) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error,
            error_code,
            suggestions,
            conversation_id,
        }
    }
}
