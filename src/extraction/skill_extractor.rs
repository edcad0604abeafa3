// src/extraction/skill_extractor.rs
use super::{ExtractionError, ResumePayload};
use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use tracing::{error, info};

const EXTRACT_SKILLS_ENDPOINT: &str = "/extract-skills";

#[derive(Debug, Serialize)]
struct ExtractSkillsRequest {
    mime_type: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ExtractSkillsResponse {
    skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ExtractorErrorResponse {
    error: String,
}

/// Client for the external skill extraction service. One call per uploaded
/// resume, no retry, no state between calls; retry or backoff policy belongs
/// to the caller.
pub struct SkillExtractor {
    client: Client,
    api_key: String,
    base_url: String,
}

impl SkillExtractor {
    pub fn new() -> Result<Self> {
        let api_key = env::var("EXTRACTOR_API_KEY")
            .context("EXTRACTOR_API_KEY environment variable not set")?;

        let base_url =
            env::var("EXTRACTOR_API_URL").unwrap_or_else(|_| "https://api0.ai".to_string());

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Send the resume to the extractor and return its skill list. An empty
    /// list is a legitimate result; any failure surfaces as a single
    /// descriptive error, never as a silently empty skill set.
    pub async fn extract(&self, payload: &ResumePayload) -> Result<Vec<String>, ExtractionError> {
        let request = ExtractSkillsRequest {
            mime_type: payload.mime_type.clone(),
            content: payload.content.clone(),
        };

        info!(
            "Sending resume ({}) to skill extraction service",
            payload.mime_type
        );

        let response = self
            .client
            .post(format!("{}{}", self.base_url, EXTRACT_SKILLS_ENDPOINT))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ExtractorErrorResponse>(&body) {
                Ok(err) => err.error,
                Err(_) => body,
            };
            error!("Skill extraction service error {}: {}", status, message);
            return Err(ExtractionError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let extracted: ExtractSkillsResponse = serde_json::from_str(&body)
            .map_err(|e| ExtractionError::MalformedResponse(e.to_string()))?;

        info!("Extracted {} skills from resume", extracted.skills.len());
        Ok(extracted.skills)
    }
}
