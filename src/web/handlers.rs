// src/web/handlers.rs
use crate::extraction::{ResumePayload, SkillExtractor};
use crate::matching::CandidateProfile;
use crate::utils::split_terms;
use crate::web::types::{
    DataResponse, ExtractSkillsRequest, RecommendRequest, RecommendationData, ServerConfig,
    SkillsData, StandardErrorResponse, StandardRequest, TextResponse, WithConversationId,
};
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info, warn};
use uuid::Uuid;

fn ensure_conversation_id(id: Option<String>) -> Option<String> {
    id.or_else(|| Some(Uuid::new_v4().to_string()))
}

pub async fn extract_skills_handler(
    request: Json<StandardRequest<ExtractSkillsRequest>>,
) -> Result<Json<DataResponse<SkillsData>>, Json<StandardErrorResponse>> {
    let conversation_id = ensure_conversation_id(request.conversation_id());

    let payload = match ResumePayload::parse(&request.data.resume_data_uri) {
        Ok(payload) => payload,
        Err(e) => {
            warn!("Rejected resume upload: {}", e);
            return Err(Json(StandardErrorResponse::new(
                e.to_string(),
                "INVALID_RESUME_PAYLOAD".to_string(),
                vec![
                    "Upload the resume as a base64 data URI".to_string(),
                    "Include the document MIME type".to_string(),
                ],
                conversation_id,
            )));
        }
    };

    let extractor = match SkillExtractor::new() {
        Ok(extractor) => extractor,
        Err(e) => {
            error!("Failed to initialize skill extractor: {}", e);
            return Err(Json(StandardErrorResponse::new(
                "Service configuration error".to_string(),
                "SERVICE_CONFIG_ERROR".to_string(),
                vec![
                    "Ensure the skill extraction service is configured".to_string(),
                    "Contact system administrator".to_string(),
                ],
                conversation_id,
            )));
        }
    };

    match extractor.extract(&payload).await {
        Ok(skills) => {
            info!("Extraction succeeded with {} skills", skills.len());
            Ok(Json(DataResponse::success(
                format!("Extracted {} skills from your resume", skills.len()),
                SkillsData { skills },
                conversation_id,
            )))
        }
        Err(e) => {
            error!("Skill extraction failed: {}", e);
            Err(Json(StandardErrorResponse::new(
                format!("Failed to extract skills from resume: {}", e),
                "EXTRACTION_FAILED".to_string(),
                vec![
                    "Try again in a few moments".to_string(),
                    "Check that the document is a readable resume".to_string(),
                ],
                conversation_id,
            )))
        }
    }
}

pub async fn recommend_handler(
    request: Json<StandardRequest<RecommendRequest>>,
    config: &State<ServerConfig>,
) -> Result<Json<DataResponse<RecommendationData>>, Json<StandardErrorResponse>> {
    let conversation_id = ensure_conversation_id(request.conversation_id());
    let data = &request.data;

    info!(
        "Matching request: {} skills, location preference '{}'",
        data.skills.len(),
        data.location_preference
    );

    // Boundary contract: interests arrive comma-separated and the weight dial
    // is clamped here, before the engine sees it.
    let profile = CandidateProfile {
        skills: data.skills.clone(),
        location_preference: data.location_preference.clone(),
        sector_interests: split_terms(&data.sector_interests),
        location_weight: data.location_weight.clamp(0.0, 1.0),
    };

    let catalog = data.listings.as_deref().unwrap_or(&config.listings);

    match config.matcher.recommend(&profile, catalog) {
        Ok(outcome) => {
            if !outcome.rejected.is_empty() {
                warn!(
                    "{} listings excluded from scoring for integrity defects",
                    outcome.rejected.len()
                );
            }
            Ok(Json(DataResponse::success(
                format!("Ranked {} listings", outcome.listings.len()),
                RecommendationData {
                    recommendations: outcome.listings,
                    rejected: outcome.rejected,
                    generated_at: chrono::Utc::now(),
                },
                conversation_id,
            )))
        }
        Err(e) => {
            warn!("Rejected matching request: {}", e);
            Err(Json(StandardErrorResponse::new(
                e.to_string(),
                "VALIDATION_ERROR".to_string(),
                vec!["Set the location weight between 0 and 1".to_string()],
                conversation_id,
            )))
        }
    }
}

pub async fn get_listings_handler(
    config: &State<ServerConfig>,
) -> Json<DataResponse<Vec<crate::catalog::Listing>>> {
    Json(DataResponse::success(
        format!("{} listings available", config.listings.len()),
        config.listings.clone(),
        None,
    ))
}

pub async fn health_handler() -> Json<TextResponse> {
    Json(TextResponse::success(
        "Internship matching service is running".to_string(),
        None,
    ))
}
