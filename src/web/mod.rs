// src/web/mod.rs
pub mod handlers;
pub mod types;

pub use types::*;

use crate::catalog::{self, Listing};
use crate::environment::EnvironmentConfig;
use crate::matching::Matcher;
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Request, Response, State};
use tracing::info;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[post("/extract-skills", data = "<request>")]
pub async fn extract_skills(
    request: Json<StandardRequest<ExtractSkillsRequest>>,
) -> Result<Json<DataResponse<SkillsData>>, Json<StandardErrorResponse>> {
    handlers::extract_skills_handler(request).await
}

#[post("/recommend", data = "<request>")]
pub async fn recommend(
    request: Json<StandardRequest<RecommendRequest>>,
    config: &State<ServerConfig>,
) -> Result<Json<DataResponse<RecommendationData>>, Json<StandardErrorResponse>> {
    handlers::recommend_handler(request, config).await
}

#[get("/listings")]
pub async fn get_listings(config: &State<ServerConfig>) -> Json<DataResponse<Vec<Listing>>> {
    handlers::get_listings_handler(config).await
}

#[get("/health")]
pub async fn health() -> Json<TextResponse> {
    handlers::health_handler().await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
        None,
    ))
}

#[rocket::catch(404)]
pub fn not_found() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Resource not found".to_string(),
        "NOT_FOUND".to_string(),
        vec!["Check the request path".to_string()],
        None,
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
        None,
    ))
}

// Main server start function
pub async fn start_web_server(environment: EnvironmentConfig, port: u16) -> Result<()> {
    let listings = catalog::load_catalog(&environment.catalog_path)?;

    let server_config = ServerConfig {
        listings,
        matcher: Matcher::default(),
    };

    info!("Starting InternMatch API server");
    info!("Catalog: {}", environment.catalog_path.display());
    info!("All endpoints use standard response format with conversation_id support");

    let rocket_config = rocket::Config {
        port,
        address: std::net::Ipv4Addr::UNSPECIFIED.into(),
        ..rocket::Config::default()
    };

    let _rocket = rocket::build()
        .configure(rocket_config)
        .attach(Cors)
        .manage(server_config)
        .register("/api", catchers![bad_request, not_found, internal_error])
        .mount(
            "/api",
            routes![extract_skills, recommend, get_listings, health, options],
        )
        .launch()
        .await?;

    Ok(())
}
