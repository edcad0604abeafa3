// src/catalog.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// An internship listing. Loaded once at startup and never mutated; many
/// matching requests read the same catalog concurrently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub company: String,
    pub description: String,
    pub location: String,
    pub sector: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl Listing {
    /// Name of the first required field that is missing or blank, if any.
    /// `description` and `skills` may legitimately be empty.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.id.trim().is_empty() {
            Some("id")
        } else if self.title.trim().is_empty() {
            Some("title")
        } else if self.company.trim().is_empty() {
            Some("company")
        } else if self.location.trim().is_empty() {
            Some("location")
        } else if self.sector.trim().is_empty() {
            Some("sector")
        } else {
            None
        }
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    listings: Vec<Listing>,
}

/// Load the static listing catalog from a YAML file.
///
/// The startup catalog is configuration data: a malformed listing here is a
/// deployment error, so loading fails instead of dropping the listing.
pub fn load_catalog(path: &Path) -> Result<Vec<Listing>> {
    if !path.exists() {
        anyhow::bail!(
            "Listing catalog not found: {}. Server cannot start without a catalog.",
            path.display()
        );
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;

    let catalog: CatalogFile = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse catalog file: {}", path.display()))?;

    for listing in &catalog.listings {
        if let Some(field) = listing.missing_field() {
            anyhow::bail!(
                "Catalog listing '{}' is missing required field '{}'",
                listing.id,
                field
            );
        }
    }

    info!(
        "Loaded {} listings from {}",
        catalog.listings.len(),
        path.display()
    );

    Ok(catalog.listings)
}
