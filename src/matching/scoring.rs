// src/matching/scoring.rs
use super::{CandidateProfile, ListingDefect, MatchError, RecommendOutcome, ScoredListing};
use crate::catalog::Listing;
use crate::utils::{normalize_term, terms_match};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct MatcherConfig {
    /// Listings scoring strictly above this are promoted into the ranked
    /// head of the output; everything else trails at score 0.
    pub promotion_cutoff: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            promotion_cutoff: env_promotion_cutoff(),
        }
    }
}

/// The recommendation engine. Pure: no I/O, no state beyond its config, so a
/// single instance may serve concurrent requests against a shared catalog.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    config: MatcherConfig,
}

impl Matcher {
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    /// Score every catalog listing against the profile and return them all:
    /// promoted listings sorted by descending score (stable, so ties keep
    /// catalog order), then the remaining listings in catalog order at score 0.
    ///
    /// Listings with blank required fields are excluded and reported in
    /// `rejected` instead of being scored.
    pub fn recommend(
        &self,
        profile: &CandidateProfile,
        catalog: &[Listing],
    ) -> Result<RecommendOutcome, MatchError> {
        let w = profile.location_weight;
        if !(0.0..=1.0).contains(&w) {
            return Err(MatchError::WeightOutOfRange(w));
        }

        let mut rejected = Vec::new();
        let mut scored = Vec::new();

        for listing in catalog {
            if let Some(field) = listing.missing_field() {
                warn!(
                    "Excluding listing '{}' from scoring: missing required field '{}'",
                    listing.id, field
                );
                rejected.push(ListingDefect {
                    id: listing.id.clone(),
                    reason: format!("missing required field '{}'", field),
                });
                continue;
            }

            scored.push((listing, self.score_listing(profile, listing)));
        }

        let cutoff = self.config.promotion_cutoff;
        let mut listings: Vec<ScoredListing> = scored
            .iter()
            .filter(|entry| entry.1 > cutoff)
            .map(|entry| ScoredListing {
                listing: entry.0.clone(),
                match_score: entry.1,
            })
            .collect();
        // Vec::sort_by is stable: equal scores keep their catalog order.
        listings.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(Ordering::Equal)
        });

        listings.extend(
            scored
                .iter()
                .filter(|entry| entry.1 <= cutoff)
                .map(|entry| ScoredListing {
                    listing: entry.0.clone(),
                    match_score: 0.0,
                }),
        );

        Ok(RecommendOutcome { listings, rejected })
    }

    fn score_listing(&self, profile: &CandidateProfile, listing: &Listing) -> f64 {
        let s_skill = skill_overlap_score(&listing.skills, &profile.skills);
        let s_sector = sector_score(&listing.sector, &profile.sector_interests);
        let s_location = location_score(&profile.location_preference, &listing.location);

        // Skills and declared sector interest weigh equally within content fit.
        let s_pref = (s_skill + s_sector) / 2.0;
        let w = profile.location_weight;

        ((1.0 - w) * s_pref + w * s_location).clamp(0.0, 1.0)
    }
}

/// Fraction of the listing's required skills the candidate has, after
/// case-insensitive normalization. A listing with no required skills scores
/// 0: nothing to match against is not a match.
pub fn skill_overlap_score(required: &[String], candidate: &[String]) -> f64 {
    let required = normalize_skill_set(required);
    if required.is_empty() {
        return 0.0;
    }

    let candidate = normalize_skill_set(candidate);
    let matched = required.intersection(&candidate).count();

    matched as f64 / required.len() as f64
}

/// 1 when the listing's sector matches any declared interest, else 0.
pub fn sector_score(sector: &str, interests: &[String]) -> f64 {
    if interests.iter().any(|interest| terms_match(sector, interest)) {
        1.0
    } else {
        0.0
    }
}

/// 1 when no preference is stated or the preference matches the listing's
/// location, else 0.
pub fn location_score(preference: &str, location: &str) -> f64 {
    if preference.trim().is_empty() || terms_match(preference, location) {
        1.0
    } else {
        0.0
    }
}

fn normalize_skill_set(skills: &[String]) -> BTreeSet<String> {
    skills
        .iter()
        .map(|s| normalize_term(s))
        .filter(|s| !s.is_empty())
        .collect()
}

fn env_promotion_cutoff() -> f64 {
    std::env::var("INTERNMATCH_PROMOTION_CUTOFF")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn listing(id: &str, sector: &str, location: &str, skills: &[&str]) -> Listing {
        Listing {
            id: id.into(),
            title: format!("{} Intern", sector),
            company: "Acme Corp".into(),
            description: "An internship".into(),
            location: location.into(),
            sector: sector.into(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn profile() -> CandidateProfile {
        CandidateProfile {
            skills: vec!["Python".into(), "SQL".into()],
            location_preference: "".into(),
            sector_interests: vec!["Technology".into()],
            location_weight: 0.5,
        }
    }

    #[test]
    fn worked_example_scores_eleven_twelfths() {
        let matcher = Matcher::default();
        let catalog = vec![listing(
            "a",
            "Technology",
            "Remote",
            &["Python", "SQL", "Excel"],
        )];

        let outcome = matcher.recommend(&profile(), &catalog).unwrap();
        // S_skill = 2/3, S_sector = 1, S_location = 1 (no preference)
        // S_pref = 5/6, score = 0.5 * 5/6 + 0.5 * 1 = 11/12
        assert!((outcome.listings[0].match_score - 11.0 / 12.0).abs() < EPS);
    }

    #[test]
    fn output_length_matches_catalog_length() {
        let matcher = Matcher::default();
        let catalog = vec![
            listing("a", "Technology", "Remote", &["Python"]),
            listing("b", "Finance", "London", &["Excel"]),
            listing("c", "Healthcare", "Berlin", &[]),
        ];

        let outcome = matcher.recommend(&profile(), &catalog).unwrap();
        assert_eq!(outcome.listings.len(), catalog.len());
        assert!(outcome.rejected.is_empty());

        let mut ids: Vec<&str> = outcome
            .listings
            .iter()
            .map(|s| s.listing.id.as_str())
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn all_scores_within_unit_interval() {
        let matcher = Matcher::default();
        let catalog = vec![
            listing("a", "Technology", "Remote", &["Python", "SQL"]),
            listing("b", "Finance", "London", &["Excel"]),
            listing("c", "Technology", "Paris", &[]),
        ];

        for w in [0.0, 0.25, 0.5, 0.75, 1.0] {
            let mut p = profile();
            p.location_weight = w;
            p.location_preference = "Remote".into();
            let outcome = matcher.recommend(&p, &catalog).unwrap();
            for scored in &outcome.listings {
                assert!(scored.match_score >= 0.0 && scored.match_score <= 1.0);
            }
        }
    }

    #[test]
    fn weight_zero_is_pure_content_fit() {
        let matcher = Matcher::default();
        let catalog = vec![listing("a", "Technology", "Tokyo", &["Python", "SQL"])];

        let mut p = profile();
        p.location_weight = 0.0;
        p.location_preference = "definitely not tokyo".into();

        let outcome = matcher.recommend(&p, &catalog).unwrap();
        // S_skill = 1, S_sector = 1, location ignored entirely
        assert!((outcome.listings[0].match_score - 1.0).abs() < EPS);
    }

    #[test]
    fn weight_one_is_pure_location_fit() {
        let matcher = Matcher::default();
        let catalog = vec![listing("a", "Finance", "Berlin", &["Cobol"])];

        let mut p = profile();
        p.location_weight = 1.0;
        p.location_preference = "Berlin".into();

        let outcome = matcher.recommend(&p, &catalog).unwrap();
        // Skills and sector both miss, but only location counts
        assert!((outcome.listings[0].match_score - 1.0).abs() < EPS);
    }

    #[test]
    fn score_is_monotonic_in_weight() {
        let matcher = Matcher::default();
        // Location fits, content does not: raising w must raise the score.
        let catalog = vec![listing("a", "Finance", "Remote", &["Cobol"])];

        let mut previous = -1.0;
        for w in [0.0, 0.2, 0.4, 0.6, 0.8, 1.0] {
            let mut p = profile();
            p.location_weight = w;
            p.location_preference = "Remote".into();
            let score = matcher.recommend(&p, &catalog).unwrap().listings[0].match_score;
            assert!(score > previous);
            previous = score;
        }

        // Content fits, location does not: raising w must lower the score.
        let catalog = vec![listing("a", "Technology", "Tokyo", &["Python", "SQL"])];
        let mut previous = 2.0;
        for w in [0.0, 0.2, 0.4, 0.6, 0.8, 1.0] {
            let mut p = profile();
            p.location_weight = w;
            p.location_preference = "Berlin".into();
            let score = matcher.recommend(&p, &catalog).unwrap().listings[0].match_score;
            assert!(score < previous);
            previous = score;
        }
    }

    #[test]
    fn identical_inputs_give_identical_output() {
        let matcher = Matcher::default();
        let catalog = vec![
            listing("a", "Technology", "Remote", &["Python"]),
            listing("b", "Finance", "London", &["SQL", "Excel"]),
            listing("c", "Technology", "Remote", &["Rust"]),
        ];
        let mut p = profile();
        p.location_preference = "Remote".into();

        let first = matcher.recommend(&p, &catalog).unwrap();
        let second = matcher.recommend(&p, &catalog).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn equal_scores_keep_catalog_order() {
        let matcher = Matcher::default();
        // Identical fit for both listings.
        let catalog = vec![
            listing("first", "Technology", "Remote", &["Python"]),
            listing("second", "Technology", "Remote", &["Python"]),
        ];

        let outcome = matcher.recommend(&profile(), &catalog).unwrap();
        assert_eq!(outcome.listings[0].listing.id, "first");
        assert_eq!(outcome.listings[1].listing.id, "second");
    }

    #[test]
    fn no_required_skills_means_no_skill_credit() {
        assert_eq!(skill_overlap_score(&[], &["Python".into()]), 0.0);
    }

    #[test]
    fn empty_candidate_skills_score_zero_overlap() {
        let required = vec!["Python".into(), "SQL".into()];
        assert_eq!(skill_overlap_score(&required, &[]), 0.0);
    }

    #[test]
    fn skill_overlap_is_case_insensitive() {
        let required = vec!["python".into(), "sql".into()];
        let candidate = vec!["Python".into(), "SQL".into()];
        assert!((skill_overlap_score(&required, &candidate) - 1.0).abs() < EPS);
    }

    #[test]
    fn duplicate_required_skills_do_not_skew_the_fraction() {
        let required = vec!["Python".into(), "python".into(), "SQL".into()];
        let candidate = vec!["python".into()];
        assert!((skill_overlap_score(&required, &candidate) - 0.5).abs() < EPS);
    }

    #[test]
    fn total_miss_scores_zero_but_stays_in_output() {
        let matcher = Matcher::default();
        let catalog = vec![listing("a", "Agriculture", "Nairobi", &["Agronomy"])];

        let mut p = profile();
        p.location_preference = "Remote".into();

        let outcome = matcher.recommend(&p, &catalog).unwrap();
        assert_eq!(outcome.listings.len(), 1);
        assert_eq!(outcome.listings[0].match_score, 0.0);
        assert_eq!(outcome.listings[0].listing.id, "a");
    }

    #[test]
    fn out_of_range_weight_is_rejected_before_scoring() {
        let matcher = Matcher::default();
        let catalog = vec![listing("a", "Technology", "Remote", &["Python"])];

        for w in [-0.1, 1.1, f64::NAN] {
            let mut p = profile();
            p.location_weight = w;
            let err = matcher.recommend(&p, &catalog).unwrap_err();
            assert!(matches!(err, MatchError::WeightOutOfRange(_)));
        }
    }

    #[test]
    fn malformed_listing_is_excluded_and_reported() {
        let matcher = Matcher::default();
        let mut bad = listing("bad", "Technology", "Remote", &["Python"]);
        bad.sector = "  ".into();
        let catalog = vec![listing("good", "Technology", "Remote", &["Python"]), bad];

        let outcome = matcher.recommend(&profile(), &catalog).unwrap();
        assert_eq!(outcome.listings.len(), 1);
        assert_eq!(outcome.listings[0].listing.id, "good");
        assert_eq!(outcome.rejected.len(), 1);
        assert_eq!(outcome.rejected[0].id, "bad");
        assert!(outcome.rejected[0].reason.contains("sector"));
    }

    #[test]
    fn promotion_cutoff_demotes_weak_matches_to_zero() {
        let matcher = Matcher::new(MatcherConfig {
            promotion_cutoff: 0.6,
        });
        let catalog = vec![
            // Full content fit: (1 + 1) / 2 = 1.0 at w = 0
            listing("strong", "Technology", "Remote", &["Python", "SQL"]),
            // Sector-only fit: (0 + 1) / 2 = 0.5 at w = 0, below the cutoff
            listing("weak", "Technology", "Remote", &["Rust"]),
        ];

        let mut p = profile();
        p.location_weight = 0.0;

        let outcome = matcher.recommend(&p, &catalog).unwrap();
        assert_eq!(outcome.listings[0].listing.id, "strong");
        assert!(outcome.listings[0].match_score > 0.6);
        assert_eq!(outcome.listings[1].listing.id, "weak");
        assert_eq!(outcome.listings[1].match_score, 0.0);
    }

    #[test]
    fn empty_catalog_yields_empty_result() {
        let matcher = Matcher::default();
        let outcome = matcher.recommend(&profile(), &[]).unwrap();
        assert!(outcome.listings.is_empty());
        assert!(outcome.rejected.is_empty());
    }

    #[test]
    fn empty_sector_interests_give_no_sector_credit() {
        assert_eq!(sector_score("Technology", &[]), 0.0);
        assert_eq!(sector_score("Technology", &["Tech".into()]), 1.0);
    }

    #[test]
    fn empty_location_preference_never_penalizes() {
        assert_eq!(location_score("", "Anywhere"), 1.0);
        assert_eq!(location_score("   ", "Anywhere"), 1.0);
        assert_eq!(location_score("Berlin", "Berlin, Germany"), 1.0);
        assert_eq!(location_score("Berlin", "Paris"), 0.0);
    }
}
