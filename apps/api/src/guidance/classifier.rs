//! Profile Classifier: maps the free-text interest and experience fields
//! onto one of five recommendation buckets.
//!
//! Matching is literal substring search, not parsing:
//! - interest is lower-cased before matching "data science" / "web development"
//! - experience must contain "2 years" exactly as typed (case-sensitive)
//!
//! Anything that matches neither interest keyword falls through to
//! `GenericExploring`.

use serde::{Deserialize, Serialize};

const DATA_SCIENCE_KEYWORD: &str = "data science";
const WEB_DEVELOPMENT_KEYWORD: &str = "web development";
const EXPERIENCED_MARKER: &str = "2 years";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationBucket {
    DataScienceExperienced,
    DataScienceBeginner,
    WebDevExperienced,
    WebDevBeginner,
    GenericExploring,
}

impl RecommendationBucket {
    #[cfg(test)]
    pub const ALL: [RecommendationBucket; 5] = [
        RecommendationBucket::DataScienceExperienced,
        RecommendationBucket::DataScienceBeginner,
        RecommendationBucket::WebDevExperienced,
        RecommendationBucket::WebDevBeginner,
        RecommendationBucket::GenericExploring,
    ];

    /// Display name of the career field, `None` for the exploring bucket.
    pub fn field_name(self) -> Option<&'static str> {
        match self {
            RecommendationBucket::DataScienceExperienced
            | RecommendationBucket::DataScienceBeginner => Some("Data Science"),
            RecommendationBucket::WebDevExperienced | RecommendationBucket::WebDevBeginner => {
                Some("Web Development")
            }
            RecommendationBucket::GenericExploring => None,
        }
    }

    /// True for the four buckets tied to a concrete career field.
    pub fn is_career_track(self) -> bool {
        self.field_name().is_some()
    }
}

pub fn classify(interest_text: &str, experience_text: &str) -> RecommendationBucket {
    let interest = interest_text.to_lowercase();
    let experienced = experience_text.contains(EXPERIENCED_MARKER);

    if interest.contains(DATA_SCIENCE_KEYWORD) {
        if experienced {
            RecommendationBucket::DataScienceExperienced
        } else {
            RecommendationBucket::DataScienceBeginner
        }
    } else if interest.contains(WEB_DEVELOPMENT_KEYWORD) {
        if experienced {
            RecommendationBucket::WebDevExperienced
        } else {
            RecommendationBucket::WebDevBeginner
        }
    } else {
        RecommendationBucket::GenericExploring
    }
}
