//! Form submission pipeline: completeness check → classify → generate.

use serde::Serialize;

use crate::guidance::classifier::classify;
use crate::guidance::recommendations::{generate, RecommendationResult};
use crate::guidance::trend::TrendSource;
use crate::models::profile::Profile;

pub const INCOMPLETE_PROFILE_MESSAGE: &str = "Please provide both your career experience and field of interest for personalized recommendations.";

/// What a submission produces. An incomplete profile is not an error, it just
/// yields guidance text instead of a recommendation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    Recommended { recommendation: RecommendationResult },
    Incomplete { message: String },
}

impl SubmissionOutcome {
    pub fn recommendation(&self) -> Option<&RecommendationResult> {
        match self {
            SubmissionOutcome::Recommended { recommendation } => Some(recommendation),
            SubmissionOutcome::Incomplete { .. } => None,
        }
    }
}

pub fn evaluate_submission(profile: &Profile, trends: &dyn TrendSource) -> SubmissionOutcome {
    if !profile.is_complete() {
        return SubmissionOutcome::Incomplete {
            message: INCOMPLETE_PROFILE_MESSAGE.to_string(),
        };
    }

    let bucket = classify(&profile.interest_text, &profile.experience_text);
    SubmissionOutcome::Recommended {
        recommendation: generate(
            bucket,
            profile.education_level,
            profile.work_environment,
            trends,
        ),
    }
}
