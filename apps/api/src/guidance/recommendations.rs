//! Recommendation Generator: turns a bucket, education level and preferred
//! work environment into fixed advice lists plus one mock market-trend label.
//!
//! Pure apart from the trend draw, which comes from the injected `TrendSource`.

use serde::Serialize;

use crate::guidance::classifier::RecommendationBucket;
use crate::guidance::trend::{MarketTrend, TrendSource};
use crate::models::profile::{EducationLevel, WorkEnvironment};

// ────────────────────────────────────────────────────────────────────────────
// Advice tables
// ────────────────────────────────────────────────────────────────────────────

const DATA_SCIENCE_EXPERIENCED: &[&str] = &[
    "Consider learning advanced machine learning algorithms and tools like TensorFlow.",
    "Explore data analysis techniques with Python (e.g., Pandas, NumPy).",
    "Try online courses from platforms like Coursera or edX on data science specialization.",
    "Consider getting a certification in AI or Machine Learning.",
];

const DATA_SCIENCE_BEGINNER: &[&str] = &[
    "Start with the basics of Python and statistics.",
    "Learn tools like Jupyter Notebooks, Pandas, and Matplotlib for data analysis.",
    "Build projects like data analysis with real-world datasets.",
    "Look into online introductory courses like 'Data Science for Beginners'.",
];

const WEB_DEV_EXPERIENCED: &[&str] = &[
    "Focus on mastering frameworks like React or Angular.",
    "Explore backend technologies like Node.js or Django.",
    "Build personal projects to showcase in your portfolio.",
    "Work on full-stack development to be a versatile developer.",
];

const WEB_DEV_BEGINNER: &[&str] = &[
    "Learn HTML, CSS, and JavaScript fundamentals.",
    "Try building simple static websites or blogs.",
    "Build basic responsive layouts using Bootstrap or Tailwind CSS.",
];

const GENERIC_EXPLORING: &[&str] = &[
    "It looks like you're exploring new career paths! I recommend starting with online tutorials in your field.",
    "Build a portfolio of your work to showcase your skills to potential employers.",
];

pub fn skill_advice(bucket: RecommendationBucket) -> &'static [&'static str] {
    match bucket {
        RecommendationBucket::DataScienceExperienced => DATA_SCIENCE_EXPERIENCED,
        RecommendationBucket::DataScienceBeginner => DATA_SCIENCE_BEGINNER,
        RecommendationBucket::WebDevExperienced => WEB_DEV_EXPERIENCED,
        RecommendationBucket::WebDevBeginner => WEB_DEV_BEGINNER,
        RecommendationBucket::GenericExploring => GENERIC_EXPLORING,
    }
}

pub fn education_advice(level: EducationLevel) -> &'static [&'static str] {
    match level {
        EducationLevel::HighSchool => &[
            "You might consider pursuing a Bachelor's degree in your field of interest.",
            "Look into online courses in your field to get started.",
        ],
        EducationLevel::Bachelors => &[
            "Consider pursuing a Master's degree for specialization.",
            "Attend workshops or bootcamps for industry-specific skills.",
        ],
        EducationLevel::Masters => &[
            "Explore PhD programs or certifications for expertise.",
            "Look for high-impact industry projects to get hands-on experience.",
        ],
        EducationLevel::PhD => &[
            "You are well-prepared for expert-level career opportunities.",
            "Look into post-doctoral research or advanced industry roles.",
        ],
    }
}

pub fn environment_advice(environment: WorkEnvironment) -> &'static [&'static str] {
    match environment {
        WorkEnvironment::Remote => &[
            "Consider companies that support fully remote teams like GitHub or Automattic.",
            "Work on developing strong communication and collaboration skills.",
        ],
        WorkEnvironment::Office => &[
            "Look for jobs at companies that have a strong office culture, like Google or Microsoft.",
            "Consider building a network within your local tech or industry community.",
        ],
        WorkEnvironment::Hybrid => &[
            "Hybrid work environments are popular at companies like Spotify and Apple.",
            "You can enjoy the flexibility of remote work while being connected with a team.",
        ],
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Result model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResult {
    pub bucket: RecommendationBucket,
    pub skill_advice: Vec<String>,
    /// Only drawn for the four career-track buckets.
    pub market_trend: Option<MarketTrend>,
    pub education_advice: Vec<String>,
    pub environment_advice: Vec<String>,
}

impl RecommendationResult {
    /// The market-trend sentence, e.g.
    /// "**Job Market Trend:** Data Science has a high demand in the current market."
    pub fn trend_line(&self) -> Option<String> {
        let trend = self.market_trend?;
        let field = self.bucket.field_name()?;
        Some(format!(
            "**Job Market Trend:** {field} has a {} in the current market.",
            trend.label()
        ))
    }

    /// Skill advice with the trend sentence slotted in. Experienced data
    /// science keeps the certification tip after the trend; every other
    /// bucket lists the trend last.
    pub fn skill_lines(&self) -> Vec<String> {
        let mut lines = self.skill_advice.clone();
        if let Some(trend) = self.trend_line() {
            let at = match self.bucket {
                RecommendationBucket::DataScienceExperienced => lines.len().saturating_sub(1),
                _ => lines.len(),
            };
            lines.insert(at, trend);
        }
        lines
    }
}

pub fn generate(
    bucket: RecommendationBucket,
    education_level: EducationLevel,
    work_environment: WorkEnvironment,
    trends: &dyn TrendSource,
) -> RecommendationResult {
    let market_trend = bucket.is_career_track().then(|| trends.draw());

    RecommendationResult {
        bucket,
        skill_advice: owned_lines(skill_advice(bucket)),
        market_trend,
        education_advice: owned_lines(education_advice(education_level)),
        environment_advice: owned_lines(environment_advice(work_environment)),
    }
}

fn owned_lines(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|s| s.to_string()).collect()
}
