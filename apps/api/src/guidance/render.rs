//! Markdown rendering of a form submission, laid out the way the page shows
//! it: input summary, then recommendations (or guidance), education path and
//! work environment sections.

use crate::guidance::submission::SubmissionOutcome;
use crate::models::profile::Profile;

const RECOMMENDATIONS_HEADING: &str = "Here are some personalized recommendations:";
const EDUCATION_HEADING: &str = "Suggested Certifications and Education Path:";
const ENVIRONMENT_HEADING: &str = "Recommended Work Environment:";

pub fn render_summary(profile: &Profile) -> String {
    format!(
        "**Career Experience:** {}\n\n**Field of Interest:** {}\n\n**Education Level:** {}\n\n**Preferred Work Environment:** {}\n",
        profile.experience_text,
        profile.interest_text,
        profile.education_level.label(),
        profile.work_environment.label(),
    )
}

pub fn render_submission(profile: &Profile, outcome: &SubmissionOutcome) -> String {
    let mut out = render_summary(profile);

    match outcome {
        SubmissionOutcome::Recommended { recommendation } => {
            push_section(&mut out, RECOMMENDATIONS_HEADING, &recommendation.skill_lines());
            push_section(&mut out, EDUCATION_HEADING, &recommendation.education_advice);
            push_section(&mut out, ENVIRONMENT_HEADING, &recommendation.environment_advice);
        }
        SubmissionOutcome::Incomplete { message } => {
            out.push('\n');
            out.push_str(message);
            out.push('\n');
        }
    }

    out
}

fn push_section(out: &mut String, heading: &str, lines: &[String]) {
    out.push_str(&format!("\n### {heading}\n\n"));
    for line in lines {
        out.push_str(&format!("- {line}\n"));
    }
}
