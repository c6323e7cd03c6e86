//! Static page content: title, welcome text and the career background form.
//! Clients render these as-is.

use serde::Serialize;

use crate::models::profile::{EducationLevel, WorkEnvironment};

pub const PAGE_TITLE: &str = "Career Guidance ChatBot";

pub const WELCOME_MARKDOWN: &str = "Welcome to the Career Guidance ChatBot!  \n\
Ask me anything about your career choices, skill development, or higher education paths.  \n\
Let's explore your opportunities together! 🌟";

pub const FORM_HEADING: &str = "Tell me more about your career background";
pub const CHAT_PLACEHOLDER: &str = "Ask about careers, skills, or education...";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    TextArea,
    TextInput,
    Select,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormField {
    /// Key of the matching `Profile` field in the submission body.
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormDescriptor {
    pub title: &'static str,
    pub welcome: &'static str,
    pub heading: &'static str,
    pub fields: Vec<FormField>,
    pub submit_label: &'static str,
    pub chat_placeholder: &'static str,
}

pub fn career_form() -> FormDescriptor {
    FormDescriptor {
        title: PAGE_TITLE,
        welcome: WELCOME_MARKDOWN,
        heading: FORM_HEADING,
        fields: vec![
            FormField {
                name: "experience_text",
                label: "How much experience do you have in your current career?",
                kind: FieldKind::TextArea,
                placeholder: Some("e.g., I have 2 years of experience in software development."),
                options: vec![],
            },
            FormField {
                name: "interest_text",
                label: "What field or industry are you interested in?",
                kind: FieldKind::TextInput,
                placeholder: Some("e.g., Data Science, Web Development, etc."),
                options: vec![],
            },
            FormField {
                name: "education_level",
                label: "What is your highest level of education?",
                kind: FieldKind::Select,
                placeholder: None,
                options: EducationLevel::ALL.iter().map(|l| l.label()).collect(),
            },
            FormField {
                name: "work_environment",
                label: "What type of work environment do you prefer?",
                kind: FieldKind::Select,
                placeholder: None,
                options: WorkEnvironment::ALL.iter().map(|e| e.label()).collect(),
            },
        ],
        submit_label: "Submit",
        chat_placeholder: CHAT_PLACEHOLDER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::Profile;

    #[test]
    fn test_form_fields_map_onto_profile_keys() {
        let form = career_form();
        let names: Vec<_> = form.fields.iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            ["experience_text", "interest_text", "education_level", "work_environment"]
        );

        let profile = serde_json::to_value(Profile::default()).unwrap();
        for name in names {
            assert!(profile.get(name).is_some(), "Profile has no field {name}");
        }
    }

    #[test]
    fn test_select_options_round_trip_into_profile() {
        let form = career_form();
        let education = &form.fields[2];
        assert_eq!(education.options.len(), 4);
        for option in &education.options {
            let level: EducationLevel = serde_json::from_value(serde_json::json!(option)).unwrap();
            assert_eq!(level.label(), *option);
        }
        assert_eq!(form.fields[3].options, ["Remote", "Office", "Hybrid"]);
    }
}
