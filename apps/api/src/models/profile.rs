use serde::{Deserialize, Serialize};

/// Highest completed education level, as offered by the form's select box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EducationLevel {
    #[default]
    #[serde(rename = "High School")]
    HighSchool,
    #[serde(rename = "Bachelor's Degree")]
    Bachelors,
    #[serde(rename = "Master's Degree")]
    Masters,
    #[serde(rename = "PhD")]
    PhD,
}

impl EducationLevel {
    pub const ALL: [EducationLevel; 4] = [
        EducationLevel::HighSchool,
        EducationLevel::Bachelors,
        EducationLevel::Masters,
        EducationLevel::PhD,
    ];

    /// Label shown in the form and echoed back in the submission summary.
    pub fn label(self) -> &'static str {
        match self {
            EducationLevel::HighSchool => "High School",
            EducationLevel::Bachelors => "Bachelor's Degree",
            EducationLevel::Masters => "Master's Degree",
            EducationLevel::PhD => "PhD",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WorkEnvironment {
    #[default]
    Remote,
    Office,
    Hybrid,
}

impl WorkEnvironment {
    pub const ALL: [WorkEnvironment; 3] = [
        WorkEnvironment::Remote,
        WorkEnvironment::Office,
        WorkEnvironment::Hybrid,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WorkEnvironment::Remote => "Remote",
            WorkEnvironment::Office => "Office",
            WorkEnvironment::Hybrid => "Hybrid",
        }
    }
}

/// One form submission. Missing text fields arrive as empty strings and
/// missing selects fall back to the first option, like an untouched select box.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub experience_text: String,
    #[serde(default)]
    pub interest_text: String,
    #[serde(default)]
    pub education_level: EducationLevel,
    #[serde(default)]
    pub work_environment: WorkEnvironment,
}

impl Profile {
    /// Both free-text fields must be filled before a recommendation is derived.
    pub fn is_complete(&self) -> bool {
        !self.experience_text.is_empty() && !self.interest_text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_education_level_uses_form_labels_on_the_wire() {
        let level: EducationLevel = serde_json::from_value(json!("Bachelor's Degree")).unwrap();
        assert_eq!(level, EducationLevel::Bachelors);
        assert_eq!(
            serde_json::to_value(EducationLevel::Masters).unwrap(),
            json!("Master's Degree")
        );
    }

    #[test]
    fn test_labels_match_serialized_form() {
        for level in EducationLevel::ALL {
            assert_eq!(serde_json::to_value(level).unwrap(), json!(level.label()));
        }
        for env in WorkEnvironment::ALL {
            assert_eq!(serde_json::to_value(env).unwrap(), json!(env.label()));
        }
    }

    #[test]
    fn test_missing_fields_take_form_defaults() {
        let profile: Profile = serde_json::from_value(json!({})).unwrap();
        assert_eq!(profile.experience_text, "");
        assert_eq!(profile.interest_text, "");
        assert_eq!(profile.education_level, EducationLevel::HighSchool);
        assert_eq!(profile.work_environment, WorkEnvironment::Remote);
        assert!(!profile.is_complete());
    }

    #[test]
    fn test_profile_needs_both_text_fields() {
        let mut profile = Profile {
            experience_text: "I have 2 years of experience".to_string(),
            ..Profile::default()
        };
        assert!(!profile.is_complete());
        profile.interest_text = "Data Science".to_string();
        assert!(profile.is_complete());
    }

    #[test]
    fn test_unknown_education_label_is_rejected() {
        let result: Result<EducationLevel, _> = serde_json::from_value(json!("Bootcamp"));
        assert!(result.is_err());
    }
}
