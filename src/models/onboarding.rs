// src/models/onboarding.rs
use serde::{Deserialize, Serialize};

/// The three onboarding inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Phone];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
        }
    }

    /// Inline error shown under the input. The name field has none.
    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            Field::Name => None,
            Field::Email => Some("Please enter a valid email address"),
            Field::Phone => Some("Please enter a valid phone number"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OnboardingProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub completed: bool,
}

impl OnboardingProfile {
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => self.name.as_deref(),
            Field::Email => self.email.as_deref(),
            Field::Phone => self.phone.as_deref(),
        }
    }

    pub fn set(&mut self, field: Field, value: Option<String>) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
        }
    }

    pub fn filled_count(&self) -> usize {
        Field::ALL.iter().filter(|f| self.get(**f).is_some()).count()
    }

    pub fn is_ready(&self) -> bool {
        self.filled_count() == Field::ALL.len()
    }

    /// Builds the registration body once all three fields are present.
    pub fn to_request(&self, session_id: &str) -> Option<OnboardRequest> {
        Some(OnboardRequest {
            name: self.name.clone()?,
            email: self.email.clone()?,
            phone: self.phone.clone()?,
            session_id: session_id.to_string(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub session_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OnboardResponse {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub detail: Option<String>,
}

/// Contact fields the backend extracted from free-text chat.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DetectedInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl DetectedInfo {
    /// Non-empty detected values, in field order.
    pub fn fields(&self) -> Vec<(Field, &str)> {
        Field::ALL
            .iter()
            .filter_map(|field| {
                let value = match field {
                    Field::Name => self.name.as_deref(),
                    Field::Email => self.email.as_deref(),
                    Field::Phone => self.phone.as_deref(),
                };
                value.filter(|v| !v.is_empty()).map(|v| (*field, v))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_serializes_nulls_and_completed() {
        let profile = OnboardingProfile {
            name: Some("Jo".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Jo", "email": null, "phone": null, "completed": false})
        );
    }

    #[test]
    fn test_to_request_requires_all_fields() {
        let mut profile = OnboardingProfile::default();
        profile.set(Field::Name, Some("Jo".to_string()));
        profile.set(Field::Email, Some("jo@example.com".to_string()));
        assert!(profile.to_request("s1").is_none());
        assert_eq!(profile.filled_count(), 2);

        profile.set(Field::Phone, Some("5551234567".to_string()));
        let request = profile.to_request("s1").unwrap();
        assert_eq!(request.session_id, "s1");
        assert_eq!(request.phone, "5551234567");
        assert!(profile.is_ready());
    }

    #[test]
    fn test_detected_fields_skip_empty_values() {
        let info = DetectedInfo {
            name: Some(String::new()),
            email: Some("a@b.co".to_string()),
            phone: None,
        };
        assert_eq!(info.fields(), vec![(Field::Email, "a@b.co")]);
    }

    #[test]
    fn test_onboard_response_defaults() {
        let parsed: OnboardResponse = serde_json::from_str(r#"{"detail": "Email already used"}"#).unwrap();
        assert!(!parsed.success);
        assert_eq!(parsed.detail.as_deref(), Some("Email already used"));
        assert!(parsed.message.is_none());
    }
}
