use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PartnershipType {
    Technology,
    Reseller,
    Training,
    Referral,
    Other,
}

impl PartnershipType {
    pub const ALL: [PartnershipType; 5] = [
        PartnershipType::Technology,
        PartnershipType::Reseller,
        PartnershipType::Training,
        PartnershipType::Referral,
        PartnershipType::Other,
    ];

    pub fn value(&self) -> &'static str {
        match self {
            PartnershipType::Technology => "technology",
            PartnershipType::Reseller => "reseller",
            PartnershipType::Training => "training",
            PartnershipType::Referral => "referral",
            PartnershipType::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PartnershipType::Technology => "Technology partner",
            PartnershipType::Reseller => "Reseller",
            PartnershipType::Training => "Training partner",
            PartnershipType::Referral => "Referral partner",
            PartnershipType::Other => "Something else",
        }
    }
}

/// Partnership enquiry, posted as a form and forwarded as JSON.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct PartnershipRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 120, message = "Name is required"))]
    pub name: String,

    #[serde(default)]
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 160, message = "Company is required"))]
    pub company: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    #[validate(custom(function = "validate_partnership_type"))]
    pub partnership_type: String,

    #[serde(default)]
    #[validate(length(
        min = 10,
        max = 5000,
        message = "Tell us a little more (at least 10 characters)"
    ))]
    pub message: String,
}

fn validate_partnership_type(value: &str) -> Result<(), validator::ValidationError> {
    if PartnershipType::ALL.iter().any(|t| t.value() == value) {
        Ok(())
    } else {
        let mut error = validator::ValidationError::new("partnership_type");
        error.message = Some("Choose a partnership type".into());
        Err(error)
    }
}

impl PartnershipRequest {
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            company: self.company.trim().to_string(),
            phone: self.phone.trim().to_string(),
            partnership_type: self.partnership_type.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PartnershipRequest {
        PartnershipRequest {
            name: "Amina".into(),
            email: "amina@acme.co".into(),
            company: "Acme".into(),
            phone: String::new(),
            partnership_type: "reseller".into(),
            message: "We resell cloud services in the region.".into(),
        }
    }

    #[test]
    fn complete_request_is_valid() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn short_message_and_unknown_type_are_rejected() {
        let invalid = PartnershipRequest {
            partnership_type: "franchise".into(),
            message: "hi".into(),
            ..request()
        };
        let errors = invalid.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("partnership_type"));
        assert!(fields.contains_key("message"));
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(request()).unwrap();
        assert_eq!(json["partnershipType"], "reseller");
    }
}
