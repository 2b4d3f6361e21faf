use invoicing_core::input::lenient_decimal;
use invoicing_core::{parse_amount, Decimal};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, with = "lenient_decimal")]
    pub price: Decimal,
    #[serde(default = "one_week")]
    pub duration_weeks: u32,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub published: bool,
}

fn one_week() -> u32 {
    1
}

impl Course {
    pub fn price_label(&self) -> String {
        if self.price.is_zero() {
            "Free".to_string()
        } else {
            invoicing_core::format_with_symbol(self.price, invoicing_core::Currency::Usd)
        }
    }
}

/// Body for course create and update calls.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CoursePayload {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(custom(function = "validate_slug"))]
    pub slug: String,
    pub description: String,
    #[serde(with = "lenient_decimal")]
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    #[validate(range(min = 1, message = "Duration must be at least one week"))]
    pub duration_weeks: u32,
    pub level: String,
    pub published: bool,
}

fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    let well_formed = !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if well_formed {
        Ok(())
    } else {
        let mut error = ValidationError::new("slug");
        error.message = Some("Use lowercase letters, digits and dashes only".into());
        Err(error)
    }
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        let mut error = ValidationError::new("price");
        error.message = Some("Price cannot be negative".into());
        return Err(error);
    }
    Ok(())
}

/// Raw course form fields as posted by the admin editor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub duration_weeks: String,
    #[serde(default)]
    pub level: String,
    /// Checkbox: present only when ticked.
    #[serde(default)]
    pub published: Option<String>,
}

impl CourseInput {
    pub fn from_course(course: &Course) -> Self {
        Self {
            title: course.title.clone(),
            slug: course.slug.clone(),
            description: course.description.clone(),
            price: course.price.to_string(),
            duration_weeks: course.duration_weeks.to_string(),
            level: course.level.clone(),
            published: course.published.then(|| "on".to_string()),
        }
    }

    pub fn is_published(&self) -> bool {
        self.published.is_some()
    }

    pub fn to_payload(&self) -> CoursePayload {
        CoursePayload {
            title: self.title.trim().to_string(),
            slug: self.slug.trim().to_string(),
            description: self.description.trim().to_string(),
            price: parse_amount(&self.price),
            duration_weeks: self.duration_weeks.trim().parse().unwrap_or(0),
            level: self.level.trim().to_string(),
            published: self.is_published(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Pending,
    Active,
    Completed,
    Cancelled,
}

impl EnrollmentStatus {
    pub const ALL: [EnrollmentStatus; 4] = [
        EnrollmentStatus::Pending,
        EnrollmentStatus::Active,
        EnrollmentStatus::Completed,
        EnrollmentStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Pending => "pending",
            EnrollmentStatus::Active => "active",
            EnrollmentStatus::Completed => "completed",
            EnrollmentStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value.trim()))
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            EnrollmentStatus::Pending => "badge-amber",
            EnrollmentStatus::Active => "badge-blue",
            EnrollmentStatus::Completed => "badge-green",
            EnrollmentStatus::Cancelled => "badge-zinc",
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(alias = "name")]
    pub student_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub course_title: String,
    pub status: EnrollmentStatus,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Enrollment {
    pub fn enrolled_label(&self) -> String {
        self.created_at
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AcademyAnalytics {
    pub total_courses: u64,
    pub total_enrollments: u64,
    pub active_students: u64,
    #[serde(with = "lenient_decimal")]
    pub total_revenue: Decimal,
    #[serde(with = "lenient_decimal")]
    pub completion_rate: Decimal,
    pub courses: Vec<CourseStat>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CourseStat {
    pub title: String,
    pub enrollments: u64,
    #[serde(with = "lenient_decimal")]
    pub revenue: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> CourseInput {
        CourseInput {
            title: " Rust for Teams ".into(),
            slug: "rust-for-teams".into(),
            description: "Hands-on".into(),
            price: "1,200".into(),
            duration_weeks: "6".into(),
            level: "intermediate".into(),
            published: Some("on".into()),
        }
    }

    #[test]
    fn input_becomes_payload() {
        let payload = input().to_payload();
        assert_eq!(payload.title, "Rust for Teams");
        assert_eq!(payload.price, Decimal::from(1200));
        assert_eq!(payload.duration_weeks, 6);
        assert!(payload.published);
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn slug_and_duration_are_checked() {
        let mut raw = input();
        raw.slug = "Rust Teams".into();
        raw.duration_weeks = "0".into();
        let errors = raw.to_payload().validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("slug"));
        assert!(fields.contains_key("duration_weeks"));
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut raw = input();
        raw.price = "-5".into();
        let errors = raw.to_payload().validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!(
            EnrollmentStatus::parse("Active"),
            Some(EnrollmentStatus::Active)
        );
        assert_eq!(EnrollmentStatus::parse("archived"), None);
    }
}
