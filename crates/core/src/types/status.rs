//! Campus, category, and status enums.
//!
//! Records keep these fields as the raw strings stored in the document
//! database; the enums here are for code that needs to interpret them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind}: {value}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// University of Toronto campus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Campus {
    /// St. George (downtown).
    Utsg,
    /// Mississauga.
    Utm,
    /// Scarborough.
    Utsc,
}

impl Campus {
    /// All campuses, in display order.
    pub const ALL: [Self; 3] = [Self::Utsg, Self::Utm, Self::Utsc];

    /// The short code stored on club and post documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Utsg => "UTSG",
            Self::Utm => "UTM",
            Self::Utsc => "UTSC",
        }
    }

    /// Whether a stored campus string refers to this campus.
    #[must_use]
    pub fn matches(self, stored: &str) -> bool {
        stored.trim().eq_ignore_ascii_case(self.as_str())
    }
}

impl std::fmt::Display for Campus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Campus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|campus| campus.matches(s))
            .ok_or_else(|| ParseEnumError::new("campus", s))
    }
}

/// Post category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostCategory {
    General,
    Event,
    Announcement,
    #[serde(rename = "Hiring Opportunity")]
    HiringOpportunity,
}

impl PostCategory {
    /// Categories reported when no posts are available to derive them from.
    pub const DEFAULTS: [Self; 4] = [
        Self::General,
        Self::Event,
        Self::Announcement,
        Self::HiringOpportunity,
    ];

    /// The category label stored on post documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Event => "Event",
            Self::Announcement => "Announcement",
            Self::HiringOpportunity => "Hiring Opportunity",
        }
    }

    /// Whether a stored category string refers to this category.
    #[must_use]
    pub fn matches(self, stored: &str) -> bool {
        stored.trim().eq_ignore_ascii_case(self.as_str())
    }
}

impl std::fmt::Display for PostCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PostCategory {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::DEFAULTS
            .into_iter()
            .find(|category| category.matches(s))
            .ok_or_else(|| ParseEnumError::new("post category", s))
    }
}

/// Whether a club position accepts applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PositionStatus {
    #[default]
    Open,
    Closed,
}

/// Submitted application status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    /// Saved but not submitted.
    #[default]
    Draft,
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campus_parse_is_case_insensitive() {
        assert_eq!("utsg".parse::<Campus>(), Ok(Campus::Utsg));
        assert_eq!(" UTM ".parse::<Campus>(), Ok(Campus::Utm));
        assert!("UTX".parse::<Campus>().is_err());
    }

    #[test]
    fn test_campus_serializes_as_code() {
        let json = serde_json::to_string(&Campus::Utsc).expect("serialize");
        assert_eq!(json, "\"UTSC\"");
    }

    #[test]
    fn test_post_category_labels() {
        assert_eq!(PostCategory::HiringOpportunity.as_str(), "Hiring Opportunity");
        let json = serde_json::to_string(&PostCategory::HiringOpportunity).expect("serialize");
        assert_eq!(json, "\"Hiring Opportunity\"");
        assert_eq!(
            "hiring opportunity".parse::<PostCategory>(),
            Ok(PostCategory::HiringOpportunity)
        );
    }

    #[test]
    fn test_application_status_roundtrip_strings() {
        let status: ApplicationStatus = serde_json::from_str("\"pending\"").expect("deserialize");
        assert_eq!(status, ApplicationStatus::Pending);
        assert_eq!(status.to_string(), "pending");
    }
}
