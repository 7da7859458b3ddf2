//! Club position records.
//!
//! Clubs embed their positions in the club document as `openPositions` and
//! `closedPositions` arrays.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::id::{ClubId, PositionId, UserId};
use super::status::PositionStatus;

/// An application question.
///
/// Older positions store a bare prompt string; newer ones store the prompt
/// together with its input type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PositionQuestion {
    Prompt(String),
    Typed {
        question: String,
        #[serde(rename = "type")]
        input_type: String,
    },
}

impl PositionQuestion {
    /// The question text shown to applicants.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Prompt(text) | Self::Typed { question: text, .. } => text,
        }
    }
}

/// Fields shared by open and closed positions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Position {
    pub position_id: PositionId,
    pub title: String,
    pub description: String,
    pub requirements: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(rename = "date_posted", skip_serializing_if = "Option::is_none")]
    pub date_posted: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PositionStatus>,
    /// Question key to question.
    pub questions: BTreeMap<String, PositionQuestion>,
    pub club_id: ClubId,
}

/// A position currently accepting applications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenPosition {
    #[serde(flatten)]
    pub position: Position,
    /// Users with a final (non-draft) application.
    pub applicants: Vec<UserId>,
}

/// A position no longer accepting applications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClosedPosition {
    #[serde(flatten)]
    pub position: Position,
    #[serde(rename = "closedAt", skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<String>,
}
