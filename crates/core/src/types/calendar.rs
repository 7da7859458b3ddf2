//! Personal calendar event document.

use serde::{Deserialize, Serialize};

use super::id::{CalendarEventId, PostId};

/// An entry in a user's personal calendar (`Users/{id}/CalendarEvents`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: CalendarEventId,
    pub title: String,
    /// Event date as written by the client.
    pub date: String,
    pub is_all_day: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Post this entry was created from, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<PostId>,
    pub created_at: String,
    pub updated_at: String,
}
