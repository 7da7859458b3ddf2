//! Submitted application document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::id::{ApplicationId, ClubId, PositionId, UserId};
use super::status::ApplicationStatus;

/// An application to a club position.
///
/// Mirrored under both `Clubs/{id}/submittedApplications` and
/// `Users/{id}/submittedApplications`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubmittedApplication {
    pub id: ApplicationId,
    pub user_id: UserId,
    pub club_id: ClubId,
    pub position_id: PositionId,
    /// Question key to answer.
    pub answers: BTreeMap<String, String>,
    pub status: ApplicationStatus,
    pub submitted_at: String,
}
