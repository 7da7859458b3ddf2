//! Pending club request document.

use serde::{Deserialize, Serialize};

use super::id::{PendingClubId, UserId};

/// A request to create a club, awaiting admin approval.
///
/// Stored in the `Pending_Clubs` collection. Approval creates a `Club` from
/// the `club_*` fields; both approval and rejection delete the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PendingClub {
    pub id: PendingClubId,
    /// The requesting user.
    pub user: UserId,
    pub club_name: String,
    pub club_campus: String,
    pub club_description: String,
    pub club_image: String,
    pub club_instagram: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}
