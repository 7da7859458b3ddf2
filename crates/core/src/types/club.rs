//! Club document.

use serde::{Deserialize, Serialize};

use super::id::{ClubId, UserId};
use super::position::{ClosedPosition, OpenPosition};

/// A campus club as stored in the `Clubs` collection.
///
/// Every field defaults when absent; older documents predate several of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Club {
    pub id: ClubId,
    pub name: String,
    pub description: String,
    /// Campus code (`UTSG`, `UTM`, `UTSC`) as written by the client.
    pub campus: String,
    /// Image URL.
    pub image: String,
    /// Instagram handle or profile URL.
    pub instagram: String,
    /// Contact email, when the club published one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub followers: u64,
    /// Users allowed to manage the club.
    pub executives: Vec<UserId>,
    pub links: Vec<String>,
    #[serde(rename = "openPositions")]
    pub open_positions: Vec<OpenPosition>,
    #[serde(rename = "closedPositions")]
    pub closed_positions: Vec<ClosedPosition>,
}

impl Club {
    /// Copy of the club without its executive list.
    ///
    /// Executives are user IDs and are not shown to anonymous readers.
    #[must_use]
    pub fn public_view(&self) -> Self {
        Self {
            executives: Vec::new(),
            ..self.clone()
        }
    }
}
