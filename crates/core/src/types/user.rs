//! User document.

use serde::{Deserialize, Serialize};

use super::id::{ClubId, PostId, UserId};

/// A ClubHub user as stored in the `Users` collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub campus: String,
    pub bio: String,
    pub followed_clubs: Vec<ClubId>,
    pub liked_posts: Vec<PostId>,
    pub is_admin: bool,
    pub is_executive: bool,
    /// Clubs this user is an executive of.
    pub managed_clubs: Vec<ClubId>,
}
