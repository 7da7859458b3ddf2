//! Post document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{ClubId, PostId};
use super::status::PostCategory;
use super::timestamp::parse_timestamp;

/// A club post as stored in the `Posts` collection.
///
/// Event posts carry `date_occuring`; every post carries `date_posted`.
/// Both are kept as the raw strings the client wrote.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub details: String,
    pub campus: String,
    /// ID of the club that published the post.
    pub club: ClubId,
    pub category: String,
    pub hashtags: Vec<String>,
    /// Field name matches the stored documents.
    pub date_occuring: String,
    pub date_posted: String,
    pub likes: u64,
    pub image: String,
    pub links: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Post {
    /// When the event happens, if the post has a parseable event date.
    #[must_use]
    pub fn occurs_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.date_occuring)
    }

    /// When the post was published, if parseable.
    #[must_use]
    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.date_posted)
    }

    /// Whether the post is filed under the given category.
    #[must_use]
    pub fn is_category(&self, category: PostCategory) -> bool {
        category.matches(&self.category)
    }

    /// Where the event takes place: the first non-blank of `location`,
    /// `venue` and `address`.
    #[must_use]
    pub fn place(&self) -> Option<&str> {
        self.place_fields()
            .find(|place| !place.trim().is_empty())
    }

    /// The raw place fields, in preference order.
    pub fn place_fields(&self) -> impl Iterator<Item = &str> {
        [&self.location, &self.venue, &self.address]
            .into_iter()
            .filter_map(|field| field.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_dates_parse() {
        let post = Post {
            date_occuring: "2025-09-10T17:00:00Z".to_string(),
            date_posted: "not a date".to_string(),
            ..Post::default()
        };
        assert!(post.occurs_at().is_some());
        assert!(post.posted_at().is_none());
    }

    #[test]
    fn test_place_prefers_location() {
        let post = Post {
            location: Some("BA 1130".to_string()),
            venue: Some("Bahen".to_string()),
            ..Post::default()
        };
        assert_eq!(post.place(), Some("BA 1130"));

        let post = Post {
            location: Some("  ".to_string()),
            venue: None,
            ..Post::default()
        };
        assert_eq!(post.place(), None);
    }

    #[test]
    fn test_place_falls_back_to_address() {
        let post = Post {
            location: Some(String::new()),
            venue: None,
            address: Some("40 St George St".to_string()),
            ..Post::default()
        };
        assert_eq!(post.place(), Some("40 St George St"));
    }

    #[test]
    fn test_is_category() {
        let post = Post {
            category: "Event".to_string(),
            ..Post::default()
        };
        assert!(post.is_category(PostCategory::Event));
        assert!(!post.is_category(PostCategory::General));
    }
}
