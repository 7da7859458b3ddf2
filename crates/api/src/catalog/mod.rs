//! In-memory catalog of clubs and posts the assistant answers from.
//!
//! The catalog is loaded once at startup from a JSON snapshot of the club and
//! post collections:
//!
//! ```json
//! { "clubs": [{ "id": "c1", "name": "CSSU", ... }], "posts": [...] }
//! ```
//!
//! Search mirrors what the hosted document queries return: filters narrow a
//! candidate window, then text relevance decides what is kept.

pub mod scoring;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use clubhub_core::{Campus, Club, ClubId, Post, PostCategory};
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;

pub use scoring::{club_score, post_score};

/// Upper bound on clubs considered by one search.
const MAX_CLUB_CANDIDATES: usize = 100;
/// Clubs considered per requested result.
const CLUB_CANDIDATES_PER_RESULT: usize = 8;
/// Posts considered per requested result.
const POST_CANDIDATES_PER_RESULT: usize = 6;
/// Results returned by location lookups.
const LOCATION_LIMIT: usize = 5;

/// Errors loading a catalog snapshot.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Snapshot file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot is not valid JSON of the expected shape.
    #[error("invalid catalog snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Snapshot {
    clubs: Vec<Club>,
    posts: Vec<Post>,
}

/// Read-only club and post catalog.
#[derive(Debug, Default)]
pub struct Catalog {
    clubs: Vec<Club>,
    /// Newest first by `date_posted`; undated posts last.
    posts: Vec<Post>,
}

impl Catalog {
    /// Empty catalog. Every search returns nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalog from records.
    #[must_use]
    pub fn new(clubs: Vec<Club>, mut posts: Vec<Post>) -> Self {
        posts.sort_by_key(|post| std::cmp::Reverse(post.posted_at()));
        Self { clubs, posts }
    }

    /// Parse a JSON snapshot.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` if the JSON does not match the snapshot shape.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        Ok(Self::new(snapshot.clubs, snapshot.posts))
    }

    /// Load a JSON snapshot from disk.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read, or
    /// `CatalogError::Parse` if its contents are not a valid snapshot.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Number of clubs in the catalog.
    #[must_use]
    pub fn club_count(&self) -> usize {
        self.clubs.len()
    }

    /// Number of posts in the catalog.
    #[must_use]
    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    /// Search clubs by relevance.
    ///
    /// An empty query returns the first `limit` clubs on the campus. Results
    /// never include executives.
    #[instrument(skip(self), fields(results = tracing::field::Empty))]
    pub fn search_clubs(&self, query: &str, campus: Option<Campus>, limit: usize) -> Vec<Club> {
        let window = limit
            .saturating_mul(CLUB_CANDIDATES_PER_RESULT)
            .min(MAX_CLUB_CANDIDATES);
        let candidates = self
            .clubs
            .iter()
            .filter(|club| campus.is_none_or(|campus| campus.matches(&club.campus)))
            .take(window);

        let query = query.trim().to_lowercase();
        let results: Vec<Club> = if query.is_empty() {
            candidates.take(limit).map(Club::public_view).collect()
        } else {
            let mut scored: Vec<(u32, &Club)> = candidates
                .map(|club| (club_score(club, &query), club))
                .filter(|(score, _)| *score > 0)
                .collect();
            scored.sort_by_key(|(score, _)| std::cmp::Reverse(*score));
            scored
                .into_iter()
                .take(limit)
                .map(|(_, club)| club.public_view())
                .collect()
        };

        tracing::Span::current().record("results", results.len());
        results
    }

    /// Public details of one club.
    #[must_use]
    pub fn club_details(&self, id: &ClubId) -> Option<Club> {
        self.clubs
            .iter()
            .find(|club| &club.id == id)
            .map(Club::public_view)
    }

    /// Search posts by relevance, newest candidates first.
    #[instrument(skip(self), fields(results = tracing::field::Empty))]
    pub fn search_posts(
        &self,
        query: &str,
        campus: Option<Campus>,
        category: Option<PostCategory>,
        limit: usize,
    ) -> Vec<Post> {
        let candidates = self
            .posts
            .iter()
            .filter(|post| campus.is_none_or(|campus| campus.matches(&post.campus)))
            .filter(|post| category.is_none_or(|category| post.is_category(category)))
            .take(limit.saturating_mul(POST_CANDIDATES_PER_RESULT));

        let query = query.trim().to_lowercase();
        let results: Vec<Post> = if query.is_empty() {
            candidates.take(limit).cloned().collect()
        } else {
            let mut scored: Vec<(u32, &Post)> = candidates
                .map(|post| (post_score(post, &query), post))
                .filter(|(score, _)| *score > 0)
                .collect();
            scored.sort_by_key(|(score, _)| std::cmp::Reverse(*score));
            scored
                .into_iter()
                .take(limit)
                .map(|(_, post)| post.clone())
                .collect()
        };

        tracing::Span::current().record("results", results.len());
        results
    }

    /// Event posts occurring between `now` and `days_ahead` days from now,
    /// soonest first.
    #[must_use]
    pub fn upcoming_events(
        &self,
        campus: Option<Campus>,
        days_ahead: u32,
        limit: usize,
        now: DateTime<Utc>,
    ) -> Vec<Post> {
        let until = now + Duration::days(i64::from(days_ahead));

        let mut events: Vec<(DateTime<Utc>, &Post)> = self
            .events(campus)
            .filter_map(|post| post.occurs_at().map(|at| (at, post)))
            .filter(|(at, _)| *at >= now && *at <= until)
            .collect();
        events.sort_by_key(|(at, _)| *at);

        events
            .into_iter()
            .take(limit)
            .map(|(_, post)| post.clone())
            .collect()
    }

    /// Event posts whose title, details, location, venue or address mention
    /// `query`.
    ///
    /// Past events are dropped unless `include_expired` is set. Events without
    /// a date are kept; events with an unreadable date are not.
    #[must_use]
    pub fn search_events(
        &self,
        query: &str,
        campus: Option<Campus>,
        include_expired: bool,
        limit: usize,
        now: DateTime<Utc>,
    ) -> Vec<Post> {
        let query = query.to_lowercase();

        let mut events: Vec<&Post> = self
            .events(campus)
            .take(limit.saturating_mul(POST_CANDIDATES_PER_RESULT))
            .filter(|post| {
                [post.title.as_str(), post.details.as_str()]
                    .into_iter()
                    .chain(post.place_fields())
                    .any(|field| !field.is_empty() && field.to_lowercase().contains(&query))
            })
            .filter(|post| {
                if include_expired || post.date_occuring.trim().is_empty() {
                    return true;
                }
                post.occurs_at().is_some_and(|at| at >= now)
            })
            .collect();
        events.sort_by_key(|post| {
            let at = post.occurs_at();
            (at.is_none(), at)
        });

        events.into_iter().take(limit).cloned().collect()
    }

    /// Events matching `query`, past or future, for location answers.
    #[must_use]
    pub fn event_locations(
        &self,
        query: &str,
        campus: Option<Campus>,
        now: DateTime<Utc>,
    ) -> Vec<Post> {
        self.search_events(query, campus, true, LOCATION_LIMIT, now)
    }

    /// Distinct post categories in first-seen order.
    ///
    /// Falls back to the standard categories when no post has one.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for post in &self.posts {
            let category = post.category.trim();
            if !category.is_empty() && !categories.iter().any(|c| c == category) {
                categories.push(category.to_string());
            }
        }

        if categories.is_empty() {
            return PostCategory::DEFAULTS
                .iter()
                .map(ToString::to_string)
                .collect();
        }
        categories
    }

    /// Campuses clubs and posts can belong to.
    #[must_use]
    pub const fn campuses(&self) -> [Campus; 3] {
        Campus::ALL
    }

    fn events(&self, campus: Option<Campus>) -> impl Iterator<Item = &Post> {
        self.posts
            .iter()
            .filter(|post| post.is_category(PostCategory::Event))
            .filter(move |post| campus.is_none_or(|campus| campus.matches(&post.campus)))
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-09-01T12:00:00Z")
            .expect("parse")
            .with_timezone(&Utc)
    }

    fn catalog() -> Catalog {
        Catalog::from_json(
            r#"{
                "clubs": [
                    {"id": "c1", "name": "Computer Science Student Union", "description": "Programming nights and hackathons", "campus": "UTSG", "executives": ["u1"]},
                    {"id": "c2", "name": "Chess Club", "description": "Weekly casual chess", "campus": "UTM"},
                    {"id": "c3", "name": "Data Science Club", "description": "Machine learning workshops", "campus": "UTSG"}
                ],
                "posts": [
                    {"id": "p1", "title": "Hack Night", "details": "Bring a laptop", "campus": "UTSG", "club": "c1", "category": "Event", "date_posted": "2025-08-20T10:00:00Z", "date_occuring": "2025-09-03T18:00:00Z", "location": "BA 1130"},
                    {"id": "p2", "title": "DS3 Project Showcase", "details": "Student projects on display", "campus": "UTSG", "club": "c3", "category": "Event", "date_posted": "2025-08-25T10:00:00Z", "date_occuring": "2025-09-20T18:00:00Z", "address": "700 University Ave"},
                    {"id": "p3", "title": "Exec applications open", "details": "Join the team", "campus": "UTSG", "club": "c1", "category": "Hiring Opportunity", "date_posted": "2025-08-28T10:00:00Z"},
                    {"id": "p4", "title": "Summer Social", "details": "Last term's social", "campus": "UTM", "club": "c2", "category": "Event", "date_posted": "2025-06-01T10:00:00Z", "date_occuring": "2025-06-15T18:00:00Z"}
                ]
            }"#,
        )
        .expect("catalog")
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::empty();
        assert!(catalog.search_clubs("", None, 5).is_empty());
        assert!(catalog.search_posts("", None, None, 5).is_empty());
        assert_eq!(catalog.categories().len(), PostCategory::DEFAULTS.len());
    }

    #[test]
    fn test_from_json_rejects_wrong_shape() {
        assert!(matches!(
            Catalog::from_json(r#"{"clubs": 3}"#),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = Catalog::from_path("/nonexistent/catalog.json").expect_err("missing");
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn test_posts_sorted_newest_first() {
        let posts = catalog().search_posts("", None, None, 10);
        let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p3", "p2", "p1", "p4"]);
    }

    #[test]
    fn test_search_clubs_ranks_and_hides_executives() {
        let clubs = catalog().search_clubs("computer science", None, 5);
        assert_eq!(clubs[0].id.as_str(), "c1");
        assert!(clubs.iter().all(|club| club.executives.is_empty()));
    }

    #[test]
    fn test_search_clubs_campus_filter() {
        let clubs = catalog().search_clubs("", Some(Campus::Utm), 5);
        assert_eq!(clubs.len(), 1);
        assert_eq!(clubs[0].name, "Chess Club");
    }

    #[test]
    fn test_search_clubs_drops_irrelevant() {
        assert!(catalog().search_clubs("rowing", None, 5).is_empty());
    }

    #[test]
    fn test_club_details() {
        let catalog = catalog();
        let club = catalog.club_details(&ClubId::new("c1")).expect("club");
        assert_eq!(club.name, "Computer Science Student Union");
        assert!(club.executives.is_empty());
        assert!(catalog.club_details(&ClubId::new("missing")).is_none());
    }

    #[test]
    fn test_search_posts_category_filter() {
        let posts = catalog().search_posts("", None, Some(PostCategory::HiringOpportunity), 5);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id.as_str(), "p3");
    }

    #[test]
    fn test_search_posts_by_query() {
        let posts = catalog().search_posts("showcase", None, None, 5);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id.as_str(), "p2");
    }

    #[test]
    fn test_upcoming_events_window() {
        let catalog = catalog();
        let week = catalog.upcoming_events(None, 7, 5, now());
        assert_eq!(week.len(), 1);
        assert_eq!(week[0].id.as_str(), "p1");

        let month = catalog.upcoming_events(None, 30, 5, now());
        let ids: Vec<&str> = month.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p1", "p2"]);
    }

    #[test]
    fn test_search_events_skips_expired_unless_asked() {
        let catalog = catalog();
        assert!(catalog.search_events("social", None, false, 5, now()).is_empty());
        assert_eq!(catalog.search_events("social", None, true, 5, now()).len(), 1);
    }

    #[test]
    fn test_search_events_matches_location() {
        let events = catalog().search_events("ba 1130", None, false, 5, now());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id.as_str(), "p1");
    }

    #[test]
    fn test_search_events_matches_address() {
        let events = catalog().event_locations("university ave", None, now());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].place(), Some("700 University Ave"));
    }

    #[test]
    fn test_event_locations_include_past_events() {
        let events = catalog().event_locations("summer", Some(Campus::Utm), now());
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_categories_first_seen() {
        assert_eq!(catalog().categories(), ["Hiring Opportunity", "Event"]);
    }
}
