//! Catalog lookups that give the model something to answer from.
//!
//! Each message is routed to one [`Topic`]. The matching branch searches the
//! catalog, renders what it found as prompt text, and records the raw results
//! under a topic-specific key in the reply data.

use chrono::{DateTime, Utc};
use clubhub_core::{Campus, Club, Post, PostCategory};
use serde::Serialize;
use serde_json::{Map, Value};

use super::intent::{self, Topic};
use crate::catalog::Catalog;

const UNKNOWN_CLUB: &str = "Unknown Club";
const UNKNOWN: &str = "Unknown";
const RANKED_CLUB_LIMIT: usize = 6;
const GENERAL_EVENT_DAYS: u32 = 30;
const EVENT_LIMIT: usize = 5;

const CS_CLUB_QUERIES: &[&str] = &[
    "computer science",
    "computer",
    "cs",
    "programming",
    "software",
    "tech",
    "technology",
    "development",
    "coding",
    "engineering",
];
const ORG_POST_QUERIES: &[&str] = &[
    "cssu",
    "computer science student union",
    "computer science",
    "cs",
];
const CS_RANKING_TERMS: &[&str] = &[
    "computer",
    "programming",
    "software",
    "tech",
    "cs",
    "development",
    "engineering",
];
const SUBJECT_RANKING_TERMS: &[&str] = &["business", "arts", "music", "sports", "science", "math"];

/// Prompt context and structured data gathered for one message.
#[derive(Debug, Clone, Default)]
pub struct GatheredContext {
    /// Text block inserted into the prompt. Empty when nothing was found.
    pub text: String,
    /// Raw results keyed by what they are (`clubs`, `posts`, ...).
    pub data: Map<String, Value>,
}

/// A post with the name and handles of the club that posted it.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedPost {
    #[serde(flatten)]
    pub post: Post,
    pub club_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub club_campus: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub club_instagram: Option<String>,
}

/// Search the catalog for whatever `message` is asking about.
#[must_use]
pub fn gather(catalog: &Catalog, message: &str, now: DateTime<Utc>) -> GatheredContext {
    let lower = message.to_lowercase();
    let mut context = GatheredContext::default();

    if intent::is_greeting(&lower) {
        context
            .text
            .push_str("User greeted the bot. Begin with a friendly welcome.\n\n");
        context.data.insert("greeting".to_string(), Value::Bool(true));
    }

    let topic = Topic::detect(message);
    tracing::debug!(?topic, "Gathering chatbot context");

    match topic {
        Topic::Location => event_locations(catalog, message, now, &mut context),
        Topic::SpecificEvent => specific_events(catalog, message, now, &mut context),
        Topic::Posts => posts(catalog, message, &lower, &mut context),
        Topic::Clubs => clubs(catalog, message, &lower, &mut context),
        Topic::Events => upcoming_events(catalog, message, &lower, now, &mut context),
        Topic::GeneralInfo => general_info(catalog, now, &mut context),
        Topic::Unknown => {}
    }

    context
}

fn event_locations(
    catalog: &Catalog,
    message: &str,
    now: DateTime<Utc>,
    context: &mut GatheredContext,
) {
    let event_name = intent::extract_event_name(message);
    let campus = intent::extract_campus(message);
    let events = catalog.event_locations(&event_name, campus, now);
    context.data.insert("eventLocations".to_string(), to_data(&events));

    let text = &mut context.text;
    if events.is_empty() {
        text.push_str(&format!(
            "No location information found for \"{event_name}\". Try checking event details or contact organizers.\n\n"
        ));
        return;
    }

    text.push_str(&format!("Location information for \"{event_name}\":\n"));
    for (index, event) in events.iter().enumerate() {
        text.push_str(&format!("{}. {}\n", index + 1, or_default(&event.title, "Event")));
        text.push_str(&format!(
            "   Date: {}\n",
            event.occurs_at().map_or_else(|| "TBA".to_string(), format_date)
        ));
        text.push_str(&format!(
            "   Location: {}\n",
            event.place().unwrap_or("Location TBA")
        ));
        text.push_str(&format!("   Campus: {}\n\n", or_default(&event.campus, UNKNOWN)));
    }
}

fn specific_events(
    catalog: &Catalog,
    message: &str,
    now: DateTime<Utc>,
    context: &mut GatheredContext,
) {
    let event_name = intent::extract_event_name(message);
    let campus = intent::extract_campus(message);

    let mut events = catalog.search_events(&event_name, campus, false, EVENT_LIMIT, now);
    if events.is_empty() {
        events = catalog.search_posts(&event_name, campus, None, 10);
    }
    if events.is_empty() {
        for term in intent::broader_search_terms(&event_name) {
            events = catalog.search_posts(&term, campus, None, 5);
            if !events.is_empty() {
                break;
            }
        }
    }
    context.data.insert("specificEvents".to_string(), to_data(&events));

    let text = &mut context.text;
    if events.is_empty() {
        text.push_str(&format!(
            "No events or posts found matching \"{event_name}\". Try checking upcoming events or different keywords.\n\n"
        ));
        return;
    }

    text.push_str(&format!("Found events/posts matching \"{event_name}\":\n"));
    for (index, event) in enrich_posts(catalog, events).iter().enumerate() {
        let post = &event.post;
        text.push_str(&format!("{}. **{}**\n", index + 1, or_default(&post.title, "Event")));
        text.push_str(&format!("   Posted by: {}\n", event.club_name));
        text.push_str(&format!("   Campus: {}\n", or_default(&post.campus, UNKNOWN)));

        if let Some(at) = post.occurs_at() {
            text.push_str(&format!("   📅 Event Date: {}\n", format_date(at)));
            text.push_str(&format!("   🕐 Event Time: {}\n", format_time(at)));
        } else if let Some(at) = post.posted_at() {
            text.push_str(&format!("   📅 Posted Date: {}\n", format_date(at)));
        }
        if let Some(place) = post.place() {
            text.push_str(&format!("   📍 Location: {place}\n"));
        }
        if !post.details.is_empty() {
            text.push_str(&format!("   Details: {}\n", preview(&post.details, 200)));
        }
        if !post.hashtags.is_empty() {
            text.push_str(&format!("   Tags: {}\n", post.hashtags.join(", ")));
        }
        text.push('\n');
    }
}

fn posts(catalog: &Catalog, message: &str, lower: &str, context: &mut GatheredContext) {
    let query = intent::extract_post_query(message);
    let campus = intent::extract_campus(message);
    let category = intent::extract_category(message);

    let found = search_posts_broadly(catalog, &query, campus, category);
    let text = &mut context.text;

    if found.is_empty() {
        text.push_str(&format!("No posts found matching \"{query}\".\n\n"));
        text.push_str("Try:\n");
        text.push_str("• Searching for different keywords\n");
        text.push_str("• Checking specific club pages\n");
        text.push_str("• Browsing the ClubHub posts section\n\n");
        return;
    }

    let enriched = enrich_posts(catalog, found);

    if intent::wants_post_details(lower) {
        text.push_str("Here's what I found:\n\n");
        for item in enriched.iter().take(3) {
            let post = &item.post;
            text.push_str(&format!("📝 **\"{}\"**\n", or_default(&post.title, "Untitled Post")));
            text.push_str(&format!("   Posted by: {}\n", item.club_name));
            text.push_str(&format!("   Category: {}\n", or_default(&post.category, "General")));
            text.push_str(&format!("   Campus: {}\n", or_default(&post.campus, UNKNOWN)));
            if let Some(at) = post.posted_at() {
                text.push_str(&format!(
                    "   📅 Posted Date: {} at {}\n",
                    format_date(at),
                    format_time(at)
                ));
            }
            if !post.details.is_empty() {
                text.push_str(&format!("   Details: {}\n", preview(&post.details, 200)));
            }
            if !post.hashtags.is_empty() {
                text.push_str(&format!("   Tags: {}\n", post.hashtags.join(", ")));
            }
            text.push('\n');
        }
    } else {
        text.push_str(&format!(
            "Found {} posts in ClubHub database:\n\n",
            enriched.len()
        ));
        for (index, item) in enriched.iter().enumerate() {
            let post = &item.post;
            text.push_str(&format!("{}. **{}**\n", index + 1, or_default(&post.title, "Post")));
            text.push_str(&format!("   Posted by: {}\n", item.club_name));
            text.push_str(&format!("   Category: {}\n", or_default(&post.category, "General")));
            text.push_str(&format!("   Campus: {}\n", or_default(&post.campus, UNKNOWN)));
            if let Some(at) = post.posted_at() {
                text.push_str(&format!("   Posted: {}\n", format_date(at)));
            }
            if !post.details.is_empty() {
                text.push_str(&format!("   Preview: {}\n", preview(&post.details, 100)));
            }
            text.push('\n');
        }
    }
    text.push_str("\nTip: Check ClubHub posts section for the latest updates!\n\n");

    context.data.insert("posts".to_string(), to_data(&enriched));
}

/// Post search that falls back to organisation aliases, then to recent posts.
fn search_posts_broadly(
    catalog: &Catalog,
    query: &str,
    campus: Option<Campus>,
    category: Option<PostCategory>,
) -> Vec<Post> {
    let query = query.trim();

    if !query.is_empty() {
        let found = catalog.search_posts(query, campus, category, 15);
        if !found.is_empty() {
            return found;
        }
    }

    if query.contains("cssu") || query.contains("computer science") {
        for org in ORG_POST_QUERIES {
            let found = catalog.search_posts(org, campus, category, 15);
            if !found.is_empty() {
                return found;
            }
        }
    }

    if query.is_empty() {
        let found = catalog.search_posts("", campus, category, 15);
        if !found.is_empty() {
            return found;
        }
    }

    catalog.search_posts("", None, None, 20)
}

fn clubs(catalog: &Catalog, message: &str, lower: &str, context: &mut GatheredContext) {
    let query = intent::extract_club_query(message);
    let campus = intent::extract_campus(message);

    let found = search_clubs_broadly(catalog, &query, campus, lower);
    let at_campus = campus.map(|c| format!(" at {c}")).unwrap_or_default();
    let text = &mut context.text;

    if found.is_empty() {
        text.push_str(&format!(
            "No clubs found in ClubHub database matching \"{query}\"{at_campus}.\n\n"
        ));
        text.push_str("Suggestions for finding clubs in ClubHub:\n");
        text.push_str(
            "• Try broader search terms (e.g., \"tech\" instead of \"software engineering\")\n",
        );
        text.push_str("• Search without specifying a campus to see all options\n");
        text.push_str("• Use different keywords related to your interests\n");
        text.push_str("• Check if clubs might be listed under different categories\n\n");
        if lower.contains("computer") || lower.contains("cs") || lower.contains("programming") {
            text.push_str(
                "Try searching ClubHub for: \"tech\", \"engineering\", \"science\", or \"programming\"\n\n",
            );
        }
    } else {
        let ranked = rank_clubs(&found, &query.to_lowercase());
        text.push_str(&format!(
            "Found {} clubs from ClubHub database{at_campus}:\n",
            ranked.len()
        ));
        for (index, club) in ranked.iter().enumerate() {
            text.push_str(&format!(
                "{}. {} ({})\n",
                index + 1,
                club.name,
                or_default(&club.campus, "Unknown campus")
            ));
            text.push_str(&format!(
                "   Description: {}\n",
                or_default(&club.description, "No description available")
            ));
            if !club.instagram.is_empty() {
                text.push_str(&format!("   Instagram: {}\n", club.instagram));
            }
            if let Some(email) = club.email.as_deref().filter(|e| !e.is_empty()) {
                text.push_str(&format!("   Email: {email}\n"));
            }
            if !club.links.is_empty() {
                text.push_str(&format!("   Links: {}\n", to_data(&club.links)));
            }
            text.push('\n');
        }
        text.push_str(
            "\nTip: For more clubs, try searching for related terms or check different campuses in ClubHub!\n\n",
        );
    }

    context.data.insert("clubs".to_string(), to_data(&found));
}

/// Club search that widens step by step until something turns up.
fn search_clubs_broadly(
    catalog: &Catalog,
    query: &str,
    campus: Option<Campus>,
    lower: &str,
) -> Vec<Club> {
    let query = query.trim();

    if query.is_empty() || lower.contains("other clubs") || lower.contains("some clubs") {
        let found = catalog.search_clubs("", campus, 15);
        if !found.is_empty() {
            return found;
        }
    }

    if !query.is_empty() {
        let found = catalog.search_clubs(query, campus, 10);
        if !found.is_empty() {
            return found;
        }
    }

    if lower.contains("computer") || lower.contains("cs") || lower.contains("programming") {
        for cs_query in CS_CLUB_QUERIES {
            let found = catalog.search_clubs(cs_query, campus, 10);
            if !found.is_empty() {
                return found;
            }
        }
    }

    if campus.is_some() {
        let found = catalog.search_clubs(query, None, 15);
        if !found.is_empty() {
            return found;
        }
    }

    let (mut on_campus, elsewhere): (Vec<Club>, Vec<Club>) = catalog
        .search_clubs("", None, 20)
        .into_iter()
        .partition(|club| campus.is_some_and(|campus| campus.matches(&club.campus)));
    on_campus.extend(elsewhere);
    on_campus
}

/// Order clubs by how well they fit the query and keep the best few.
fn rank_clubs<'a>(clubs: &'a [Club], query: &str) -> Vec<&'a Club> {
    let mut ranked: Vec<(u32, &Club)> = clubs
        .iter()
        .map(|club| (relevance_score(club, query), club))
        .collect();
    ranked.sort_by_key(|(score, _)| std::cmp::Reverse(*score));
    ranked
        .into_iter()
        .take(RANKED_CLUB_LIMIT)
        .map(|(_, club)| club)
        .collect()
}

/// Relevance of an already-found club to a lowercased query.
#[must_use]
pub fn relevance_score(club: &Club, query: &str) -> u32 {
    let name = club.name.to_lowercase();
    let description = club.description.to_lowercase();
    let text = format!("{name} {description}");
    let mut score = 0;

    for word in query.split(' ').filter(|word| word.chars().count() > 2) {
        if name.contains(word) {
            score += 15;
        }
        if description.contains(word) {
            score += 8;
        }
    }

    if name.contains(query) {
        score += 25;
    }
    if description.contains(query) {
        score += 20;
    }

    for term in CS_RANKING_TERMS {
        if text.contains(term) {
            score += 10;
        }
    }
    for term in SUBJECT_RANKING_TERMS {
        if query.contains(term) && text.contains(term) {
            score += 12;
        }
    }

    score
}

fn upcoming_events(
    catalog: &Catalog,
    message: &str,
    lower: &str,
    now: DateTime<Utc>,
    context: &mut GatheredContext,
) {
    let campus = intent::extract_campus(message);
    let days_ahead = intent::extract_days_ahead(lower);
    let events = catalog.upcoming_events(campus, days_ahead, EVENT_LIMIT, now);
    context.data.insert("events".to_string(), to_data(&events));

    let at_campus = campus.map(|c| format!(" at {c}")).unwrap_or_default();
    let text = &mut context.text;

    if events.is_empty() {
        text.push_str(&format!(
            "No upcoming events found in ClubHub database{at_campus} in the next {days_ahead} days.\n\n"
        ));
        text.push_str("Suggestions:\n");
        text.push_str("• Try expanding your search to more days ahead\n");
        text.push_str("• Check different campuses (UTSG, UTM, UTSC)\n");
        text.push_str("• Look for events in ClubHub's event section\n");
        text.push_str("• Follow clubs you're interested in for event notifications\n\n");
        return;
    }

    text.push_str(&format!(
        "Found {} upcoming events in ClubHub database{at_campus} in the next {days_ahead} days:\n",
        events.len()
    ));
    for (index, event) in events.iter().enumerate() {
        let at = event.occurs_at();
        text.push_str(&format!("{}. {}\n", index + 1, or_default(&event.title, "Event")));
        text.push_str(&format!(
            "   Date: {}\n",
            at.map_or_else(|| "Date TBA".to_string(), format_date)
        ));
        text.push_str(&format!(
            "   Time: {}\n",
            at.map_or_else(|| "Time TBA".to_string(), format_time)
        ));
        text.push_str(&format!("   Campus: {}\n", or_default(&event.campus, UNKNOWN)));
        text.push_str(&format!(
            "   Details: {}\n",
            or_default(&event.details, "No details available")
        ));
        if let Some(place) = event.place() {
            text.push_str(&format!("   Location: {place}\n"));
        }
        text.push('\n');
    }
    text.push_str("\nTip: Check ClubHub regularly for new events and updates!\n\n");
}

fn general_info(catalog: &Catalog, now: DateTime<Utc>, context: &mut GatheredContext) {
    let campuses = catalog.campuses();
    let categories = catalog.categories();
    let sample_clubs = catalog.search_clubs("", None, 3);
    let sample_events = catalog.upcoming_events(None, GENERAL_EVENT_DAYS, EVENT_LIMIT, now);

    let campus_codes: Vec<&str> = campuses.iter().map(|c| c.as_str()).collect();
    let text = &mut context.text;
    text.push_str("ClubHub Platform Information:\n");
    text.push_str(&format!("Available campuses: {}\n", campus_codes.join(", ")));
    text.push_str(&format!(
        "Available post categories: {}\n\n",
        categories.join(", ")
    ));
    if !sample_clubs.is_empty() {
        text.push_str(&format!(
            "Currently tracking {}+ clubs across all campuses\n",
            sample_clubs.len()
        ));
    }
    if !sample_events.is_empty() {
        text.push_str(&format!(
            "{}+ upcoming events in the next {GENERAL_EVENT_DAYS} days\n",
            sample_events.len()
        ));
    }
    text.push_str("\nWhat you can ask me:\n");
    text.push_str("• \"Find computer science clubs at UTSG\"\n");
    text.push_str("• \"What events are happening this week?\"\n");
    text.push_str("• \"Show me programming opportunities\"\n");
    text.push_str("• \"Find clubs at UTM\"\n\n");

    let data = &mut context.data;
    data.insert("campuses".to_string(), to_data(&campuses));
    data.insert("categories".to_string(), to_data(&categories));
    data.insert("sampleClubs".to_string(), to_data(&sample_clubs));
    data.insert("sampleEvents".to_string(), to_data(&sample_events));
}

/// Attach the posting club's name and handles to each post.
#[must_use]
pub fn enrich_posts(catalog: &Catalog, posts: Vec<Post>) -> Vec<EnrichedPost> {
    posts
        .into_iter()
        .map(|post| {
            let club = catalog
                .club_details(&post.club)
                .filter(|club| !club.name.is_empty());
            match club {
                Some(club) => EnrichedPost {
                    club_name: club.name,
                    club_campus: Some(club.campus).filter(|c| !c.is_empty()),
                    club_instagram: Some(club.instagram).filter(|i| !i.is_empty()),
                    post,
                },
                None => EnrichedPost {
                    club_name: UNKNOWN_CLUB.to_string(),
                    club_campus: None,
                    club_instagram: None,
                    post,
                },
            }
        })
        .collect()
}

fn to_data<T: Serialize + ?Sized>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.trim().is_empty() { default } else { value }
}

fn format_date(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %Y").to_string()
}

fn format_time(at: DateTime<Utc>) -> String {
    at.format("%-I:%M %p UTC").to_string()
}

/// First `max` characters, with an ellipsis when cut.
fn preview(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max).collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-09-01T12:00:00Z")
            .expect("parse")
            .with_timezone(&Utc)
    }

    fn catalog() -> Catalog {
        let soon = (now() + Duration::days(2)).to_rfc3339();
        let later = (now() + Duration::days(20)).to_rfc3339();
        Catalog::from_json(&format!(
            r#"{{
                "clubs": [
                    {{"id": "c1", "name": "Computer Science Student Union", "description": "Programming nights", "campus": "UTSG", "instagram": "@cssu"}},
                    {{"id": "c2", "name": "Chess Club", "description": "Weekly casual chess", "campus": "UTM"}}
                ],
                "posts": [
                    {{"id": "p1", "title": "Hack Night", "details": "Bring a laptop", "campus": "UTSG", "club": "c1", "category": "Event", "date_posted": "2025-08-20T10:00:00Z", "date_occuring": "{soon}", "location": "BA 1130"}},
                    {{"id": "p2", "title": "DS3 Project Showcase", "details": "Student projects", "campus": "UTSG", "club": "gone", "category": "Event", "date_posted": "2025-08-25T10:00:00Z", "date_occuring": "{later}"}},
                    {{"id": "p3", "title": "Exec applications open", "details": "Join the team", "campus": "UTSG", "club": "c1", "category": "Hiring Opportunity", "date_posted": "2025-08-28T10:00:00Z"}}
                ]
            }}"#
        ))
        .expect("catalog")
    }

    #[test]
    fn test_greeting_is_additive() {
        let context = gather(&catalog(), "hi", now());
        assert_eq!(context.data.get("greeting"), Some(&Value::Bool(true)));
        // short messages also count as general info
        assert!(context.data.contains_key("campuses"));
        assert!(context.text.starts_with("User greeted the bot."));
    }

    #[test]
    fn test_location_branch() {
        let context = gather(&catalog(), "Where is hack night happening?", now());
        let events = context.data.get("eventLocations").and_then(Value::as_array);
        assert_eq!(events.map(Vec::len), Some(1));
        assert!(context.text.contains("Location: BA 1130"));
    }

    #[test]
    fn test_specific_event_branch() {
        let context = gather(&catalog(), "When is the DS3 project showcase?", now());
        let events = context.data.get("specificEvents").and_then(Value::as_array);
        assert!(events.is_some_and(|events| !events.is_empty()));
        assert!(context.text.contains("DS3 Project Showcase"));
        assert!(context.text.contains("Posted by: Unknown Club"));
    }

    #[test]
    fn test_posts_branch_enriches_club_names() {
        let context = gather(&catalog(), "Any hiring posts?", now());
        let posts = context.data.get("posts").and_then(Value::as_array);
        let first = posts.and_then(|posts| posts.first()).expect("a post");
        assert_eq!(first["club_name"], "Computer Science Student Union");
        assert_eq!(first["club_instagram"], "@cssu");
        assert!(context.text.contains("Exec applications open"));
    }

    #[test]
    fn test_clubs_branch_ranks_results() {
        let context = gather(&catalog(), "Find chess clubs", now());
        assert!(context.text.starts_with("Found "));
        assert!(context.text.contains("1. Chess Club (UTM)"));
        assert!(context.data.contains_key("clubs"));
    }

    #[test]
    fn test_events_branch_uses_days_ahead() {
        let context = gather(&catalog(), "anything happening this week at utsg?", now());
        let events = context.data.get("events").and_then(Value::as_array);
        assert_eq!(events.map(Vec::len), Some(1));
        assert!(context.text.contains("in the next 7 days"));
    }

    #[test]
    fn test_unknown_topic_has_no_context() {
        let context = gather(&catalog(), "I really enjoy long walks by the lake", now());
        assert!(context.text.is_empty());
        assert!(context.data.is_empty());
    }

    #[test]
    fn test_relevance_score_prefers_name_matches() {
        let club = Club {
            name: "Chess Club".to_string(),
            description: "Casual games".to_string(),
            ..Club::default()
        };
        assert_eq!(relevance_score(&club, "chess"), 15 + 25);
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        assert_eq!(preview("héllo wörld", 5), "héllo...");
        assert_eq!(preview("short", 10), "short");
    }
}
