//! Keyword-based intent detection and query extraction.
//!
//! Detection functions take the lowercased message. Extraction functions take
//! the message as typed, since some of them look at letter case.

use std::sync::LazyLock;

use clubhub_core::{Campus, PostCategory};
use regex::Regex;

const DEFAULT_DAYS_AHEAD: u32 = 7;

static QUOTED_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"["']([^"']+)["']"#).expect("Invalid regex"));
static OF_TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:posted date of|name of|title of)\s+(.+)").expect("Invalid regex")
});
static POSTS_FROM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"posts?\s+from\s+(.+?)(?:\s+page|\s*$)").expect("Invalid regex")
});
static ACRONYM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z0-9]{2,5})\b").expect("Invalid regex"));
static SHORT_QUERY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]{2,5}$").expect("Invalid regex"));
static REQUEST_VERB_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"give me|show me|find").expect("Invalid regex"));
static NON_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("Invalid regex"));
static EVENT_QUESTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"where\s+is|what\s+is\s+the\s+location|location\s+of|when\s+does|when\s+is|what\s+time|when\s+will",
    )
    .expect("Invalid regex")
});
static DAYS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*days?").expect("Invalid regex"));
static WEEKS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*weeks?").expect("Invalid regex"));

const GREETING_KEYWORDS: &[&str] = &[
    "hello",
    "hi",
    "hey",
    "good morning",
    "good afternoon",
    "good evening",
    "greetings",
    "howdy",
    "what's up",
    "whats up",
    "sup",
];

const LOCATION_KEYWORDS: &[&str] = &[
    "where", "location", "venue", "address", "room", "building", "place",
];

const SPECIFIC_EVENT_PHRASES: &[&str] = &[
    "when does",
    "when is",
    "what time",
    "date of",
    "schedule for",
    "time of",
    "when will",
];

const EVENT_TERMS: &[&str] = &[
    "event",
    "showcase",
    "project",
    "presentation",
    "meeting",
    "workshop",
];

const POST_KEYWORDS: &[&str] = &[
    "post",
    "posts",
    "announcement",
    "announcements",
    "news",
    "update",
    "updates",
    "hiring",
    "job",
    "opportunity",
    "opportunities",
    "posted date",
    "when was posted",
    "date of post",
];

const POST_PHRASES: &[&str] = &[
    "posts from",
    "post from",
    "name of a post",
    "name of the post",
    "title of post",
    "posted date",
    "when was",
    "date of the",
    "give me the name",
];

const POST_TITLES: &[&str] = &[
    "orientation committee applications open",
    "applications open",
    "committee applications",
];

const CLUB_KEYWORDS: &[&str] = &[
    "club",
    "clubs",
    "organization",
    "organizations",
    "society",
    "societies",
    "group",
    "groups",
    "student union",
    "association",
    "team",
    "teams",
    "union",
    "committee",
    "council",
    "collective",
    "network",
];

const SUBJECT_KEYWORDS: &[&str] = &[
    "computer science",
    "cs",
    "programming",
    "tech",
    "technology",
    "software",
    "engineering",
    "business",
    "arts",
    "science",
    "music",
    "sports",
    "cultural",
    "academic",
    "math",
    "physics",
    "chemistry",
    "biology",
    "psychology",
    "sociology",
    "economics",
    "finance",
    "marketing",
    "design",
    "robotics",
    "ai",
    "artificial intelligence",
    "machine learning",
    "data science",
];

const CLUB_SEARCH_PHRASES: &[&str] = &[
    "find clubs",
    "search clubs",
    "looking for clubs",
    "clubs that",
    "clubs about",
    "show me clubs",
    "list clubs",
    "clubs for",
    "give me clubs",
    "other clubs",
    "some clubs",
    "any clubs",
];

const EVENT_KEYWORDS: &[&str] = &[
    "event",
    "events",
    "happening",
    "upcoming",
    "activities",
    "activity",
    "this week",
    "next week",
    "today",
    "tomorrow",
    "weekend",
    "soon",
    "showcase",
    "presentation",
    "workshop",
    "meeting",
];

const EVENT_PHRASES: &[&str] = &[
    "events within",
    "events in",
    "what's happening",
    "whats happening",
    "upcoming events",
    "events this",
    "events next",
    "events today",
    "when is",
    "when does",
    "when will",
];

const GENERAL_KEYWORDS: &[&str] = &[
    "help",
    "campus",
    "campuses",
    "what",
    "how",
    "categories",
    "options",
    "about",
    "info",
    "clubhub",
    "getting started",
    "start",
];

const GENERAL_PHRASES: &[&str] = &[
    "tell me about",
    "what is",
    "how do",
    "can you help",
    "get started",
];

const POST_STOP_WORDS: &[&str] = &[
    "what", "is", "are", "the", "show", "me", "give", "name", "of", "post", "posts", "from", "a",
    "an", "some", "any", "tell", "find", "when", "was", "posted", "date",
];

const CLUB_STOP_WORDS: &[&str] = &[
    "what", "is", "are", "the", "find", "search", "for", "about", "show", "me", "at", "in", "on",
    "can", "you", "i", "want", "to", "looking", "any", "some", "that", "clubs", "focused",
    "around", "within", "events", "upcoming", "give", "related", "help", "please", "thanks",
    "thank", "other", "from",
];

const EVENT_NAME_STOP_WORDS: &[&str] = &[
    "the",
    "a",
    "an",
    "is",
    "where",
    "when",
    "location",
    "venue",
    "happen",
    "happening",
];

const CS_EXPANSION: &str = "computer science cs programming software development tech technology coding";
const TECH_EXPANSION: &str = "technology tech computer science programming software engineering";

/// Subject shortcuts for club queries, checked in order.
const SUBJECT_EXPANSIONS: &[(&[&str], &str)] = &[
    (&["computer science", "cs"], CS_EXPANSION),
    (
        &["programming", "coding"],
        "programming coding computer science cs software development",
    ),
    (&["tech", "technology"], TECH_EXPANSION),
    (
        &["software"],
        "software programming computer science development engineering tech",
    ),
    (
        &["engineering"],
        "engineering technical science computer software",
    ),
    (
        &["data science", "machine learning", "ai"],
        "data science machine learning ai artificial intelligence computer science programming",
    ),
    (
        &["business"],
        "business commerce management entrepreneurship finance",
    ),
    (&["arts"], "arts creative culture visual performing"),
    (&["music"], "music performance band orchestra choir"),
    (
        &["sports", "athletic"],
        "sports athletic fitness recreation physical",
    ),
    (
        &["math", "mathematics"],
        "mathematics math statistics calculus algebra",
    ),
];

/// What a message is mainly asking about.
///
/// A message gets exactly one topic; [`Topic::detect`] checks them in
/// declaration order and picks the first that applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    /// Where an event takes place.
    Location,
    /// When a particular event happens.
    SpecificEvent,
    /// Announcements, hiring posts and other posts.
    Posts,
    /// Finding clubs.
    Clubs,
    /// What is coming up.
    Events,
    /// Help and platform overview.
    GeneralInfo,
    /// Nothing recognised.
    Unknown,
}

impl Topic {
    /// Classify a message as typed.
    #[must_use]
    pub fn detect(message: &str) -> Self {
        let lower = message.to_lowercase();

        if is_location_query(&lower) {
            Self::Location
        } else if is_specific_event_query(&lower) {
            Self::SpecificEvent
        } else if is_post_related(&lower) {
            Self::Posts
        } else if is_club_related(message) {
            Self::Clubs
        } else if is_event_related(&lower) {
            Self::Events
        } else if is_general_info(&lower) {
            Self::GeneralInfo
        } else {
            Self::Unknown
        }
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Greeting keywords, or a message too short to be a real question.
#[must_use]
pub fn is_greeting(lower: &str) -> bool {
    contains_any(lower, GREETING_KEYWORDS) || lower.chars().count() < 10
}

#[must_use]
pub fn is_location_query(lower: &str) -> bool {
    contains_any(lower, LOCATION_KEYWORDS)
        && contains_any(lower, &["event", "meeting", "happening"])
}

#[must_use]
pub fn is_specific_event_query(lower: &str) -> bool {
    contains_any(lower, SPECIFIC_EVENT_PHRASES)
        || (lower.contains("when") && contains_any(lower, EVENT_TERMS))
}

#[must_use]
pub fn is_post_related(lower: &str) -> bool {
    contains_any(lower, POST_KEYWORDS)
        || contains_any(lower, POST_PHRASES)
        || contains_any(lower, POST_TITLES)
}

/// Club keywords, subjects, search phrases, or a bare 2-5 character query
/// such as a club acronym.
#[must_use]
pub fn is_club_related(message: &str) -> bool {
    let lower = message.to_lowercase();
    if contains_any(&lower, CLUB_KEYWORDS)
        || contains_any(&lower, SUBJECT_KEYWORDS)
        || contains_any(&lower, CLUB_SEARCH_PHRASES)
    {
        return true;
    }

    SHORT_QUERY_RE.is_match(&extract_club_query(message))
}

#[must_use]
pub fn is_event_related(lower: &str) -> bool {
    contains_any(lower, EVENT_KEYWORDS) || contains_any(lower, EVENT_PHRASES)
}

/// Help keywords, or a message shorter than 15 characters.
#[must_use]
pub fn is_general_info(lower: &str) -> bool {
    contains_any(lower, GENERAL_KEYWORDS)
        || contains_any(lower, GENERAL_PHRASES)
        || lower.chars().count() < 15
}

/// Whether a post question wants one post's title or date rather than a list.
#[must_use]
pub fn wants_post_details(lower: &str) -> bool {
    contains_any(
        lower,
        &[
            "name of",
            "posted date",
            "orientation committee",
            "applications open",
        ],
    )
}

/// Campus named in the message, by code or by name.
#[must_use]
pub fn extract_campus(message: &str) -> Option<Campus> {
    let lower = message.to_lowercase();
    if contains_any(&lower, &["utsg", "st. george", "st george", "downtown"]) {
        Some(Campus::Utsg)
    } else if contains_any(&lower, &["utm", "mississauga"]) {
        Some(Campus::Utm)
    } else if contains_any(&lower, &["utsc", "scarborough"]) {
        Some(Campus::Utsc)
    } else {
        None
    }
}

/// Post category implied by the message.
#[must_use]
pub fn extract_category(message: &str) -> Option<PostCategory> {
    let lower = message.to_lowercase();
    if contains_any(&lower, &["hiring", "job", "opportunity"]) {
        Some(PostCategory::HiringOpportunity)
    } else if lower.contains("event") {
        Some(PostCategory::Event)
    } else if lower.contains("announcement") {
        Some(PostCategory::Announcement)
    } else if lower.contains("general") {
        Some(PostCategory::General)
    } else {
        None
    }
}

/// How many days ahead an events question looks. Defaults to a week.
#[must_use]
pub fn extract_days_ahead(lower: &str) -> u32 {
    if contains_any(lower, &["within the week", "this week", "within a week"]) {
        return 7;
    }
    if contains_any(lower, &["next week", "within 2 weeks", "within two weeks"]) {
        return 14;
    }
    if contains_any(lower, &["this month", "within a month"]) {
        return 30;
    }

    let count = |re: &Regex| {
        re.captures(lower)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
    };
    if let Some(days) = count(&DAYS_RE) {
        return days;
    }
    if let Some(weeks) = count(&WEEKS_RE) {
        return weeks.saturating_mul(7);
    }

    if contains_any(lower, &["today", "tonight"]) {
        1
    } else if lower.contains("tomorrow") {
        2
    } else if lower.contains("weekend") {
        3
    } else {
        DEFAULT_DAYS_AHEAD
    }
}

/// Search terms for a club question.
///
/// Upper-case acronyms win, then general "any clubs" requests (empty query),
/// then subject shortcuts, then the remaining meaningful words.
#[must_use]
pub fn extract_club_query(message: &str) -> String {
    if let Some(acronym) = ACRONYM_RE.captures(message).and_then(|caps| caps.get(1)) {
        return acronym.as_str().to_lowercase();
    }

    let lower = message.to_lowercase();

    if contains_any(&lower, &["other clubs", "some clubs", "any clubs"]) {
        return String::new();
    }

    if contains_any(&lower, &["give me clubs", "show me clubs", "find clubs"]) {
        let rest = REQUEST_VERB_RE.split(&lower).nth(1).unwrap_or_default();
        if rest.contains("computer") || rest.contains("cs") {
            return CS_EXPANSION.to_string();
        }
        if rest.contains("tech") {
            return TECH_EXPANSION.to_string();
        }
        return String::new();
    }

    for (triggers, expansion) in SUBJECT_EXPANSIONS {
        if contains_any(&lower, triggers) {
            return (*expansion).to_string();
        }
    }

    let cleaned = NON_WORD_RE.replace_all(&lower, " ");
    cleaned
        .split_whitespace()
        .filter(|word| !CLUB_STOP_WORDS.contains(word))
        .filter(|word| word.chars().count() > 2)
        .filter(|word| !word.chars().all(|c| c.is_ascii_digit()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Search terms for a post question.
///
/// Quoted titles and "name of ..." phrases are used as-is; known
/// organisations map to their search names; otherwise stop words are dropped.
#[must_use]
pub fn extract_post_query(message: &str) -> String {
    let lower = message.to_lowercase();

    if let Some(title) = QUOTED_TITLE_RE.captures(&lower).and_then(|caps| caps.get(1)) {
        return title.as_str().to_string();
    }

    if let Some(rest) = OF_TITLE_RE.captures(&lower).and_then(|caps| caps.get(1)) {
        return rest
            .as_str()
            .trim()
            .chars()
            .filter(|c| !matches!(c, '"' | '\'' | '!' | '?'))
            .collect();
    }

    if let Some(org) = organisation_alias(&lower) {
        return org.to_string();
    }

    if let Some(org) = POSTS_FROM_RE.captures(&lower).and_then(|caps| caps.get(1)) {
        let org = org.as_str().trim();
        return organisation_alias(org).unwrap_or(org).to_string();
    }

    lower
        .split(' ')
        .filter(|word| !POST_STOP_WORDS.contains(word))
        .filter(|word| word.chars().count() > 2)
        .filter(|word| !word.chars().all(|c| matches!(c, '!' | '?' | '.' | ',')))
        .collect::<Vec<_>>()
        .join(" ")
}

fn organisation_alias(lower: &str) -> Option<&'static str> {
    if contains_any(lower, &["cssu", "computer science student union"]) {
        Some("cssu")
    } else if lower.contains("amacss") {
        Some("amacss")
    } else if contains_any(lower, &["data science", "ds3"]) {
        Some("data science")
    } else {
        None
    }
}

/// The event a "where/when is ..." question is about.
#[must_use]
pub fn extract_event_name(message: &str) -> String {
    let lower = message.to_lowercase();
    let stripped = EVENT_QUESTION_RE.replace_all(&lower, "").replace('?', "");

    stripped
        .split_whitespace()
        .filter(|word| !EVENT_NAME_STOP_WORDS.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Looser search terms to retry an event search with, without duplicates.
#[must_use]
pub fn broader_search_terms(query: &str) -> Vec<String> {
    let lower = query.to_lowercase();
    let words: Vec<&str> = lower.split(' ').collect();
    let mut terms: Vec<String> = words
        .iter()
        .filter(|word| word.chars().count() > 3)
        .map(ToString::to_string)
        .collect();

    if words.len() > 1 {
        terms.extend(words.get(..2).map(|w| w.join(" ")));
        terms.extend(words.get(words.len() - 2..).map(|w| w.join(" ")));
    }

    if lower.contains("ds3") {
        terms.extend(["data science", "ds3", "project", "showcase"].map(String::from));
    }
    if lower.contains("project") {
        terms.extend(["project", "showcase", "presentation"].map(String::from));
    }
    if lower.contains("showcase") {
        terms.extend(["showcase", "presentation", "demo", "project"].map(String::from));
    }

    let mut unique: Vec<String> = Vec::with_capacity(terms.len());
    for term in terms {
        if !unique.contains(&term) {
            unique.push(term);
        }
    }
    unique
}
