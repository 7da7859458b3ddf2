//! Text relevance scores for catalog search.
//!
//! Scores are additive and only compared with each other; a score of zero
//! means the record does not match at all.

use clubhub_core::{Club, Post};

/// Subject words in a query that boost clubs mentioning related keywords.
const CLUB_SUBJECT_BOOSTS: &[(&str, &[&str])] = &[
    ("computer", &["computer", "cs", "programming", "software", "tech"]),
    ("science", &["science", "research", "academic"]),
    ("business", &["business", "commerce", "finance", "entrepreneur"]),
    ("engineering", &["engineering", "technical", "robotics"]),
    ("arts", &["arts", "creative", "design", "culture"]),
    ("music", &["music", "band", "orchestra", "choir"]),
    ("sports", &["sports", "athletic", "fitness", "recreation"]),
];

/// Abbreviations in a query that match posts spelling them out.
const POST_ABBREVIATIONS: &[(&str, &[&str])] = &[
    ("cs", &["computer science", "computer", "programming"]),
    ("cssu", &["computer science student union"]),
    ("ai", &["artificial intelligence", "machine learning"]),
    ("ml", &["machine learning", "ai"]),
];

const SUBJECT_BOOST: u32 = 12;
const ABBREVIATION_BOOST: u32 = 15;

/// Words of a lowercased query long enough to score on their own.
fn significant_words(query: &str) -> impl Iterator<Item = &str> {
    query.split(' ').filter(|word| word.chars().count() > 2)
}

/// Score a club against a lowercased, non-empty query.
#[must_use]
pub fn club_score(club: &Club, query: &str) -> u32 {
    let name = club.name.to_lowercase();
    let description = club.description.to_lowercase();
    let text = format!("{name} {description}");
    let mut score = 0;

    if name == query {
        score += 100;
    }
    if name.starts_with(query) {
        score += 50;
    }
    if name.contains(query) {
        score += 30;
    }
    if description.contains(query) {
        score += 20;
    }

    for word in significant_words(query) {
        if name.contains(word) {
            score += 15;
        }
        if description.contains(word) {
            score += 8;
        }
        if name.split(' ').any(|part| part.starts_with(word)) {
            score += 10;
        }
        if description.split(' ').any(|part| part.starts_with(word)) {
            score += 5;
        }
    }

    for (subject, keywords) in CLUB_SUBJECT_BOOSTS {
        if query.contains(subject) {
            for keyword in *keywords {
                if text.contains(keyword) {
                    score += SUBJECT_BOOST;
                }
            }
        }
    }

    score
}

/// Score a post against a lowercased, non-empty query.
#[must_use]
pub fn post_score(post: &Post, query: &str) -> u32 {
    let title = post.title.to_lowercase();
    let details = post.details.to_lowercase();
    let hashtags = post.hashtags.join(" ").to_lowercase();
    let text = format!("{title} {details} {hashtags}");
    let mut score = 0;

    if title.contains(query) {
        score += 30;
    }
    if title.starts_with(query) {
        score += 40;
    }
    if details.contains(query) {
        score += 20;
    }
    if hashtags.contains(query) {
        score += 25;
    }

    for word in significant_words(query) {
        if title.contains(word) {
            score += 15;
        }
        if details.contains(word) {
            score += 10;
        }
        if hashtags.contains(word) {
            score += 12;
        }
    }

    for (abbreviation, expansions) in POST_ABBREVIATIONS {
        if query.contains(abbreviation) {
            for expansion in *expansions {
                if text.contains(expansion) {
                    score += ABBREVIATION_BOOST;
                }
            }
        }
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn club(name: &str, description: &str) -> Club {
        Club {
            name: name.to_string(),
            description: description.to_string(),
            ..Club::default()
        }
    }

    fn post(title: &str, details: &str, hashtags: &[&str]) -> Post {
        Post {
            title: title.to_string(),
            details: details.to_string(),
            hashtags: hashtags.iter().map(ToString::to_string).collect(),
            ..Post::default()
        }
    }

    #[test]
    fn test_exact_club_name_scores_highest() {
        let exact = club_score(&club("Chess Club", ""), "chess club");
        let partial = club_score(&club("UofT Chess Club", ""), "chess club");
        assert!(exact > partial);
        // exact 100 + prefix 50 + contains 30 + "chess" 15+10 + "club" 15+10
        assert_eq!(exact, 230);
    }

    #[test]
    fn test_unrelated_club_scores_zero() {
        assert_eq!(club_score(&club("Rowing", "On the water"), "robotics"), 0);
    }

    #[test]
    fn test_subject_boost_applies_per_keyword() {
        let score = club_score(
            &club("Hackers", "software and programming nights"),
            "computer",
        );
        // "computer" never appears, but software and programming are boosted
        assert_eq!(score, 2 * SUBJECT_BOOST);
    }

    #[test]
    fn test_short_words_do_not_score_alone() {
        assert_eq!(club_score(&club("Go Club", ""), "go at"), 0);
    }

    #[test]
    fn test_post_title_prefix_beats_details() {
        let title_hit = post_score(&post("Orientation week", "", &[]), "orientation");
        let details_hit = post_score(&post("Welcome", "orientation is here", &[]), "orientation");
        assert!(title_hit > details_hit);
    }

    #[test]
    fn test_post_hashtags_score() {
        let score = post_score(&post("Meetup", "", &["Hackathon"]), "hackathon");
        assert_eq!(score, 25 + 12);
    }

    #[test]
    fn test_post_abbreviation_expansion() {
        let score = post_score(
            &post("Student union elections", "Computer Science Student Union", &[]),
            "cssu",
        );
        // "cs" and "cssu" both expand into the details
        assert_eq!(score, 2 * ABBREVIATION_BOOST + ABBREVIATION_BOOST);
    }
}
