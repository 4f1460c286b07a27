use chrono::{TimeZone, Utc};

use super::*;

fn post(id: &str, (y, m, d, h): (i32, u32, u32, u32), caption: &str) -> Post {
    Post::new(id, Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()).with_caption(caption)
}

fn summary(posts: &[Post], config: &AnalysisConfig) -> BehaviorSummary {
    match analyze_behavior(posts, config) {
        Section::Available(summary) => summary,
        Section::NoData { reason } => panic!("expected a summary, got no_data ({reason})"),
    }
}

// -----------------------------------------------------------------------
// availability and frequency
// -----------------------------------------------------------------------

#[test]
fn empty_history_is_no_data() {
    let section = analyze_behavior(&[], &AnalysisConfig::default());
    assert_eq!(section.no_data_reason(), Some(NoDataReason::NoPosts));
}

#[test]
fn single_post_has_no_frequency() {
    let posts = [post("p1", (2024, 3, 1, 10), "hello")];
    let s = summary(&posts, &AnalysisConfig::default());
    assert_eq!(s.post_count, 1);
    assert_eq!(s.posting_frequency, None);
    assert_eq!(s.cadence.average_days_between_posts, None);
    assert_eq!(s.cadence.consistency_score, None);
    assert_eq!(s.cadence.most_frequent_interval_days, None);
    assert_eq!(s.activity_window.earliest, s.activity_window.latest);
}

#[test]
fn zero_span_has_no_frequency() {
    let posts = [
        post("p1", (2024, 3, 1, 10), ""),
        post("p2", (2024, 3, 1, 10), ""),
    ];
    let s = summary(&posts, &AnalysisConfig::default());
    assert_eq!(s.posting_frequency, None);
    assert_eq!(s.cadence.average_days_between_posts, Some(0.0));
    assert_eq!(s.cadence.consistency_score, Some(50.0));
}

#[test]
fn weekly_posts_give_frequency_per_week() {
    let posts = [
        post("p3", (2024, 1, 15, 12), ""),
        post("p2", (2024, 1, 8, 12), ""),
        post("p1", (2024, 1, 1, 12), ""),
    ];
    let s = summary(&posts, &AnalysisConfig::default());
    assert_eq!(s.posting_frequency, Some(1.5));
    assert_eq!(s.cadence.average_days_between_posts, Some(7.0));
    assert_eq!(s.cadence.consistency_score, Some(100.0));
    assert_eq!(s.cadence.most_frequent_interval_days, Some(7));
    assert_eq!(s.activity_window.earliest, posts[2].taken_at);
    assert_eq!(s.activity_window.latest, posts[0].taken_at);
}

#[test]
fn most_frequent_interval_is_the_modal_gap() {
    let posts = [
        post("p1", (2024, 1, 1, 12), ""),
        post("p2", (2024, 1, 3, 12), ""),
        post("p3", (2024, 1, 5, 12), ""),
        post("p4", (2024, 1, 12, 12), ""),
        // 23 hours after p4 rounds down to a zero-day gap.
        post("p5", (2024, 1, 13, 11), ""),
    ];
    let s = summary(&posts, &AnalysisConfig::default());
    assert_eq!(s.cadence.most_frequent_interval_days, Some(2));
}

#[test]
fn most_frequent_interval_ties_prefer_shorter_gap() {
    let posts = [
        post("p1", (2024, 1, 1, 12), ""),
        post("p2", (2024, 1, 8, 12), ""),
        post("p3", (2024, 1, 11, 12), ""),
    ];
    let s = summary(&posts, &AnalysisConfig::default());
    assert_eq!(s.cadence.most_frequent_interval_days, Some(3));
}

#[test]
fn input_order_does_not_matter() {
    let mut posts = vec![
        post("p1", (2024, 1, 1, 9), "coffee beans"),
        post("p2", (2024, 1, 5, 14), "beans and coffee"),
        post("p3", (2024, 2, 2, 20), "tea"),
    ];
    let forward = analyze_behavior(&posts, &AnalysisConfig::default());
    posts.reverse();
    assert_eq!(forward, analyze_behavior(&posts, &AnalysisConfig::default()));
}

// -----------------------------------------------------------------------
// themes
// -----------------------------------------------------------------------

#[test]
fn dominant_themes_rank_by_count_then_first_occurrence() {
    let config = AnalysisConfig {
        top_themes: 3,
        ..AnalysisConfig::default()
    };
    // Newest first.
    let posts = [
        post("p3", (2024, 1, 3, 9), "sunset beach 2024"),
        post("p2", (2024, 1, 2, 9), "Morning coffee with @friend https://x.com/a"),
        post("p1", (2024, 1, 1, 9), "Coffee and travel #travel"),
    ];
    let s = summary(&posts, &config);
    assert_eq!(
        s.dominant_themes,
        [
            TermCount::new("coffee", 2),
            TermCount::new("travel", 2),
            TermCount::new("morning", 1),
        ]
    );
}

#[test]
fn tokens_skip_links_mentions_numbers_and_stop_words() {
    assert_eq!(
        theme_tokens("The @user me@mail.com www.site.com http://a.b 12345 ok (Beach!) #Sun"),
        ["beach", "sun"]
    );
}

#[test]
fn theme_categories_count_keyword_hits() {
    let posts = [
        post("p1", (2024, 1, 1, 9), "Travel trip to the gym"),
        post("p2", (2024, 1, 2, 9), "Delicious food"),
    ];
    let s = summary(&posts, &AnalysisConfig::default());
    assert_eq!(
        s.theme_categories,
        [
            TermCount::new("travel", 2),
            TermCount::new("food", 2),
            TermCount::new("fitness", 1),
        ]
    );
}

// -----------------------------------------------------------------------
// cadence, content and interactions
// -----------------------------------------------------------------------

#[test]
fn histograms_and_monthly_activity() {
    let posts = [
        post("p1", (2024, 1, 1, 9), ""),
        post("p2", (2024, 1, 3, 9), ""),
        post("p3", (2024, 2, 10, 18), ""),
    ];
    let cadence = summary(&posts, &AnalysisConfig::default()).cadence;
    assert_eq!(cadence.hour_histogram[9], 2);
    assert_eq!(cadence.hour_histogram[18], 1);
    assert_eq!(cadence.hour_histogram.iter().sum::<u64>(), 3);
    // Monday, Wednesday, Saturday.
    assert_eq!(cadence.weekday_histogram, [1, 0, 1, 0, 0, 1, 0]);
    assert_eq!(
        cadence.monthly_activity.into_iter().collect::<Vec<_>>(),
        [("2024-01".to_owned(), 2), ("2024-02".to_owned(), 1)]
    );
}

#[test]
fn content_types_and_engagement_averages() {
    let mut p1 = post("p1", (2024, 1, 1, 9), "");
    p1.like_count = 10;
    p1.comment_count = 1;
    let mut p2 = post("p2", (2024, 1, 2, 9), "");
    p2.like_count = 20;
    p2.comment_count = 2;
    p2.media_kind = MediaKind::Video;
    let mut p3 = post("p3", (2024, 1, 3, 9), "");
    p3.like_count = 31;
    p3.comment_count = 2;
    p3.media_kind = MediaKind::Carousel;

    let s = summary(&[p1, p2, p3], &AnalysisConfig::default());
    assert_eq!(
        s.content_types,
        ContentTypeCounts {
            photo: 1,
            video: 1,
            carousel: 1
        }
    );
    assert_eq!(s.engagement.average_likes, 20.33);
    assert_eq!(s.engagement.average_comments, 1.67);
}

#[test]
fn hashtags_mentions_and_locations() {
    let mut p1 = post("p1", (2024, 1, 1, 9), "");
    p1.hashtags = vec!["travel".to_owned(), "beach".to_owned()];
    p1.mentions = vec!["a".to_owned(), "b".to_owned()];
    p1.location = Some("Lisbon".to_owned());
    let mut p2 = post("p2", (2024, 1, 2, 9), "");
    p2.hashtags = vec!["travel".to_owned()];
    p2.mentions = vec!["a".to_owned()];
    p2.location = Some("Porto".to_owned());
    let mut p3 = post("p3", (2024, 1, 3, 9), "");
    p3.location = Some("Lisbon".to_owned());

    let s = summary(&[p3, p2, p1], &AnalysisConfig::default());
    assert_eq!(s.hashtags.unique_count, 2);
    assert_eq!(
        s.hashtags.top,
        [TermCount::new("travel", 2), TermCount::new("beach", 1)]
    );
    assert_eq!(s.unique_mentions, 2);
    assert_eq!(s.locations, ["Lisbon", "Porto"]);
}

#[test]
fn clustered_hours_flag_automation() {
    let same_hour: Vec<Post> = (1..=5)
        .map(|d| post(&format!("p{d}"), (2024, 1, d, 9), ""))
        .collect();
    let s = summary(&same_hour, &AnalysisConfig::default());
    assert_eq!(
        s.automation_indicators,
        [AutomationIndicator::RegularPostingHours]
    );

    let too_few = &same_hour[..4];
    assert!(summary(too_few, &AnalysisConfig::default())
        .automation_indicators
        .is_empty());

    let spread: Vec<Post> = (1..=5)
        .map(|d| post(&format!("p{d}"), (2024, 1, d, d * 3), ""))
        .collect();
    assert!(summary(&spread, &AnalysisConfig::default())
        .automation_indicators
        .is_empty());
}
