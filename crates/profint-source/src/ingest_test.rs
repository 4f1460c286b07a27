use chrono::TimeZone;

use super::*;
use crate::raw::{LooseLocation, LooseNumberOrText};

fn raw_post(id: &str, taken_at: LooseTimestamp) -> RawPost {
    RawPost {
        shortcode: Some(id.to_owned()),
        taken_at: Some(taken_at),
        ..RawPost::default()
    }
}

// -----------------------------------------------------------------------
// ingest_profile
// -----------------------------------------------------------------------

#[test]
fn profile_without_identifier_is_not_found() {
    let err = ingest_profile(RawProfile::default(), "ghost").unwrap_err();
    assert!(matches!(err, SourceError::NotFound { ref identifier } if identifier == "ghost"));
}

#[test]
fn profile_blank_identifier_is_not_found() {
    let raw = RawProfile {
        identifier: Some("   ".to_owned()),
        ..RawProfile::default()
    };
    assert!(ingest_profile(raw, "ghost").unwrap_err().is_not_found());
}

#[test]
fn profile_defaults_missing_fields() {
    let raw = RawProfile {
        identifier: Some("alice".to_owned()),
        ..RawProfile::default()
    };
    let profile = ingest_profile(raw, "alice").unwrap();
    assert_eq!(profile, Profile::new("alice"));
}

#[test]
fn profile_treats_na_as_absent() {
    let raw = RawProfile {
        identifier: Some("alice".to_owned()),
        display_name: Some("N/A".to_owned()),
        biography: Some("n/a".to_owned()),
        external_url: Some(String::new()),
        business_category: Some(" N/A ".to_owned()),
        ..RawProfile::default()
    };
    let profile = ingest_profile(raw, "alice").unwrap();
    assert_eq!(profile.display_name, None);
    assert_eq!(profile.biography, "");
    assert_eq!(profile.external_url, None);
    assert_eq!(profile.business_category, None);
}

#[test]
fn profile_maps_counts_and_flags() {
    let raw = RawProfile {
        identifier: Some("shop".to_owned()),
        platform_id: Some(LooseNumberOrText::Int(77)),
        follower_count: Some(LooseNumber::Text("1,500".to_owned())),
        following_count: Some(LooseNumber::Int(20)),
        post_count: Some(LooseNumber::Float(12.0)),
        is_business: Some(true),
        is_verified: Some(true),
        ..RawProfile::default()
    };
    let profile = ingest_profile(raw, "shop").unwrap();
    assert_eq!(profile.platform_id.as_deref(), Some("77"));
    assert_eq!(profile.follower_count, 1500);
    assert_eq!(profile.following_count, 20);
    assert_eq!(profile.post_count, 12);
    assert!(profile.is_business && profile.is_verified && !profile.is_private);
}

// -----------------------------------------------------------------------
// ingest_relationships
// -----------------------------------------------------------------------

#[test]
fn relationships_require_both_lists() {
    let err = ingest_relationships(Some(vec![LooseAccount::Name("a".to_owned())]), None)
        .unwrap_err();
    assert!(matches!(
        err,
        SourceError::Unavailable {
            resource: Resource::Relationships,
            ..
        }
    ));
}

#[test]
fn relationships_strip_at_signs_and_blanks() {
    let set = ingest_relationships(
        Some(vec![
            LooseAccount::Name("@bob".to_owned()),
            LooseAccount::Name("  ".to_owned()),
            LooseAccount::Object {
                username: "carol".to_owned(),
            },
        ]),
        Some(vec![LooseAccount::Name("bob".to_owned())]),
    )
    .unwrap();
    assert_eq!(set.followers.len(), 2);
    assert_eq!(set.mutuals().collect::<Vec<_>>(), ["bob"]);
}

// -----------------------------------------------------------------------
// ingest_posts
// -----------------------------------------------------------------------

#[test]
fn posts_are_sorted_newest_first() {
    let posts = ingest_posts(vec![
        raw_post("old", LooseTimestamp::Seconds(1_600_000_000)),
        raw_post("new", LooseTimestamp::Text("2024-05-01T10:00:00Z".to_owned())),
        raw_post("mid", LooseTimestamp::Text("2022-01-01 08:30:00".to_owned())),
    ]);
    let ids: Vec<&str> = posts.iter().map(|p| p.identifier.as_str()).collect();
    assert_eq!(ids, ["new", "mid", "old"]);
    assert_eq!(
        posts[1].taken_at,
        Utc.with_ymd_and_hms(2022, 1, 1, 8, 30, 0).unwrap()
    );
}

#[test]
fn posts_without_timestamps_are_dropped() {
    let mut missing = raw_post("none", LooseTimestamp::Seconds(0));
    missing.taken_at = None;
    let posts = ingest_posts(vec![
        missing,
        raw_post("bad", LooseTimestamp::Text("yesterday".to_owned())),
        raw_post("ok", LooseTimestamp::Seconds(1_700_000_000)),
    ]);
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].identifier, "ok");
}

#[test]
fn post_without_any_id_gets_positional_identifier() {
    let mut raw = raw_post("", LooseTimestamp::Seconds(1_700_000_000));
    raw.shortcode = None;
    let posts = ingest_posts(vec![raw]);
    assert_eq!(posts[0].identifier, "post-0");
}

#[test]
fn hashtags_and_mentions_fall_back_to_caption() {
    let mut raw = raw_post("p1", LooseTimestamp::Seconds(1_700_000_000));
    raw.caption = Some("Sunset #Travel #beach with @alice. #travel mail me@example.com".to_owned());
    let post = &ingest_posts(vec![raw])[0];
    assert_eq!(post.hashtags, ["travel", "beach"]);
    assert_eq!(post.mentions, ["alice"]);
}

#[test]
fn explicit_hashtags_win_over_caption() {
    let mut raw = raw_post("p1", LooseTimestamp::Seconds(1_700_000_000));
    raw.caption = Some("#ignored".to_owned());
    raw.hashtags = Some(vec!["#Food".to_owned(), "food".to_owned()]);
    raw.location = Some(LooseLocation::Object {
        name: Some("Lisbon".to_owned()),
    });
    let post = &ingest_posts(vec![raw])[0];
    assert_eq!(post.hashtags, ["food"]);
    assert_eq!(post.location.as_deref(), Some("Lisbon"));
}

#[test]
fn media_kind_is_inferred() {
    assert_eq!(media_kind(Some("GraphSidecar"), None, None, 0), MediaKind::Carousel);
    assert_eq!(media_kind(None, Some(true), None, 1), MediaKind::Video);
    assert_eq!(media_kind(None, None, Some(3), 1), MediaKind::Carousel);
    assert_eq!(media_kind(None, None, None, 2), MediaKind::Carousel);
    assert_eq!(media_kind(Some("unknown"), None, None, 1), MediaKind::Photo);
}

#[test]
fn fractional_and_numeric_string_timestamps_parse() {
    assert_eq!(
        parse_timestamp(&LooseTimestamp::FractionalSeconds(1_700_000_000.9)),
        DateTime::from_timestamp(1_700_000_000, 0)
    );
    assert_eq!(
        parse_timestamp(&LooseTimestamp::Text("1700000000".to_owned())),
        DateTime::from_timestamp(1_700_000_000, 0)
    );
}
