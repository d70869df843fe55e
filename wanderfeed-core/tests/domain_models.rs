//! Integration coverage for the public domain model constructors.

use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};
use wanderfeed_core::{
    EngagementStats, InteractionEvent, InteractionKind, Post, PostError, PostRecord,
    PreferenceModel, Tag,
};

#[fixture]
fn beach_post() -> Post {
    Post::new(
        "beach-day",
        ["Beach", "Algarve", "surf"],
        EngagementStats {
            saves: 4,
            reposts: 1,
            shares: 2,
            views: 90,
        },
    )
}

#[rstest]
fn event_snapshots_normalised_tags(beach_post: Post) {
    let at = Utc
        .with_ymd_and_hms(2024, 6, 1, 9, 30, 0)
        .single()
        .expect("valid timestamp");
    let event = InteractionEvent::for_post("e1", "traveller", &beach_post, InteractionKind::Share, at);

    assert_eq!(event.user_id, "traveller");
    assert_eq!(event.created_at, at);
    assert_eq!(
        event.tags,
        vec![Tag::new("beach"), Tag::new("algarve"), Tag::new("surf")]
    );
}

#[rstest]
fn post_reports_membership(beach_post: Post) {
    assert!(beach_post.has_tag(&Tag::new("ALGARVE")));
    assert!(!beach_post.has_tag(&Tag::new("museum")));
}

#[rstest]
#[case(Some(vec!["x".to_owned()]), true)]
#[case(Some(Vec::new()), true)]
#[case(None, false)]
fn records_validate_tag_presence(#[case] tags: Option<Vec<String>>, #[case] valid: bool) {
    let record = PostRecord {
        id: "r".into(),
        tags,
        engagement_stats: EngagementStats::default(),
    };
    match Post::try_from(record) {
        Ok(_) => assert!(valid, "record should have been rejected"),
        Err(PostError::MalformedContentItem { post_id }) => {
            assert!(!valid, "record should have been accepted");
            assert_eq!(post_id, "r");
        }
    }
}

#[rstest]
fn models_compare_by_value() {
    let left = PreferenceModel::new().with_score("food", 1.0);
    let right = PreferenceModel::new().with_score("FOOD", 1.0);
    assert_eq!(left, right);
    assert_eq!(left.len(), 1);
}
