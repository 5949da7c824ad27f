//! Paging a review queue end to end against the in-memory backend.

use std::sync::Arc;

use moddash_lib::backend::Backend;
use moddash_lib::backend::MemoryBackend;
use moddash_lib::feed::EntityFeed;
use moddash_lib::feed::LoadOutcome;
use moddash_lib::model::ListedEntity;
use moddash_lib::model::Platform;
use moddash_lib::model::RedditReview;
use moddash_lib::model::ReviewOutcome;
use moddash_lib::model::ReviewStatus;
use moddash_lib::query::EntityQuery;

fn subreddits(count: i64) -> Vec<ListedEntity> {
    (1..=count)
        .map(|i| {
            ListedEntity::new(i, Platform::Reddit, format!("sub{}", i)).with_audience(i as u64 * 10)
        })
        .collect()
}

#[tokio::test]
async fn test_feed_pages_until_exhausted() {
    let backend = Arc::new(MemoryBackend::new(subreddits(45)));
    let mut feed = EntityFeed::new(backend.clone(), EntityQuery::new(Platform::Reddit).page_size(20));

    assert_eq!(feed.load_more().await, LoadOutcome::Appended { added: 20 });
    assert_eq!(feed.len(), 20);
    assert!(feed.has_more());

    assert_eq!(feed.load_more().await, LoadOutcome::Appended { added: 20 });
    assert_eq!(feed.len(), 40);
    assert!(feed.has_more());

    assert_eq!(feed.load_more().await, LoadOutcome::Appended { added: 5 });
    assert_eq!(feed.len(), 45);
    assert!(!feed.has_more());
    assert_eq!(feed.total_count(), Some(45));

    assert_eq!(feed.load_more().await, LoadOutcome::Skipped);
    assert_eq!(backend.fetch_count(), 3);
}

#[tokio::test]
async fn test_feed_rows_are_sorted_by_audience_desc() {
    let backend = Arc::new(MemoryBackend::new(subreddits(30)));
    let mut feed = EntityFeed::new(backend, EntityQuery::new(Platform::Reddit).page_size(20));

    feed.load_more().await;
    feed.load_more().await;

    let audiences: Vec<u64> = feed.rows().iter().map(|e| e.audience).collect();
    let mut sorted = audiences.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(audiences, sorted);
}

#[tokio::test]
async fn test_reviewing_shrinks_unreviewed_queue() {
    let backend = Arc::new(MemoryBackend::new(subreddits(5)));
    let query = EntityQuery::new(Platform::Reddit).review(ReviewOutcome::Unreviewed);
    let mut feed = EntityFeed::new(backend.clone(), query.clone());
    feed.load_more().await;
    assert_eq!(feed.len(), 5);

    let id = feed.rows()[0].id;
    feed.review(id, Some(ReviewStatus::Reddit(RedditReview::Ok)))
        .await
        .unwrap();

    assert_eq!(feed.len(), 4);
    assert_eq!(backend.count(&query).await.unwrap(), 4);
    assert_eq!(
        backend.get(Platform::Reddit, id).unwrap().review,
        Some(ReviewStatus::Reddit(RedditReview::Ok))
    );
}
