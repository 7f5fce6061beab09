//! Feed pagination through the async driver

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use treehouse_core::feed::{Feed, LoadOutcome, PageSource, ScrollState};
use treehouse_core::{Card, CardKind, PlaceholderFeed, TreeError, TreeResult};

/// Source with a fixed number of pages, a call counter and optional delay/failure
#[derive(Default)]
struct ScriptedSource {
    pages: usize,
    calls: AtomicUsize,
    fail_first: bool,
    delay_ms: u64,
}

impl PageSource for ScriptedSource {
    async fn fetch_page(&self, page: u32, size: usize) -> TreeResult<Vec<Card>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
        if self.fail_first && call == 0 {
            return Err(TreeError::StorageRead("connection reset".into()));
        }
        if page as usize >= self.pages {
            return Ok(Vec::new());
        }
        Ok((0..size)
            .map(|i| {
                let id = format!("p{page}-{i}");
                Card::new(id.as_str(), CardKind::Classic, &format!("https://img.test/{id}.jpg"))
                    .unwrap()
            })
            .collect())
    }
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_triggers_fetch_once() {
    let feed = Arc::new(Feed::new(
        ScriptedSource {
            pages: 10,
            delay_ms: 50,
            ..Default::default()
        },
        5,
    ));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let feed = feed.clone();
            tokio::spawn(async move { feed.load_more().await })
        })
        .collect();
    let outcomes = futures::future::join_all(handles).await;

    let appended = outcomes
        .iter()
        .filter(|o| matches!(o.as_ref().unwrap(), LoadOutcome::Appended(5)))
        .count();
    assert_eq!(appended, 1);
    assert_eq!(feed.source().calls.load(Ordering::SeqCst), 1);
    assert_eq!(feed.len(), 5);
}

#[tokio::test]
async fn test_pages_append_in_order() {
    let feed = Feed::new(PlaceholderFeed::new(3), 4);
    feed.load_more().await;
    let first = feed.cards();
    feed.load_more().await;
    let both = feed.cards();

    assert_eq!(both.len(), 8);
    assert_eq!(&both[..4], &first[..]);
    assert_eq!(feed.state(), ScrollState::Idle);
}

#[tokio::test]
async fn test_exhausts_after_last_page() {
    let feed = Feed::new(
        ScriptedSource {
            pages: 2,
            ..Default::default()
        },
        3,
    );
    assert_eq!(feed.load_more().await, LoadOutcome::Appended(3));
    assert_eq!(feed.load_more().await, LoadOutcome::Appended(3));
    assert_eq!(feed.load_more().await, LoadOutcome::Exhausted);
    assert_eq!(feed.load_more().await, LoadOutcome::Skipped);
    assert_eq!(feed.source().calls.load(Ordering::SeqCst), 3);
    assert_eq!(feed.len(), 6);
}

#[tokio::test]
async fn test_failure_returns_to_idle_and_retries() {
    let feed = Feed::new(
        ScriptedSource {
            pages: 5,
            fail_first: true,
            ..Default::default()
        },
        2,
    );
    assert!(matches!(feed.load_more().await, LoadOutcome::Failed(_)));
    assert_eq!(feed.state(), ScrollState::Idle);
    assert!(feed.is_empty());

    assert_eq!(feed.load_more().await, LoadOutcome::Appended(2));
    assert_eq!(feed.cards()[0].id.as_str(), "p0-0");
}

#[tokio::test(start_paused = true)]
async fn test_reset_while_loading_discards_result() {
    let feed = Arc::new(Feed::new(
        ScriptedSource {
            pages: 5,
            delay_ms: 100,
            ..Default::default()
        },
        2,
    ));

    let pending = {
        let feed = feed.clone();
        tokio::spawn(async move { feed.load_more().await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    feed.reset();

    assert_eq!(pending.await.unwrap(), LoadOutcome::Stale);
    assert!(feed.is_empty());
    assert_eq!(feed.state(), ScrollState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_load_releases_controller() {
    let feed = Feed::new(
        ScriptedSource {
            pages: 5,
            delay_ms: 10_000,
            ..Default::default()
        },
        2,
    );

    let cancelled = tokio::time::timeout(Duration::from_millis(10), feed.load_more()).await;
    assert!(cancelled.is_err());
    assert_eq!(feed.state(), ScrollState::Idle);

    assert_eq!(feed.load_more().await, LoadOutcome::Appended(2));
    assert_eq!(feed.cards()[0].id.as_str(), "p0-0");
    assert_eq!(feed.source().calls.load(Ordering::SeqCst), 2);
}
