//! End-to-end engine tests driven by the scripted feed.

use skein_testkit::*;
use skein_tiling::{Cursor, CursorList, TiledQuery};
use skein_timeline::{
    Presentation, TilingStatus, Timeline, TimelineAction, TimelineConfig, TimelineSource,
};
use std::sync::Arc;
use std::time::Duration;

fn spawn_feed(feed: Arc<ScriptedFeed>) -> skein_timeline::TimelineHandle {
    Timeline::spawn(feed, TimelineSource::Following, TimelineConfig::default())
}

#[tokio::test]
async fn initial_session_loads_and_marks_refreshed() {
    init_tracing();
    let feed = Arc::new(ScriptedFeed::paged(vec![vec![single(1), single(2)]]));
    let handle = spawn_feed(Arc::clone(&feed));

    let mut states = handle.states();
    let state = wait_for(&mut states, |s| s.items.len() == 2).await;

    assert!(matches!(state.status, TilingStatus::Refreshed { anchor } if anchor == state.query.anchor));
    assert_eq!(state.query.page, 0);
    assert_eq!(feed.requests().first().map(|(q, c)| (q.page, c.clone())), Some((0, Cursor::Initial)));
}

#[tokio::test]
async fn next_page_resolves_with_the_recorded_token() {
    init_tracing();
    let feed = Arc::new(ScriptedFeed::new(vec![
        CursorList::new(vec![single(1)], "abc"),
        CursorList::terminal(vec![single(2)]),
    ]));
    let handle = spawn_feed(Arc::clone(&feed));

    let mut states = handle.states();
    let state = wait_for(&mut states, |s| s.items.len() == 1).await;

    handle
        .send(TimelineAction::LoadAround(state.query.with_page(1)))
        .expect("engine running");
    let state = wait_for(&mut states, |s| s.items.len() == 2).await;

    assert!(state.items.is_page_contiguous());
    let page_one_cursors: Vec<_> = feed
        .requests()
        .into_iter()
        .filter(|(q, _)| q.page == 1)
        .map(|(_, c)| c)
        .collect();
    assert_eq!(page_one_cursors, vec![Cursor::Next("abc".to_string())]);
}

#[tokio::test]
async fn refresh_supersedes_results_still_in_flight() {
    init_tracing();
    let feed = Arc::new(ScriptedFeed::paged(vec![
        vec![single(1)],
        vec![single(2)],
    ]));
    feed.hold_page(1);
    let handle = spawn_feed(Arc::clone(&feed));

    let mut states = handle.states();
    let before = wait_for(&mut states, |s| s.items.len() == 1).await;
    let old_anchor = before.query.anchor;

    // Scroll toward page 1 (its fetch blocks on the gate), then refresh.
    handle
        .send(TimelineAction::LoadAround(before.query.with_page(1)))
        .expect("engine running");
    handle.send(TimelineAction::Refresh).expect("engine running");

    let refreshed = wait_for(&mut states, |s| {
        s.query.anchor > old_anchor && matches!(s.status, TilingStatus::Refreshed { .. })
    })
    .await;
    assert_eq!(refreshed.query.page, 0);
    assert_eq!(refreshed.items.len(), 1);

    // The abandoned page-1 fetch completes into a dead pipeline; the state
    // keyed to the old anchor never resurfaces.
    feed.release_page(1);
    tokio::time::sleep(Duration::from_millis(100)).await;
    let after = handle.state();
    assert_eq!(after.query.anchor, refreshed.query.anchor);
    assert_eq!(after.items.len(), 1);
    assert!(after.items.is_valid_for(&after.query));
}

#[tokio::test]
async fn update_signal_sets_and_dismisses() {
    init_tracing();
    let feed = Arc::new(ScriptedFeed::paged(vec![vec![single(1)]]));
    let handle = spawn_feed(Arc::clone(&feed));
    let mut states = handle.states();
    wait_for(&mut states, |s| s.items.len() == 1).await;

    feed.set_updates(true);
    wait_for(&mut states, |s| s.has_updates).await;

    handle
        .send(TimelineAction::DismissRefresh)
        .expect("engine running");
    wait_for(&mut states, |s| !s.has_updates).await;

    // The signal can announce again after a dismissal.
    feed.set_updates(false);
    feed.set_updates(true);
    wait_for(&mut states, |s| s.has_updates).await;
}

#[tokio::test]
async fn layout_actions_change_geometry_only() {
    init_tracing();
    let feed = Arc::new(ScriptedFeed::paged(vec![vec![single(1)]]));
    let handle = spawn_feed(feed);
    let mut states = handle.states();
    let before = wait_for(&mut states, |s| s.items.len() == 1).await;

    handle
        .send(TimelineAction::UpdatePreferredPresentation(
            Presentation::CondensedMedia,
        ))
        .expect("engine running");
    let state = wait_for(&mut states, |s| s.presentation == Presentation::CondensedMedia).await;
    assert_eq!(state.num_columns, 2);

    handle
        .send(TimelineAction::GridSize(3))
        .expect("engine running");
    let state = wait_for(&mut states, |s| s.num_columns == 3).await;
    assert_eq!(state.query, before.query);
    assert_eq!(state.status, before.status);
}

#[tokio::test]
async fn duplicates_are_filtered_across_pages() {
    init_tracing();
    let feed = Arc::new(ScriptedFeed::paged(vec![
        vec![single(1), repost(1, 9)],
        vec![single(1), single(2)],
    ]));
    let handle = spawn_feed(feed);

    let mut states = handle.states();
    let state = wait_for(&mut states, |s| s.items.len() == 1).await;

    handle
        .send(TimelineAction::LoadAround(state.query.with_page(1)))
        .expect("engine running");
    let state = wait_for(&mut states, |s| s.items.len() == 2).await;

    let ids: Vec<_> = state.items.items().map(|item| item.id()).collect();
    assert!(ids[0].contains("post-1"));
    assert!(ids[1].contains("post-2"));
}

#[tokio::test]
async fn an_empty_feed_settles_without_refreshing() {
    init_tracing();
    let feed = Arc::new(ScriptedFeed::paged(vec![vec![]]));
    let handle = spawn_feed(Arc::clone(&feed));

    // Wait until the fetch has been served, then let the engine settle.
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while feed.requests().is_empty() {
        assert!(tokio::time::Instant::now() < deadline, "fetch never arrived");
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    tokio::time::sleep(Duration::from_millis(100)).await;

    let state = handle.state();
    assert!(state.items.is_empty());
    assert_eq!(state.status, TilingStatus::Initial);
}
