//! Tests for search pagination

use super::*;
use crate::error::Error;
use crate::test_support::ScriptedApi;
use crate::types::Lang;
use futures::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::time::{Duration, Instant};

fn page(ids: &[i64], next_from: Option<&str>) -> Value {
    let items: Vec<Value> = ids
        .iter()
        .map(|id| json!({"id": id, "owner_id": -1, "text": format!("post {id}")}))
        .collect();
    match next_from {
        Some(token) => json!({"items": items, "next_from": token}),
        None => json!({"items": items}),
    }
}

fn paginator(api: &ScriptedApi, query: SearchQuery) -> SearchPaginator<&ScriptedApi> {
    SearchPaginator::new(api, query, Lang::Ru).with_pacing(PacingConfig::immediate())
}

fn ids(batch: &crate::models::SearchBatch) -> Vec<i64> {
    batch.items.iter().map(|p| p.id).collect()
}

// ============================================================================
// SearchQuery Tests
// ============================================================================

#[test]
fn test_search_query_defaults() {
    let query = SearchQuery::new("POLARNET");
    assert!(query.extended);
    assert_eq!(query.count, 200);
    assert!(query.start_from.is_none());
    assert!(query.fields.is_empty());
}

#[test]
fn test_search_query_params() {
    let query = SearchQuery::new("POLARNET")
        .count(20)
        .start_id(5)
        .time_window(Some(1_600_000_000), None)
        .fields(["screen_name", "photo_100"]);

    let params = query.to_params(Some("T1"), Lang::En);
    assert_eq!(params.get("q"), Some("POLARNET"));
    assert_eq!(params.get("extended"), Some("1"));
    assert_eq!(params.get("count"), Some("20"));
    assert_eq!(params.get("start_id"), Some("5"));
    assert_eq!(params.get("start_from"), Some("T1"));
    assert_eq!(params.get("start_time"), Some("1600000000"));
    assert!(!params.contains("end_time"));
    assert!(!params.contains("offset"));
    assert_eq!(params.get("fields"), Some("screen_name,photo_100"));
    assert_eq!(params.get("lang"), Some("en"));
}

// ============================================================================
// PaginationState Tests
// ============================================================================

#[test]
fn test_pagination_state_tracks_tokens() {
    let mut state = PaginationState::new(Some("T0".to_string()));
    assert_eq!(state.cursor.as_deref(), Some("T0"));

    assert!(state.advance("T1"));
    assert_eq!(state.cursor.as_deref(), Some("T1"));
    assert!(!state.advance("T0"));
    assert!(!state.advance("T1"));

    state.add_page(3);
    assert_eq!(state.pages, 1);
    assert_eq!(state.total_fetched, 3);

    assert!(!state.is_done());
    state.mark_done(StopReason::NoToken);
    assert!(state.is_done());
}

// ============================================================================
// Paginator Tests
// ============================================================================

#[tokio::test]
async fn test_three_canned_responses() {
    let api = ScriptedApi::new()
        .respond(page(&[1, 2], Some("T1")))
        .respond(page(&[3], Some("T2")))
        .respond(page(&[], None));

    let batches = paginator(&api, SearchQuery::new("q"))
        .collect_all()
        .await
        .unwrap();

    assert_eq!(batches.len(), 2);
    assert_eq!(ids(&batches[0]), vec![1, 2]);
    assert_eq!(ids(&batches[1]), vec![3]);
    assert_eq!(api.call_count(), 3);
}

#[tokio::test]
async fn test_token_is_substituted_and_other_fields_held() {
    let api = ScriptedApi::new()
        .respond(page(&[1], Some("T1")))
        .respond(page(&[2], Some("T2")))
        .respond(page(&[3], None));

    let query = SearchQuery::new("q").count(20).time_window(Some(10), Some(20));
    let batches = paginator(&api, query).collect_all().await.unwrap();
    assert_eq!(batches.len(), 3);

    let calls = api.calls();
    assert_eq!(calls.len(), 3);
    assert!(calls.iter().all(|(method, _)| method == SEARCH_METHOD));

    let cursors: Vec<Option<&str>> = calls.iter().map(|(_, p)| p.get("start_from")).collect();
    assert_eq!(cursors, vec![None, Some("T1"), Some("T2")]);

    for (_, params) in &calls {
        assert_eq!(params.get("q"), Some("q"));
        assert_eq!(params.get("count"), Some("20"));
        assert_eq!(params.get("start_time"), Some("10"));
        assert_eq!(params.get("end_time"), Some("20"));
    }
}

#[tokio::test]
async fn test_caller_supplied_start_cursor() {
    let api = ScriptedApi::new().respond(page(&[9], None));

    let mut p = paginator(&api, SearchQuery::new("q").start_from("T5"));
    assert!(p.next_batch().await.unwrap().is_some());
    assert!(p.next_batch().await.unwrap().is_none());

    assert_eq!(api.calls()[0].1.get("start_from"), Some("T5"));
    assert_eq!(p.state().stop_reason, Some(StopReason::NoToken));
}

#[tokio::test]
async fn test_empty_first_page_yields_nothing() {
    let api = ScriptedApi::new().respond(page(&[], Some("ignored")));

    let mut p = paginator(&api, SearchQuery::new("nothing"));
    assert!(p.next_batch().await.unwrap().is_none());
    assert!(p.next_batch().await.unwrap().is_none());

    assert_eq!(api.call_count(), 1);
    assert_eq!(p.state().stop_reason, Some(StopReason::EmptyPage));
}

#[tokio::test]
async fn test_missing_token_stops_without_extra_call() {
    let api = ScriptedApi::new().respond(page(&[1, 2, 3], None));

    let batches = paginator(&api, SearchQuery::new("q"))
        .collect_all()
        .await
        .unwrap();

    assert_eq!(batches.len(), 1);
    assert_eq!(api.call_count(), 1);
}

#[tokio::test]
async fn test_empty_string_token_stops() {
    let api = ScriptedApi::new().respond(page(&[1], Some("")));

    let batches = paginator(&api, SearchQuery::new("q"))
        .collect_all()
        .await
        .unwrap();

    assert_eq!(batches.len(), 1);
    assert_eq!(api.call_count(), 1);
}

#[tokio::test]
async fn test_repeated_token_stops() {
    let api = ScriptedApi::new()
        .respond(page(&[1], Some("T1")))
        .respond(page(&[2], Some("T1")))
        .respond(page(&[3], Some("T1")));

    let mut p = paginator(&api, SearchQuery::new("q"));
    assert!(p.next_batch().await.unwrap().is_some());
    assert!(p.next_batch().await.unwrap().is_some());
    assert!(p.next_batch().await.unwrap().is_none());

    assert_eq!(api.call_count(), 2);
    assert_eq!(p.state().stop_reason, Some(StopReason::RepeatedToken));
}

#[tokio::test]
async fn test_page_limit() {
    let api = ScriptedApi::new()
        .respond(page(&[1], Some("T1")))
        .respond(page(&[2], Some("T2")))
        .respond(page(&[3], Some("T3")));

    let batches = SearchPaginator::new(&api, SearchQuery::new("q"), Lang::Ru)
        .with_pacing(PacingConfig::immediate().with_max_pages(2))
        .collect_all()
        .await
        .unwrap();

    assert_eq!(batches.len(), 2);
    assert_eq!(api.call_count(), 2);
}

#[tokio::test]
async fn test_error_propagates_and_ends_sequence() {
    let api = ScriptedApi::new()
        .respond(page(&[1], Some("T1")))
        .fail(Error::api(6, "Too many requests per second"));

    let mut p = paginator(&api, SearchQuery::new("q"));
    assert!(p.next_batch().await.unwrap().is_some());

    let err = p.next_batch().await.unwrap_err();
    assert!(matches!(err, Error::Api { code: 6, .. }));

    assert!(p.next_batch().await.unwrap().is_none());
    assert_eq!(api.call_count(), 2);
    assert_eq!(p.state().stop_reason, Some(StopReason::Error));
}

#[tokio::test]
async fn test_stream_stops_when_dropped_early() {
    let api = ScriptedApi::new()
        .respond(page(&[1], Some("T1")))
        .respond(page(&[2], Some("T2")));

    let stream = paginator(&api, SearchQuery::new("q")).into_stream();
    futures::pin_mut!(stream);
    let first = stream.next().await.unwrap().unwrap();
    assert_eq!(ids(&first), vec![1]);
    drop(stream);

    assert_eq!(api.call_count(), 1);
}

#[tokio::test]
async fn test_stream_yields_all_pages() {
    let api = ScriptedApi::new()
        .respond(page(&[1, 2], Some("T1")))
        .respond(page(&[3], Some("T2")))
        .respond(page(&[], None));

    let pages: Vec<_> = paginator(&api, SearchQuery::new("q"))
        .into_stream()
        .collect()
        .await;

    assert_eq!(pages.len(), 2);
    assert!(pages.iter().all(Result::is_ok));
}

#[tokio::test]
async fn test_delay_applied_between_pages_only() {
    let api = ScriptedApi::new()
        .respond(page(&[1], Some("T1")))
        .respond(page(&[2], None));

    let mut p = SearchPaginator::new(&api, SearchQuery::new("q"), Lang::Ru)
        .with_pacing(PacingConfig::immediate().with_delay(Duration::from_millis(50)));

    let start = Instant::now();
    assert!(p.next_batch().await.unwrap().is_some());
    let first_elapsed = start.elapsed();
    assert!(p.next_batch().await.unwrap().is_some());
    let total_elapsed = start.elapsed();

    assert!(first_elapsed < Duration::from_millis(50));
    assert!(total_elapsed >= Duration::from_millis(50));
}

#[tokio::test]
async fn test_malformed_page_is_an_error() {
    let api = ScriptedApi::new().respond(json!({"items": [{"text": "no ids"}]}));

    let err = paginator(&api, SearchQuery::new("q"))
        .collect_all()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::JsonParse(_)));
}

#[tokio::test]
async fn test_bad_attachment_does_not_fail_the_page() {
    let api = ScriptedApi::new().respond(json!({
        "items": [
            {"id": 1, "owner_id": -1, "attachments": [{"type": "link", "link": {"title": "no url"}}]},
            {"id": 2, "owner_id": -1, "attachments": [{"type": "photo", "photo": {"sizes": [{"url": "p"}]}}]}
        ]
    }));

    let mut pages = paginator(&api, SearchQuery::new("q"));
    let batch = pages.next_batch().await.unwrap().unwrap();

    assert_eq!(ids(&batch), vec![1, 2]);
    assert_eq!(pages.state().stop_reason, Some(StopReason::NoToken));
    assert!(matches!(batch.items[0].media(), Err(Error::JsonParse(_))));
    assert_eq!(batch.items[1].media().unwrap().photos, vec!["p"]);
}
