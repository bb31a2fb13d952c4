//! Tests for media extraction

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn attachments(value: serde_json::Value) -> Vec<Attachment> {
    serde_json::from_value(value).unwrap()
}

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn test_decode_known_tags() {
    let list = attachments(json!([
        {"type": "photo", "photo": {"id": 1, "owner_id": -1, "sizes": [{"url": "https://p/s", "type": "s", "width": 75, "height": 50}]}},
        {"type": "video", "video": {"owner_id": -1, "id": 2}},
        {"type": "audio", "audio": {"artist": "A", "title": "T"}},
        {"type": "link", "link": {"url": "https://example.com"}},
        {"type": "doc", "doc": {"url": "https://vk.com/doc1", "ext": "pdf"}}
    ]));

    assert_eq!(list.len(), 5);
    assert!(matches!(&list[0], Attachment::Photo(photo) if photo.sizes[0].size_type == "s"));
    assert!(matches!(&list[1], Attachment::Video(video) if video.id == 2));
    assert!(matches!(&list[2], Attachment::Audio(audio) if audio.url.is_none()));
    assert!(matches!(&list[3], Attachment::Link(link) if link.url == "https://example.com"));
    assert!(matches!(&list[4], Attachment::Doc(Some(doc)) if doc.ext == "pdf"));
}

#[test]
fn test_decode_unknown_tag_keeps_payload() {
    let list = attachments(json!([{"type": "poll", "poll": {"id": 7, "question": "?"}}]));

    match &list[0] {
        Attachment::Unknown { kind, payload } => {
            assert_eq!(kind, "poll");
            assert_eq!(payload["id"], 7);
        }
        other => panic!("Expected Unknown, got {other:?}"),
    }
}

#[test]
fn test_decode_null_doc() {
    let list = attachments(json!([{"type": "doc", "doc": null}]));
    assert_eq!(list, vec![Attachment::Doc(None)]);
}

#[test]
fn test_decode_empty_doc_object() {
    let list = attachments(json!([{"type": "doc", "doc": {}}]));
    assert_eq!(list, vec![Attachment::Doc(None)]);
    assert_eq!(extract_media(&list), MediaBundle::default());
}

#[test]
fn test_classify_raw_attachments() {
    let raw = vec![
        json!({"type": "link", "link": {"url": "https://example.com"}}),
        json!({"type": "doc", "doc": {}}),
    ];
    let bundle = classify(&raw).unwrap();
    assert_eq!(bundle.links, vec!["https://example.com"]);
    assert!(bundle.docs.is_empty());

    let raw = vec![json!({"type": "link", "link": {"title": "no url"}})];
    let err = classify(&raw).unwrap_err();
    assert!(matches!(err, crate::Error::JsonParse(_)));
    assert!(err.to_string().contains("url"));
}

#[test]
fn test_decode_missing_required_key_fails_whole_list() {
    let result: std::result::Result<Vec<Attachment>, _> = serde_json::from_value(json!([
        {"type": "link", "link": {"url": "https://ok"}},
        {"type": "photo", "photo": {"id": 1}}
    ]));
    assert!(result.is_err());

    let result: std::result::Result<Vec<Attachment>, _> =
        serde_json::from_value(json!([{"type": "video", "photo": {}}]));
    assert!(result.unwrap_err().to_string().contains("video"));

    let result: std::result::Result<Vec<Attachment>, _> = serde_json::from_value(json!([{"link": {}}]));
    assert!(result.unwrap_err().to_string().contains("type"));
}

// ============================================================================
// Classification
// ============================================================================

#[test]
fn test_video_url_without_access_key() {
    let bundle = extract_media(&attachments(json!([
        {"type": "video", "video": {"owner_id": -100, "id": 500}}
    ])));

    assert_eq!(bundle.videos, vec!["https://vk.com/video?z=video-100_500"]);
    assert!(bundle.photos.is_empty());
}

#[test]
fn test_video_url_with_access_key() {
    let bundle = extract_media(&attachments(json!([
        {"type": "video", "video": {"owner_id": -100, "id": 500, "access_key": "abc"}}
    ])));

    assert_eq!(bundle.videos, vec!["https://vk.com/video?z=video-100_500_abc"]);
}

#[test]
fn test_jpeg_doc_adds_preview_photos() {
    let bundle = extract_media(&attachments(json!([
        {"type": "doc", "doc": {
            "url": "https://vk.com/doc-1_2",
            "ext": "jpg",
            "preview": {"photo": {"sizes": [
                {"src": "https://u1", "width": 100, "height": 75},
                {"src": "https://u2", "width": 800, "height": 600}
            ]}}
        }}
    ])));

    assert_eq!(bundle.photos, vec!["https://u1", "https://u2"]);
    assert_eq!(bundle.docs, vec!["https://vk.com/doc-1_2"]);
}

#[test]
fn test_non_jpeg_doc_ignores_preview() {
    let bundle = extract_media(&attachments(json!([
        {"type": "doc", "doc": {
            "url": "https://vk.com/doc-1_3",
            "ext": "gif",
            "preview": {"photo": {"sizes": [{"src": "https://g1"}]}}
        }}
    ])));

    assert!(bundle.photos.is_empty());
    assert_eq!(bundle.docs, vec!["https://vk.com/doc-1_3"]);
}

#[test]
fn test_restricted_audio_is_skipped() {
    let bundle = extract_media(&attachments(json!([
        {"type": "audio", "audio": {"title": "restricted"}},
        {"type": "audio", "audio": {"url": ""}},
        {"type": "audio", "audio": {"url": "https://cs.vk/track.mp3"}}
    ])));

    assert_eq!(bundle.audios, vec!["https://cs.vk/track.mp3"]);
}

#[test]
fn test_unknown_tag_only_produces_diagnostic() {
    let bundle = extract_media(&attachments(json!([
        {"type": "sticker", "sticker": {"sticker_id": 1}}
    ])));

    assert_eq!(
        bundle,
        MediaBundle {
            unrecognized: vec!["sticker".to_string()],
            ..MediaBundle::default()
        }
    );
}

#[test]
fn test_order_preserved_per_list() {
    let bundle = extract_media(&attachments(json!([
        {"type": "photo", "photo": {"sizes": [{"url": "p1"}, {"url": "p2"}]}},
        {"type": "link", "link": {"url": "l1"}},
        {"type": "doc", "doc": {"url": "d1", "ext": "jpeg", "preview": {"photo": {"sizes": [{"src": "p3"}]}}}},
        {"type": "photo", "photo": {"sizes": [{"url": "p4"}]}},
        {"type": "link", "link": {"url": "l2"}}
    ])));

    assert!(bundle.videos.is_empty());
    assert_eq!(bundle.photos, vec!["p1", "p2", "p3", "p4"]);
    assert!(bundle.audios.is_empty());
    assert_eq!(bundle.links, vec!["l1", "l2"]);
    assert_eq!(bundle.docs, vec!["d1"]);
}

#[test]
fn test_empty_input() {
    assert_eq!(extract_media(&[]), MediaBundle::default());
}

#[test]
fn test_classification_is_repeatable() {
    let list = attachments(json!([
        {"type": "photo", "photo": {"sizes": [{"url": "p1"}]}},
        {"type": "video", "video": {"owner_id": 1, "id": 2}},
        {"type": "market", "market": {}}
    ]));
    let before = list.clone();

    let first = extract_media(&list);
    let second = extract_media(&list);

    assert_eq!(first, second);
    assert_eq!(list, before);
}
