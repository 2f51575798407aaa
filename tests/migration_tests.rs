use innkeep::content::migrate;
use innkeep::core::defaults;
use innkeep::core::types::{MediaItem, MediaKind};

fn to_value(doc: &innkeep::ContentDocument) -> serde_json::Value {
    serde_json::to_value(doc).expect("document serializes")
}

#[test]
fn legacy_gallery_images_become_typed_items() {
    let raw = serde_json::json!({
        "gallery": {
            "title": "Gallery",
            "subtitle": "",
            "images": [
                { "url": "a.jpg", "alt": "A" },
                { "url": "b.jpg", "alt": "B" }
            ]
        }
    });

    let doc = migrate(raw);
    assert_eq!(doc.gallery.items.len(), 2);
    assert_eq!(
        doc.gallery.items[0],
        MediaItem {
            kind: MediaKind::Image,
            url: "a.jpg".to_string(),
            alt_text: "A".to_string(),
            thumbnail_url: None,
        }
    );
    assert_eq!(doc.gallery.items[1].url, "b.jpg");
    assert_eq!(doc.gallery.items[1].alt_text, "B");
}

#[test]
fn bare_string_gallery_entries_are_normalized() {
    let raw = serde_json::json!({
        "gallery": {
            "title": "Gallery",
            "items": ["facade.jpg", { "url": "patio.jpg", "alt": "Patio" }]
        }
    });

    let doc = migrate(raw);
    assert_eq!(doc.gallery.items.len(), 2);
    assert_eq!(doc.gallery.items[0].kind, MediaKind::Image);
    assert_eq!(doc.gallery.items[0].url, "facade.jpg");
    assert_eq!(doc.gallery.items[1].kind, MediaKind::Image);
    assert_eq!(doc.gallery.items[1].alt_text, "Patio");
}

#[test]
fn room_with_only_legacy_image_gets_media_array() {
    let raw = serde_json::json!({
        "rooms": {
            "title": "Rooms",
            "subtitle": "",
            "rooms": [{
                "name": "Suite",
                "description": "",
                "showPrice": false,
                "image": "suite.jpg",
                "features": [],
                "popular": true
            }]
        }
    });

    let doc = migrate(raw);
    let room = &doc.rooms.rooms[0];
    assert_eq!(
        room.media,
        vec![MediaItem {
            kind: MediaKind::Image,
            url: "suite.jpg".to_string(),
            alt_text: "Suite".to_string(),
            thumbnail_url: None,
        }]
    );
    assert_eq!(room.legacy_image_url, "suite.jpg");
    assert!(!room.price_visible);
    assert!(room.is_featured);
}

#[test]
fn room_without_image_or_media_gets_empty_array() {
    let raw = serde_json::json!({
        "rooms": {
            "rooms": [{ "name": "Bare", "description": "" }]
        }
    });

    let doc = migrate(raw);
    assert!(doc.rooms.rooms[0].media.is_empty());
}

#[test]
fn existing_media_array_is_left_alone() {
    let raw = serde_json::json!({
        "rooms": {
            "rooms": [{
                "name": "Video Room",
                "image": "old.jpg",
                "media": [{
                    "kind": "video",
                    "url": "tour.mp4",
                    "altText": "Tour",
                    "thumbnailUrl": "tour.jpg"
                }]
            }]
        }
    });

    let doc = migrate(raw);
    let room = &doc.rooms.rooms[0];
    assert_eq!(room.media.len(), 1);
    assert_eq!(room.media[0].kind, MediaKind::Video);
    assert_eq!(room.media[0].thumbnail_url.as_deref(), Some("tour.jpg"));
}

#[test]
fn migration_is_idempotent_on_current_documents() {
    let mut current = defaults::default_content();
    current.rooms.rooms[0].media.push(MediaItem {
        kind: MediaKind::Video,
        url: "/uploads/tour.mp4".to_string(),
        alt_text: "Virtual tour".to_string(),
        thumbnail_url: Some("/uploads/tour.jpg".to_string()),
    });

    let once = migrate(to_value(&current));
    assert_eq!(once, current);
    let twice = migrate(to_value(&once));
    assert_eq!(twice, once);
}

#[test]
fn missing_sections_fall_back_to_defaults() {
    let raw = serde_json::json!({
        "hero": { "title": "X", "subtitle": "", "backgroundImage": "" }
    });

    let doc = migrate(raw);
    assert_eq!(doc.hero.title, "X");
    assert_eq!(doc.services, defaults::default_services());
    assert_eq!(doc.contact, defaults::default_contact());
    assert!(doc.location.is_none());
    assert_eq!(doc.metadata.version, 0);
}

#[test]
fn non_object_input_yields_full_defaults() {
    assert_eq!(
        migrate(serde_json::Value::String("garbage".to_string())),
        defaults::default_content()
    );
    assert_eq!(migrate(serde_json::Value::Null), defaults::default_content());
}

#[test]
fn metadata_version_is_preserved() {
    let raw = serde_json::json!({
        "metadata": { "version": 7 }
    });
    assert_eq!(migrate(raw).metadata.version, 7);
}
