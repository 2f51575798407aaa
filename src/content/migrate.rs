//! Upgrades older document shapes to the current one. Older deployments
//! stored the gallery as a flat `images: [{url, alt}]` list and each room's
//! picture as a bare `image` string; current documents use typed media items
//! and per-room media arrays. Running this on an already-current document is
//! the identity.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::core::{
    defaults,
    types::{ContentDocument, DocumentMetadata},
};

/// Total over any JSON value: anything unusable degrades to the compiled-in
/// default for the affected section rather than failing the load.
pub fn migrate(raw: Value) -> ContentDocument {
    let Value::Object(mut root) = raw else {
        return defaults::default_content();
    };

    migrate_gallery(&mut root);
    migrate_rooms(&mut root);

    ContentDocument {
        site_config: section(&root, "siteConfig", defaults::default_site_config),
        hero: section(&root, "hero", defaults::default_hero),
        about: section(&root, "about", defaults::default_about),
        location: optional_section(&root, "location"),
        rooms: section(&root, "rooms", defaults::default_rooms),
        virtual_tour: section(&root, "virtualTour", defaults::default_virtual_tour),
        gallery: section(&root, "gallery", defaults::default_gallery),
        services: section(&root, "services", defaults::default_services),
        testimonials: section(&root, "testimonials", defaults::default_testimonials),
        contact: section(&root, "contact", defaults::default_contact),
        footer: optional_section(&root, "footer"),
        map: optional_section(&root, "map"),
        metadata: section(&root, "metadata", DocumentMetadata::default),
    }
}

fn section<T: DeserializeOwned>(
    root: &Map<String, Value>,
    key: &str,
    fallback: impl FnOnce() -> T,
) -> T {
    root.get(key)
        .cloned()
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_else(fallback)
}

fn optional_section<T: DeserializeOwned>(root: &Map<String, Value>, key: &str) -> Option<T> {
    root.get(key)
        .filter(|value| !value.is_null())
        .cloned()
        .and_then(|value| serde_json::from_value(value).ok())
}

/// Legacy gallery: `images: [{url, alt}]` instead of `items`. Item lists may
/// also hold bare URL strings or untyped `{url, ...}` objects from the
/// earliest admin builds.
fn migrate_gallery(root: &mut Map<String, Value>) {
    let Some(gallery) = root.get_mut("gallery").and_then(Value::as_object_mut) else {
        return;
    };

    if !gallery.contains_key("items") {
        if let Some(images) = gallery.get("images").and_then(Value::as_array).cloned() {
            let items: Vec<Value> = images
                .iter()
                .filter_map(Value::as_object)
                .map(|image| {
                    serde_json::json!({
                        "kind": "image",
                        "url": image.get("url").cloned().unwrap_or(Value::String(String::new())),
                        "altText": image.get("alt").cloned().unwrap_or(Value::String(String::new())),
                    })
                })
                .collect();
            gallery.remove("images");
            gallery.insert("items".to_string(), Value::Array(items));
        }
    }

    if let Some(items) = gallery.get_mut("items").and_then(Value::as_array_mut) {
        for item in items.iter_mut() {
            *item = normalize_media_item(item.take());
        }
    }
}

fn normalize_media_item(item: Value) -> Value {
    match item {
        Value::String(url) => serde_json::json!({
            "kind": "image",
            "url": url,
            "altText": "Gallery image",
        }),
        Value::Object(mut map) => {
            let has_kind = map.contains_key("kind") || map.contains_key("type");
            if !has_kind && map.contains_key("url") {
                map.insert("kind".to_string(), Value::String("image".to_string()));
            }
            Value::Object(map)
        }
        other => other,
    }
}

/// Rooms with a bare legacy `image` string and no `media` array get that
/// image folded into `media[0]`, alt-texted with the room name; rooms with
/// neither get an empty array. A `media` key that is already present, even
/// empty, is left alone.
fn migrate_rooms(root: &mut Map<String, Value>) {
    let Some(rooms) = root
        .get_mut("rooms")
        .and_then(Value::as_object_mut)
        .and_then(|section| section.get_mut("rooms"))
        .and_then(Value::as_array_mut)
    else {
        return;
    };

    for room in rooms.iter_mut() {
        let Some(room) = room.as_object_mut() else {
            continue;
        };
        let has_media = room.get("media").is_some_and(|media| !media.is_null());
        if has_media {
            continue;
        }

        let legacy_url = room
            .get("image")
            .or_else(|| room.get("legacyImageUrl"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        if legacy_url.is_empty() {
            room.insert("media".to_string(), Value::Array(vec![]));
            continue;
        }

        let name = room
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        room.insert(
            "media".to_string(),
            Value::Array(vec![serde_json::json!({
                "kind": "image",
                "url": legacy_url,
                "altText": name,
            })]),
        );
    }
}
