use std::collections::HashSet;

use tracing::warn;

use crate::core::types::{ContentDocument, MediaCheckReport, MediaItem};

/// Rewrites the document so it no longer references media that failed the
/// existence check: scalar fields are blanked, media and gallery entries are
/// dropped, dead thumbnails are cleared. Returns the number of pruned
/// references.
pub fn prune_missing(doc: &mut ContentDocument, report: &MediaCheckReport) -> usize {
    let missing: HashSet<&str> = report
        .results
        .iter()
        .filter(|result| !result.exists)
        .map(|result| result.url.as_str())
        .collect();
    if missing.is_empty() {
        return 0;
    }

    let mut removed = 0;
    let mut blank = |field: &mut String| {
        if !field.is_empty() && missing.contains(field.as_str()) {
            warn!("pruning dead media reference: {field}");
            field.clear();
            removed += 1;
        }
    };

    blank(&mut doc.hero.background_image);
    blank(&mut doc.about.image);
    blank(&mut doc.site_config.logo);
    blank(&mut doc.site_config.favicon);
    if let Some(location) = &mut doc.location {
        blank(&mut location.image);
    }
    for room in &mut doc.rooms.rooms {
        blank(&mut room.legacy_image_url);
    }
    drop(blank);

    for room in &mut doc.rooms.rooms {
        removed += prune_items(&mut room.media, &missing);
    }
    removed += prune_items(&mut doc.gallery.items, &missing);

    removed
}

fn prune_items(items: &mut Vec<MediaItem>, missing: &HashSet<&str>) -> usize {
    let before = items.len();
    items.retain(|item| {
        let keep = !missing.contains(item.url.as_str());
        if !keep {
            warn!("pruning dead media item: {}", item.url);
        }
        keep
    });
    let mut removed = before - items.len();
    for item in items.iter_mut() {
        if let Some(thumbnail) = &item.thumbnail_url {
            if missing.contains(thumbnail.as_str()) {
                warn!("clearing dead thumbnail: {thumbnail}");
                item.thumbnail_url = None;
                removed += 1;
            }
        }
    }
    removed
}
