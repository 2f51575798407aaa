use std::collections::HashSet;

use futures::future::join_all;
use tracing::debug;

use crate::{
    core::types::{ContentDocument, MediaCheckReport, MediaCheckResult, MediaCheckSummary},
    media::ExistenceProbe,
};

/// Every media URL the document references, deduplicated in first-seen
/// order. Empty strings and inline `data:` URLs carry no file to check and
/// are excluded up front.
pub fn collect_media_urls(doc: &ContentDocument) -> Vec<String> {
    let mut urls = Vec::new();
    let mut seen = HashSet::new();
    let mut push = |url: &str| {
        if url.is_empty() || url.starts_with("data:") {
            return;
        }
        if seen.insert(url.to_string()) {
            urls.push(url.to_string());
        }
    };

    push(&doc.hero.background_image);
    push(&doc.about.image);
    for room in &doc.rooms.rooms {
        push(&room.legacy_image_url);
        for media in &room.media {
            push(&media.url);
            if let Some(thumbnail) = &media.thumbnail_url {
                push(thumbnail);
            }
        }
    }
    for item in &doc.gallery.items {
        push(&item.url);
        if let Some(thumbnail) = &item.thumbnail_url {
            push(thumbnail);
        }
    }
    push(&doc.site_config.logo);
    push(&doc.site_config.favicon);
    if let Some(location) = &doc.location {
        push(&location.image);
    }

    urls
}

/// URLs outside the uploads prefix are hosted elsewhere (blob storage,
/// YouTube, CDNs); we assume they exist and never probe them.
pub fn is_external(url: &str, uploads_prefix: &str) -> bool {
    !url.starts_with(uploads_prefix)
}

/// Probes every locally-hosted media reference in the document and reports
/// per-URL existence plus a summary. Probe failures count as missing.
pub async fn check_content_media<P: ExistenceProbe>(
    doc: &ContentDocument,
    probe: &P,
    uploads_prefix: &str,
) -> MediaCheckReport {
    let urls = collect_media_urls(doc);
    debug!("checking {} media url(s)", urls.len());

    let checks = urls.into_iter().map(|url| async move {
        if is_external(&url, uploads_prefix) {
            return MediaCheckResult {
                url,
                exists: true,
                external: Some(true),
                error: None,
            };
        }
        match probe.exists(&url).await {
            Ok(exists) => MediaCheckResult {
                url,
                exists,
                external: None,
                error: None,
            },
            Err(err) => MediaCheckResult {
                url,
                exists: false,
                external: None,
                error: Some(err.to_string()),
            },
        }
    });
    let results = join_all(checks).await;

    let existing = results.iter().filter(|result| result.exists).count();
    let summary = MediaCheckSummary {
        total: results.len(),
        existing,
        missing: results.len() - existing,
    };
    MediaCheckReport { results, summary }
}
