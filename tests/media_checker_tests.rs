use std::fs;

use innkeep::{
    core::defaults,
    core::errors::{SyncError, SyncResult},
    core::types::{ContentDocument, MediaItem, MediaKind},
    media::{checker, cleanup, ExistenceProbe, FsProbe},
};

const UPLOADS_PREFIX: &str = "/uploads/";

fn media(url: &str) -> MediaItem {
    MediaItem {
        kind: MediaKind::Image,
        url: url.to_string(),
        alt_text: String::new(),
        thumbnail_url: None,
    }
}

/// Three local URLs (one of which will not exist on disk) plus two external
/// ones, spread across the sections the checker walks.
fn mixed_document() -> ContentDocument {
    let mut doc = defaults::default_content();
    doc.hero.background_image = "/uploads/hero.jpg".to_string();
    doc.about.image = "https://cdn.example.com/about.jpg".to_string();
    doc.rooms.rooms[0].media = vec![media("/uploads/room.jpg")];
    doc.gallery.items = vec![media("/uploads/missing.jpg"), media("https://youtu.be/tour")];
    doc.site_config.logo = String::new();
    doc.site_config.favicon = String::new();
    doc
}

#[tokio::test]
async fn summary_counts_local_and_external_references() {
    let dir = tempfile::tempdir().expect("temp dir");
    let uploads = dir.path().join("uploads");
    fs::create_dir_all(&uploads).expect("uploads dir");
    fs::write(uploads.join("hero.jpg"), b"jpg").expect("hero file");
    fs::write(uploads.join("room.jpg"), b"jpg").expect("room file");

    let probe = FsProbe::new(dir.path());
    let report = checker::check_content_media(&mixed_document(), &probe, UPLOADS_PREFIX).await;

    assert_eq!(report.summary.total, 5);
    assert_eq!(report.summary.existing, 4);
    assert_eq!(report.summary.missing, 1);

    let externals: Vec<_> = report
        .results
        .iter()
        .filter(|result| result.external == Some(true))
        .collect();
    assert_eq!(externals.len(), 2);
    assert!(externals.iter().all(|result| result.exists));

    let missing: Vec<_> = report
        .results
        .iter()
        .filter(|result| !result.exists)
        .collect();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].url, "/uploads/missing.jpg");
}

#[test]
fn collection_dedupes_and_skips_inline_data() {
    let mut doc = defaults::default_content();
    doc.hero.background_image = "/uploads/shared.jpg".to_string();
    doc.about.image = "/uploads/shared.jpg".to_string();
    doc.site_config.favicon = "data:image/png;base64,AAAA".to_string();
    doc.site_config.logo = String::new();
    doc.gallery.items = vec![MediaItem {
        kind: MediaKind::Video,
        url: "/uploads/tour.mp4".to_string(),
        alt_text: "Tour".to_string(),
        thumbnail_url: Some("/uploads/tour-thumb.jpg".to_string()),
    }];
    doc.rooms.rooms[0].legacy_image_url = "/uploads/room-legacy.jpg".to_string();

    let urls = checker::collect_media_urls(&doc);
    assert_eq!(
        urls,
        vec![
            "/uploads/shared.jpg",
            "/uploads/room-legacy.jpg",
            "/uploads/tour.mp4",
            "/uploads/tour-thumb.jpg",
        ]
    );
}

struct FailingProbe;

impl ExistenceProbe for FailingProbe {
    async fn exists(&self, _url: &str) -> SyncResult<bool> {
        Err(SyncError::Probe("connection reset".to_string()))
    }
}

#[tokio::test]
async fn probe_failures_count_as_missing() {
    let mut doc = defaults::default_content();
    doc.hero.background_image = "/uploads/hero.jpg".to_string();
    doc.site_config.logo = String::new();
    doc.site_config.favicon = String::new();

    let report = checker::check_content_media(&doc, &FailingProbe, UPLOADS_PREFIX).await;
    assert_eq!(report.summary.missing, 1);
    let result = &report.results[0];
    assert!(!result.exists);
    assert!(result.error.as_deref().is_some_and(|err| err.contains("connection reset")));
}

#[tokio::test]
async fn cleanup_prunes_only_dead_references() {
    let dir = tempfile::tempdir().expect("temp dir");
    let uploads = dir.path().join("uploads");
    fs::create_dir_all(&uploads).expect("uploads dir");
    fs::write(uploads.join("keep.jpg"), b"jpg").expect("keep file");

    let mut doc = defaults::default_content();
    doc.hero.background_image = "/uploads/gone.jpg".to_string();
    doc.about.image = "https://cdn.example.com/about.jpg".to_string();
    doc.site_config.logo = String::new();
    doc.site_config.favicon = String::new();
    doc.rooms.rooms[0].media = vec![media("/uploads/keep.jpg"), media("/uploads/gone-room.jpg")];
    doc.gallery.items = vec![MediaItem {
        kind: MediaKind::Video,
        url: "/uploads/keep.jpg".to_string(),
        alt_text: "Tour".to_string(),
        thumbnail_url: Some("/uploads/gone-thumb.jpg".to_string()),
    }];

    let probe = FsProbe::new(dir.path());
    let report = checker::check_content_media(&doc, &probe, UPLOADS_PREFIX).await;
    let removed = cleanup::prune_missing(&mut doc, &report);

    assert_eq!(removed, 3);
    assert!(doc.hero.background_image.is_empty());
    assert_eq!(doc.about.image, "https://cdn.example.com/about.jpg");
    assert_eq!(doc.rooms.rooms[0].media.len(), 1);
    assert_eq!(doc.rooms.rooms[0].media[0].url, "/uploads/keep.jpg");
    assert_eq!(doc.gallery.items.len(), 1);
    assert!(doc.gallery.items[0].thumbnail_url.is_none());
}

#[tokio::test]
async fn cleanup_is_a_no_op_when_everything_exists() {
    let dir = tempfile::tempdir().expect("temp dir");
    let uploads = dir.path().join("uploads");
    fs::create_dir_all(&uploads).expect("uploads dir");
    fs::write(uploads.join("hero.jpg"), b"jpg").expect("hero file");

    let mut doc = defaults::default_content();
    doc.hero.background_image = "/uploads/hero.jpg".to_string();
    doc.site_config.logo = String::new();
    doc.site_config.favicon = String::new();

    let probe = FsProbe::new(dir.path());
    let report = checker::check_content_media(&doc, &probe, UPLOADS_PREFIX).await;
    let before = doc.clone();
    assert_eq!(cleanup::prune_missing(&mut doc, &report), 0);
    assert_eq!(doc, before);
}
