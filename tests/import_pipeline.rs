mod common;

use bookmarks_core::prelude::*;
use chrono::DateTime;

async fn stored(repo: &impl LinkRepository, url: &str) -> Option<Link> {
    let canonical = common::normalizer().canonicalize(url);
    repo.find_by_canonical_url(&canonical).await.unwrap()
}

#[tokio::test]
async fn test_import_creates_link() {
    let (service, repo) = common::create_test_service();
    let record = FieldBag::for_url("https://example.com/").with_title("Example");

    let outcome = service
        .import_one("https://example.com/", &record)
        .await
        .unwrap();

    assert!(matches!(outcome, ImportOutcome::Created(_)));
    let link = stored(repo.as_ref(), "https://example.com/").await.unwrap();
    assert_eq!(link.title, "Example");
    assert!(link.tags.is_empty());
    assert!(!link.is_read());
}

#[tokio::test]
async fn test_import_same_record_twice_is_idempotent() {
    let (service, repo) = common::create_test_service();
    let record = FieldBag::for_url("http://theguardian.com/world")
        .with_title("World")
        .with_description("News")
        .with_read_at("2023-11-14T22:13:20Z")
        .with_saved_at(1_600_000_000i64)
        .with_tags("{news,world}");

    let first = service
        .import_one("http://theguardian.com/world", &record)
        .await
        .unwrap();
    let second = service
        .import_one("http://theguardian.com/world", &record)
        .await
        .unwrap();

    assert!(matches!(first, ImportOutcome::Created(_)));
    assert_eq!(second, ImportOutcome::Unchanged);
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_url_variants_share_identity() {
    let (service, repo) = common::create_test_service();

    service
        .import_one(
            "http://theguardian.com/a",
            &FieldBag::for_url("http://theguardian.com/a").with_tags("{one}"),
        )
        .await
        .unwrap();
    let outcome = service
        .import_one(
            "https://www.theguardian.com/a",
            &FieldBag::for_url("https://www.theguardian.com/a").with_tags("{two}"),
        )
        .await
        .unwrap();

    assert!(matches!(outcome, ImportOutcome::Updated(_)));
    assert_eq!(repo.len().await, 1);

    let link = stored(repo.as_ref(), "https://www.theguardian.com/a")
        .await
        .unwrap();
    assert_eq!(link.url.as_str(), "https://www.theguardian.com/a");
    assert_eq!(link.tags.encode(), "{one,two}");
}

#[tokio::test]
async fn test_trailing_slash_is_a_distinct_identity() {
    let (service, repo) = common::create_test_service();

    for url in ["https://example.com", "https://example.com/"] {
        service
            .import_one(url, &FieldBag::for_url(url))
            .await
            .unwrap();
    }

    assert_eq!(repo.len().await, 2);
}

#[tokio::test]
async fn test_known_read_time_survives_epoch_import() {
    let (service, repo) = common::create_test_service();
    let url = "https://example.com/article";

    service
        .import_one(url, &FieldBag::for_url(url).with_read_at(1_700_000_000i64))
        .await
        .unwrap();
    let outcome = service
        .import_one(url, &FieldBag::for_url(url).with_read_at(0i64))
        .await
        .unwrap();

    assert_eq!(outcome, ImportOutcome::Unchanged);
    let link = stored(repo.as_ref(), url).await.unwrap();
    assert_eq!(link.read_at, DateTime::from_timestamp(1_700_000_000, 0));
}

#[tokio::test]
async fn test_batch_from_json() {
    let (service, repo) = common::create_test_service();
    let records = parse_records(
        r#"[
            {"URL": "http://www.jacobinmag.com/2019/01/x", "Title": "Jacobin", "ReadAt": 0},
            {"URL": "https://jacobin.com/2019/01/x", "Tags": "{left}"},
            {"URL": "https://foo.medium.com/bar", "SavedAt": "garbage"},
            {"Title": "no url"},
            {"URL": 12}
        ]"#,
    )
    .unwrap();

    let summary = service.import_batch(&records).await.unwrap();

    assert_eq!(
        summary,
        ImportSummary {
            total: 5,
            created: 2,
            updated: 1,
            unchanged: 0,
            skipped: 2,
        }
    );

    let jacobin = stored(repo.as_ref(), "https://jacobin.com/2019/01/x")
        .await
        .unwrap();
    assert_eq!(jacobin.title, "Jacobin");
    assert!(jacobin.is_read());
    assert!(!jacobin.has_read_date());
    assert!(jacobin.tags.contains("left"));

    let medium = stored(repo.as_ref(), "https://scribe.rip/bar").await.unwrap();
    assert_eq!(medium.url.as_str(), "https://scribe.rip/bar");
}

#[tokio::test]
async fn test_list_after_import() {
    let (service, repo) = common::create_test_service();
    let records = parse_records(
        r#"[
            {"URL": "https://a.com/", "SavedAt": 1600000000},
            {"URL": "https://b.com/", "SavedAt": 1700000000}
        ]"#,
    )
    .unwrap();
    service.import_batch(&records).await.unwrap();

    let links = repo.list(1, 10, false).await.unwrap();
    assert_eq!(links.len(), 2);
    assert_eq!(links[0].url.as_str(), "https://b.com/");

    assert!(repo.list(1, 10, true).await.unwrap().is_empty());
}
