use std::fs;
use std::time::Duration;

use httpmock::Method::GET;
use nepse_sentiment::classify::NewsRow;
use nepse_sentiment::store::{self, DataLayout};
use nepse_sentiment::{Pipeline, PipelineConfig, SentimentScorer};

use crate::common::{client_for, fixture, mock_news_first_page, setup_server};
use crate::offline_pipeline;

#[tokio::test]
async fn matched_articles_land_in_per_symbol_files_once() {
    let server = setup_server();
    let mock = mock_news_first_page(&server, fixture("news", "page1", "json"));
    let dir = tempfile::tempdir().unwrap();
    let pipeline = offline_pipeline(&server, dir.path(), PipelineConfig::default());

    assert_eq!(pipeline.ingest().await, 1);

    let path = pipeline.config().layout.news_file("NABIL");
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("articleId,publishedDate,title,summary,mediaUrl,matchedCompany,matchScore,source"));

    let rows: Vec<NewsRow> = store::read_rows(&path).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].article_id, "101");
    assert_eq!(rows[0].source, "ShareHub");
    assert_eq!(rows[0].media_url, "https://example.com/news/101");

    // The short first page ends the walk.
    mock.assert_calls(1);

    // Same feed again: everything was seen already.
    assert_eq!(pipeline.ingest().await, 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), text);
}

#[tokio::test]
async fn full_page_follows_cursor_and_empty_page_is_retried_once() {
    let server = setup_server();
    let first = mock_news_first_page(&server, fixture("news", "page1", "json"));
    let next = server.mock(|when, then| {
        when.method(GET).path("/news").query_param("LastPostId", "103");
        then.status(200).body(r#"{"data":[]}"#);
    });
    let dir = tempfile::tempdir().unwrap();
    let pipeline = offline_pipeline(&server, dir.path(), PipelineConfig::default().page_size(3));

    assert_eq!(pipeline.ingest().await, 1);
    first.assert_calls(1);
    next.assert_calls(2);
}

#[tokio::test]
async fn target_caps_the_walk() {
    let server = setup_server();
    let first = mock_news_first_page(&server, fixture("news", "page1", "json"));
    let next = server.mock(|when, then| {
        when.method(GET).path("/news").query_param("LastPostId", "103");
        then.status(200).body(r#"{"data":[]}"#);
    });
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::default().page_size(3).target_articles(1);
    let pipeline = offline_pipeline(&server, dir.path(), config);

    assert_eq!(pipeline.ingest().await, 1);
    first.assert_calls(1);
    next.assert_calls(0);
}

#[tokio::test]
async fn unavailable_feed_writes_nothing() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/news");
        then.status(500);
    });
    let dir = tempfile::tempdir().unwrap();
    let pipeline = offline_pipeline(&server, dir.path(), PipelineConfig::default());

    assert_eq!(pipeline.ingest().await, 0);
    assert!(!pipeline.config().layout.news_dir().exists());
}

#[tokio::test]
async fn each_full_batch_is_on_disk_before_the_walk_ends() {
    let server = setup_server();
    mock_news_first_page(&server, fixture("news", "page1", "json"));
    let next = server.mock(|when, then| {
        when.method(GET).path("/news").query_param("LastPostId", "103");
        then.status(500);
    });
    let dir = tempfile::tempdir().unwrap();
    // A long pause after the failed second page keeps the walk from finishing.
    let config = PipelineConfig::default()
        .layout(DataLayout::new(dir.path()))
        .page_size(3)
        .batch_size(1)
        .empty_page_pause(Duration::from_secs(30));
    let pipeline = Pipeline::new(client_for(&server), config)
        .unwrap()
        .with_scorer(SentimentScorer::new());

    let unfinished = tokio::time::timeout(Duration::from_millis(500), pipeline.ingest()).await;
    assert!(unfinished.is_err());
    next.assert_calls(3);

    let rows: Vec<NewsRow> = store::read_rows(&pipeline.config().layout.news_file("NABIL")).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].article_id, "101");
}

#[tokio::test]
async fn scheduled_runs_repeat_ingestion() {
    let server = setup_server();
    let feed = mock_news_first_page(&server, fixture("news", "page1", "json"));
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::default()
        .layout(DataLayout::new(dir.path()))
        .schedule_every(Duration::from_millis(100));
    let pipeline = Pipeline::new(client_for(&server), config)
        .unwrap()
        .with_scorer(SentimentScorer::new());

    let endless = tokio::time::timeout(Duration::from_millis(450), pipeline.run_every()).await;
    assert!(endless.is_err());

    assert!(feed.calls() >= 2, "feed fetched {} times", feed.calls());
    // Later runs find only seen articles.
    let rows: Vec<NewsRow> = store::read_rows(&pipeline.config().layout.news_file("NABIL")).unwrap();
    assert_eq!(rows.len(), 1);
}
